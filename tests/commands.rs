// ABOUTME: Integration tests for list, update, update-by-state, and deactivate.
// ABOUTME: Runs each command against a mock GitHub API and checks requests made.

mod support;

use github_deployments::client::PREVIEW_ACCEPT_HEADER;
use github_deployments::commands::{
    ListOptions, UpdateByStateOptions, deactivate_deployments, list_deployments,
    update_by_state_deployments, update_deployments,
};
use github_deployments::diagnostics::{Diagnostics, WarningKind};
use github_deployments::error::Error;
use github_deployments::types::{DeploymentId, DeploymentState};
use std::num::NonZeroUsize;
use support::{
    DEPLOYMENTS_PATH, config, mount_deployments, mount_last_status, statuses_path,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ids(raw: impl IntoIterator<Item = u64>) -> Vec<DeploymentId> {
    raw.into_iter().map(DeploymentId::new).collect()
}

mod list {
    use super::*;

    #[tokio::test]
    async fn lists_without_fetching_statuses_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DEPLOYMENTS_PATH))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![
                support::deployment_json(1),
                support::deployment_json(2),
            ]))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(statuses_path(1)))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(0)
            .mount(&server)
            .await;

        let mut diag = Diagnostics::default();
        let deployments = list_deployments(&config(&server), &ListOptions::default(), &mut diag)
            .await
            .unwrap();

        assert_eq!(deployments.ids(), ids([1, 2]));
        assert!(deployments.iter().all(|d| d.status.is_none()));
        assert!(!diag.has_warnings());
    }

    #[tokio::test]
    async fn deployment_without_creator_does_not_break_listing() {
        let server = MockServer::start().await;
        let mut orphan = support::deployment_json(2);
        orphan["creator"] = serde_json::Value::Null;
        Mock::given(method("GET"))
            .and(path(DEPLOYMENTS_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(vec![support::deployment_json(1), orphan]),
            )
            .mount(&server)
            .await;

        let mut diag = Diagnostics::default();
        let deployments = list_deployments(&config(&server), &ListOptions::default(), &mut diag)
            .await
            .unwrap();

        assert_eq!(deployments.ids(), ids([1, 2]));
        let logins: Vec<&str> = deployments.iter().map(|d| d.creator.login.as_str()).collect();
        assert_eq!(logins, vec!["octocat", ""]);
    }

    #[tokio::test]
    async fn passes_environment_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DEPLOYMENTS_PATH))
            .and(query_param("per_page", "5"))
            .and(query_param("environment", "staging"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let options = ListOptions {
            limit: 5,
            environment: Some("staging".to_string()),
            ..ListOptions::default()
        };
        let deployments = list_deployments(&config(&server), &options, &mut Diagnostics::default())
            .await
            .unwrap();

        assert!(deployments.is_empty());
        assert_eq!(deployments.to_string(), "No deployments");
    }

    #[tokio::test]
    async fn state_filter_keeps_matching_deployments_in_order() {
        let server = MockServer::start().await;
        mount_deployments(&server, &[1, 2, 3, 4]).await;
        mount_last_status(&server, 1, Some("success")).await;
        mount_last_status(&server, 2, Some("failure")).await;
        mount_last_status(&server, 3, None).await;
        mount_last_status(&server, 4, Some("success")).await;

        let options = ListOptions {
            state: Some(DeploymentState::Success),
            ..ListOptions::default()
        };
        let mut diag = Diagnostics::default();
        let deployments = list_deployments(&config(&server), &options, &mut diag)
            .await
            .unwrap();

        assert_eq!(deployments.ids(), ids([1, 4]));
        assert!(deployments.iter().all(|d| d.state() == Some(DeploymentState::Success)));
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].kind, WarningKind::MissingStatus);
    }

    #[tokio::test]
    async fn include_statuses_attaches_last_status() {
        let server = MockServer::start().await;
        mount_deployments(&server, &[5, 6]).await;
        mount_last_status(&server, 5, Some("inactive")).await;
        mount_last_status(&server, 6, None).await;

        let options = ListOptions {
            include_statuses: true,
            ..ListOptions::default()
        };
        let deployments = list_deployments(&config(&server), &options, &mut Diagnostics::default())
            .await
            .unwrap();

        let states: Vec<_> = deployments.iter().map(|d| d.state()).collect();
        assert_eq!(states, vec![Some(DeploymentState::Inactive), None]);
        assert!(deployments.to_string().starts_with("5 - inactive - main (01234567)"));
    }

    #[tokio::test]
    async fn status_lookup_failure_reports_failing_deployment() {
        let server = MockServer::start().await;
        mount_deployments(&server, &[1, 2, 3]).await;
        mount_last_status(&server, 1, Some("success")).await;
        mount_last_status(&server, 3, Some("success")).await;
        Mock::given(method("GET"))
            .and(path(statuses_path(2)))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .expect(1)
            .mount(&server)
            .await;

        let options = ListOptions {
            include_statuses: true,
            ..ListOptions::default()
        };
        let err = list_deployments(&config(&server), &options, &mut Diagnostics::default())
            .await
            .unwrap_err();

        let batch = match err {
            Error::Batch(batch) => batch,
            other => panic!("expected batch error, got {other:?}"),
        };
        assert_eq!(batch.total(), 3);
        assert_eq!(batch.failed(), 1);
        assert_eq!(batch.failures()[0].id, DeploymentId::new(2));
        assert_eq!(batch.failures()[0].error.status(), Some(500));
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn posts_new_state_to_every_id() {
        let server = MockServer::start().await;
        for id in [3, 4, 5] {
            Mock::given(method("POST"))
                .and(path(statuses_path(id)))
                .and(header("accept", PREVIEW_ACCEPT_HEADER))
                .and(body_json(serde_json::json!({
                    "state": "failure",
                    "description": "rolled back"
                })))
                .respond_with(ResponseTemplate::new(201))
                .expect(1)
                .mount(&server)
                .await;
        }

        let updated = update_deployments(
            &config(&server),
            &ids([3, 4, 5]),
            Some(DeploymentState::Failure),
            "rolled back",
        )
        .await
        .unwrap();

        assert_eq!(updated, 3);
    }

    #[tokio::test]
    async fn missing_new_state_fails_before_any_request() {
        let server = MockServer::start().await;

        let err = update_deployments(&config(&server), &ids([1]), None, "")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_id_list_is_a_no_op() {
        let server = MockServer::start().await;

        let updated = update_deployments(
            &config(&server),
            &[],
            Some(DeploymentState::Success),
            "",
        )
        .await
        .unwrap();

        assert_eq!(updated, 0);
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

mod update_by_state {
    use super::*;

    #[tokio::test]
    async fn updates_matching_deployments_except_excluded_one() {
        let server = MockServer::start().await;
        mount_deployments(&server, &[10, 11, 12, 13]).await;
        mount_last_status(&server, 10, Some("success")).await;
        mount_last_status(&server, 11, Some("success")).await;
        mount_last_status(&server, 12, Some("failure")).await;
        mount_last_status(&server, 13, Some("success")).await;

        for (id, expected) in [(10, 1), (11, 0), (12, 0), (13, 1)] {
            Mock::given(method("POST"))
                .and(path(statuses_path(id)))
                .and(header("accept", PREVIEW_ACCEPT_HEADER))
                .and(body_json(serde_json::json!({
                    "state": "inactive",
                    "description": "replaced"
                })))
                .respond_with(ResponseTemplate::new(201))
                .expect(expected)
                .mount(&server)
                .await;
        }

        let options = UpdateByStateOptions {
            new_state: Some(DeploymentState::Inactive),
            description: "replaced".to_string(),
            except: Some(DeploymentId::new(11)),
            ..UpdateByStateOptions::default()
        };
        let mut diag = Diagnostics::default();
        let updated = update_by_state_deployments(&config(&server), &options, &mut diag)
            .await
            .unwrap();

        assert_eq!(updated, ids([10, 13]));
        assert!(!diag.has_warnings());
    }

    #[tokio::test]
    async fn warns_when_excluded_deployment_was_not_a_target() {
        let server = MockServer::start().await;
        mount_deployments(&server, &[1, 2]).await;
        mount_last_status(&server, 1, Some("success")).await;
        mount_last_status(&server, 2, Some("error")).await;
        Mock::given(method("POST"))
            .and(path(statuses_path(1)))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let options = UpdateByStateOptions {
            new_state: Some(DeploymentState::Inactive),
            except: Some(DeploymentId::new(2)),
            ..UpdateByStateOptions::default()
        };
        let mut diag = Diagnostics::default();
        let updated = update_by_state_deployments(&config(&server), &options, &mut diag)
            .await
            .unwrap();

        assert_eq!(updated, ids([1]));
        assert_eq!(diag.warnings()[0].kind, WarningKind::ExceptNotTargeted);
    }

    #[tokio::test]
    async fn missing_new_state_fails_before_listing() {
        let server = MockServer::start().await;

        let err = update_by_state_deployments(
            &config(&server),
            &UpdateByStateOptions::default(),
            &mut Diagnostics::default(),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("missing new state"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

mod deactivate {
    use super::*;

    #[tokio::test]
    async fn every_fifth_failure_still_attempts_all_deployments() {
        support::init_tracing();
        let server = MockServer::start().await;
        for id in 1..=50u64 {
            let status = if id % 5 == 0 { 500 } else { 201 };
            Mock::given(method("POST"))
                .and(path(statuses_path(id)))
                .and(body_json(serde_json::json!({
                    "state": "inactive",
                    "description": ""
                })))
                .respond_with(ResponseTemplate::new(status).set_body_string("server error"))
                .expect(1)
                .mount(&server)
                .await;
        }

        let config = config(&server).concurrency(NonZeroUsize::new(8).unwrap());
        let err = deactivate_deployments(&config, &ids(1..=50), "")
            .await
            .unwrap_err();

        let batch = match err {
            Error::Batch(batch) => batch,
            other => panic!("expected batch error, got {other:?}"),
        };
        assert_eq!(batch.total(), 50);
        assert_eq!(batch.failed(), 10);
        assert_eq!(batch.succeeded(), 40);
        let failed: Vec<u64> = batch.failures().iter().map(|f| f.id.get()).collect();
        assert_eq!(failed, vec![5, 10, 15, 20, 25, 30, 35, 40, 45, 50]);
        assert!(
            batch
                .to_string()
                .starts_with("10 of 50 operations failed: [5] client: GitHub api error - status 500")
        );
        assert_eq!(server.received_requests().await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn deactivates_with_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(statuses_path(9)))
            .and(header("accept", PREVIEW_ACCEPT_HEADER))
            .and(body_json(serde_json::json!({
                "state": "inactive",
                "description": "cleanup"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let count = deactivate_deployments(&config(&server), &ids([9]), "cleanup")
            .await
            .unwrap();

        assert_eq!(count, 1);
    }
}
