// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands, their arguments, and environment fallbacks.

use clap::{Args, Parser, Subcommand};
use github_deployments::client::DEFAULT_BASE_URL;
use github_deployments::commands::DEFAULT_LIMIT;
use github_deployments::config::{API_URL_ENV, REPOSITORY_ENV, TOKEN_ENV};
use github_deployments::output::OutputMode;
use github_deployments::types::{DeploymentId, DeploymentState};
use std::num::NonZeroUsize;

#[derive(Parser)]
#[command(name = "github-deployments")]
#[command(about = "Manage GitHub deployments for a repository")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Repository to manage, as owner/name
    #[arg(long, env = REPOSITORY_ENV, global = true)]
    pub repository: Option<String>,

    /// GitHub access token
    #[arg(long, env = TOKEN_ENV, hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// GitHub API root
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_BASE_URL, global = true)]
    pub api_url: String,

    /// Timeout for each request, in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..), global = true)]
    pub timeout: u64,

    /// Maximum number of requests in flight at once
    #[arg(long, default_value = "16", global = true)]
    pub concurrency: NonZeroUsize,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print results as JSON lines
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalArgs {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List deployments, newest first
    List {
        /// How many deployments to list
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,

        /// Filter by environment
        #[arg(long)]
        environment: Option<String>,

        /// Filter by the state of the last status
        #[arg(long)]
        state: Option<DeploymentState>,

        /// Also fetch and show the last status of each deployment
        #[arg(long)]
        statuses: bool,
    },

    /// Post a new status to the given deployments
    Update {
        /// Deployment IDs
        ids: Vec<DeploymentId>,

        /// New state for the deployments
        #[arg(long, alias = "newState")]
        new_state: Option<DeploymentState>,

        /// Description for the status
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Post a new status to every deployment whose last status has a given state
    #[command(alias = "updateByState")]
    UpdateByState {
        /// State the last status must have
        #[arg(long, default_value_t = DeploymentState::Success)]
        state: DeploymentState,

        /// New state for the deployments
        #[arg(long, alias = "newState")]
        new_state: Option<DeploymentState>,

        /// Description for the status
        #[arg(long, default_value = "")]
        description: String,

        /// Don't touch this deployment
        #[arg(long)]
        except: Option<DeploymentId>,

        /// How many deployments to consider
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,

        /// Only consider this environment
        #[arg(long)]
        environment: Option<String>,
    },

    /// Mark the given deployments inactive
    Deactivate {
        /// Deployment IDs
        ids: Vec<DeploymentId>,

        /// Description for the inactive status
        #[arg(long, default_value = "")]
        description: String,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::List { .. } => "list",
            Commands::Update { .. } => "update",
            Commands::UpdateByState { .. } => "update-by-state",
            Commands::Deactivate { .. } => "deactivate",
        }
    }
}
