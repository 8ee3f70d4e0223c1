// ABOUTME: Entry point for the github-deployments CLI application.
// ABOUTME: Parses arguments, builds the configuration, and dispatches to commands.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, GlobalArgs};
use github_deployments::commands::{self, ListOptions, UpdateByStateOptions};
use github_deployments::config::Config;
use github_deployments::error::Result;
use github_deployments::output::Output;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.global.verbose {
        EnvFilter::new("github_deployments=debug,warn")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = cli.global.output_mode();
    let command = cli.command.name();

    if let Err(e) = run(cli).await {
        Output::new(mode).error(&format!("running command \"{command}\": {e}"));
        std::process::exit(1);
    }
}

fn config(global: &GlobalArgs) -> Result<Config> {
    Ok(
        Config::new(global.repository.as_deref(), global.token.as_deref())?
            .api_url(global.api_url.as_str())
            .timeout(Duration::from_secs(global.timeout))
            .concurrency(global.concurrency),
    )
}

async fn run(cli: Cli) -> Result<()> {
    let config = config(&cli.global)?;
    let output = Output::new(cli.global.output_mode());

    match cli.command {
        Commands::List {
            limit,
            environment,
            state,
            statuses,
        } => {
            let options = ListOptions {
                limit,
                environment,
                state,
                include_statuses: statuses,
            };
            commands::list(&config, &options, output).await
        }
        Commands::Update {
            ids,
            new_state,
            description,
        } => commands::update(&config, &ids, new_state, &description, output).await,
        Commands::UpdateByState {
            state,
            new_state,
            description,
            except,
            limit,
            environment,
        } => {
            let options = UpdateByStateOptions {
                state,
                new_state,
                description,
                except,
                limit,
                environment,
            };
            commands::update_by_state(&config, &options, output).await
        }
        Commands::Deactivate { ids, description } => {
            commands::deactivate(&config, &ids, &description, output).await
        }
    }
}
