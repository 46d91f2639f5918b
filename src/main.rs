mod cli;
mod client;
mod commands;
mod config;
mod error;
mod output;
mod prompt;
mod state;
mod types;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ProjectCommands, VersionCommands};
use client::ApiClient;
use config::Config;
use error::Result;
use prompt::TerminalPrompter;
use state::Controller;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if verbose {
            for cause in error_causes(&e) {
                eprintln!("Caused by: {cause}");
            }
        }

        std::process::exit(1);
    }
}

fn error_causes(e: &dyn Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut source = e.source();
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "vman=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);
    output::set_json_output(cli.json);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "vman", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that talk to the API
        command => {
            let config = Config::load()?;
            let api_url = config.api_url(cli.api_url.as_deref())?;
            tracing::debug!(%api_url, "using projects endpoint");

            let client = ApiClient::new(api_url, config.accept_invalid_certs)?;
            let mut ctl = Controller::new(client, TerminalPrompter);

            match command {
                Commands::Shell => {
                    commands::shell::run(&mut ctl).await?;
                }
                Commands::Projects => {
                    commands::projects::list(&mut ctl).await?;
                }
                Commands::Project { action } => match action {
                    ProjectCommands::Show { id } => {
                        commands::projects::show(&mut ctl, &id).await?;
                    }
                    ProjectCommands::Create { name } => {
                        commands::projects::create(&mut ctl, &name).await?;
                    }
                    ProjectCommands::Delete { id, yes } => {
                        commands::projects::delete(&mut ctl, &id, yes).await?;
                    }
                },
                Commands::Version { action } => match action {
                    VersionCommands::Create { project_id, number } => {
                        commands::versions::create(&mut ctl, &project_id, number).await?;
                    }
                    VersionCommands::Tag {
                        project_id,
                        version_id,
                        stage,
                    } => {
                        commands::versions::tag(&mut ctl, &project_id, &version_id, stage).await?;
                    }
                },
                Commands::Files { version_id } => {
                    commands::files::list(&mut ctl, &version_id).await?;
                }
                Commands::Upload(args) => {
                    commands::files::upload(&mut ctl, args).await?;
                }
                Commands::Download(args) => {
                    commands::files::download(&mut ctl, args).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use error::VmError;

    #[test]
    fn test_verbose_flag_parsed_anywhere() {
        let cli = Cli::try_parse_from(["vman", "projects", "--verbose"]).unwrap();
        assert!(cli.verbose);
        let cli = Cli::try_parse_from(["vman", "-v", "files", "v1"]).unwrap();
        assert!(cli.verbose);
        let cli = Cli::try_parse_from(["vman", "projects"]).unwrap();
        assert!(!cli.verbose);
    }

    #[test]
    fn test_error_causes_chain() {
        let err = VmError::ProjectOpen {
            id: "p1".into(),
            source: Box::new(VmError::Api {
                status: 500,
                message: "boom".into(),
            }),
        };
        assert_eq!(
            error_causes(&err),
            ["API error (status 500): boom".to_string()]
        );
    }
}
