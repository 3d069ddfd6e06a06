//! Caw CLI binary entrypoint.
//!
//! This is the main entry point for the `caw` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use caw_cli::CliError;
use caw_cli::cli::Cli;
use caw_cli::client::CawClient;
use caw_cli::commands::Action;
use caw_cli::config::ClientConfig;
use caw_cli::output::OutputFormat;
use caw_cli::transport::FazConnection;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClientConfig::from_cli(&cli)?;
    let action = Action::plan(&cli.command, cli.user.as_deref())?;
    let format = OutputFormat::new(cli.format);

    let connection =
        FazConnection::connect_with_timeout(&config.faz_url, config.connect_timeout).await?;
    debug!(url = %config.faz_url, "Session opened");

    let mut client = CawClient::with_deadline(connection, config.call_deadline);
    let result = {
        let mut stdout = io::stdout().lock();
        action.execute(&mut client, &mut stdout, &format).await
    };

    if let Err(e) = client.into_inner().close().await {
        warn!(error = %e, "Failed to close the Faz session");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use caw_cli::cli::{Commands, Format};

    #[test]
    fn cli_parses_register() {
        let cli = Cli::parse_from(["caw", "register", "alice"]);
        assert_eq!(
            cli.command,
            Commands::Register {
                username: "alice".into()
            }
        );
    }

    #[test]
    fn cli_respects_format_flag() {
        let cli = Cli::parse_from(["caw", "--format", "json", "hook-all"]);
        assert_eq!(cli.format, Format::Json);
    }

    #[tokio::test]
    async fn run_profile_without_user_fails_before_connecting() {
        // Port 1 is never listening; reaching the connection would give a different error.
        let mut cli = Cli::try_parse_from(["caw", "--faz", "ws://127.0.0.1:1", "profile"])
            .expect("valid arguments");
        cli.user = None;
        let result = run(cli).await;
        assert!(matches!(result, Err(CliError::NotLoggedIn(_))));
    }

    #[tokio::test]
    async fn run_with_no_service_fails() {
        let cli = Cli::parse_from(["caw", "--faz", "ws://127.0.0.1:1", "read", "p1"]);
        let result = run(cli).await;
        assert!(matches!(result, Err(CliError::Connection(_) | CliError::Timeout(_))));
    }

    #[tokio::test]
    async fn run_with_invalid_url_fails() {
        let cli = Cli::parse_from(["caw", "--faz", "http://invalid", "hook-all"]);
        let result = run(cli).await;
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
