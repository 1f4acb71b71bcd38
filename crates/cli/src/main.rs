mod config;
mod error;
mod prompt;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use consent::{AuthorizationStatus, Authorizer, DataTracker, FixedAuthorizer};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::{AuthorizerConfig, AuthorizerKind, Config};
use error::Result;
use prompt::TerminalAuthorizer;

const CONFIG_FILE: &str = "consent.toml";
const EXIT_ERROR: i32 = 1;
const EXIT_NOT_AUTHORIZED: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "consent")]
#[command(about = "Check whether the user allows tracking", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./consent.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the current platform status
    #[arg(short, long, global = true)]
    status: Option<AuthorizationStatus>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the current authorization status without prompting
    Status,
    /// Decide whether tracking is authorized, prompting if undetermined
    Check {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct CheckReport {
    status: AuthorizationStatus,
    authorized: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = usage_exit_code(&e);
            let _ = e.print();
            std::process::exit(code);
        }
    };

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(EXIT_ERROR);
        }
    }
}

/// Exit code for a rejected command line. `--help` and `--version` keep
/// clap's success code; real usage errors share the error code so they
/// never read as "not authorized".
fn usage_exit_code(e: &clap::Error) -> i32 {
    if e.use_stderr() { EXIT_ERROR } else { e.exit_code() }
}

async fn run(cli: Cli) -> Result<i32> {
    let config = load_config(cli.config.as_deref())?;
    let (command, settings) = resolve(cli, config);
    debug!(kind = ?settings.kind, status = %settings.status, "building authorizer");

    match settings.kind {
        AuthorizerKind::Fixed => {
            let mut authorizer = FixedAuthorizer::new(settings.status);
            if let Some(response) = settings.response {
                authorizer = authorizer.with_response(response);
            }
            execute(command, authorizer).await
        }
        AuthorizerKind::Prompt => execute(command, TerminalAuthorizer::new(settings.status)).await,
    }
}

/// Merge command-line overrides into the loaded config and pick the command.
fn resolve(cli: Cli, config: Config) -> (Commands, AuthorizerConfig) {
    let mut settings = config.authorizer;
    if let Some(status) = cli.status {
        settings.status = status;
    }
    let command = cli.command.unwrap_or(Commands::Check { json: false });
    (command, settings)
}

async fn execute<A: Authorizer>(command: Commands, authorizer: A) -> Result<i32> {
    match command {
        Commands::Status => {
            println!("{}", authorizer.status());
            Ok(0)
        }
        Commands::Check { json } => cmd_check(DataTracker::new(authorizer), json).await,
    }
}

async fn cmd_check<A: Authorizer>(tracker: DataTracker<A>, json: bool) -> Result<i32> {
    let authorized = tracker.is_user_authorized().await;
    let report = CheckReport {
        status: tracker.authorizer().status(),
        authorized,
    };

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else if report.authorized {
        println!("authorized");
    } else {
        println!("not authorized ({})", report.status);
    }

    Ok(if report.authorized { 0 } else { EXIT_NOT_AUTHORIZED })
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None if Path::new(CONFIG_FILE).exists() => Ok(Config::load(CONFIG_FILE)?),
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consent::testing::SpyAuthorizer;

    #[test]
    fn test_report_json_shape() {
        let report = CheckReport {
            status: AuthorizationStatus::Denied,
            authorized: false,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "status": "denied", "authorized": false })
        );
    }

    #[test]
    fn test_cli_parses_status_override() {
        let cli = Cli::parse_from(["consent", "--status", "restricted", "check", "--json"]);
        assert_eq!(cli.status, Some(AuthorizationStatus::Restricted));
        assert!(matches!(cli.command, Some(Commands::Check { json: true })));
    }

    #[tokio::test]
    async fn test_check_exit_codes() {
        let granted = FixedAuthorizer::new(AuthorizationStatus::NotDetermined)
            .with_response(AuthorizationStatus::Authorized);
        assert_eq!(cmd_check(DataTracker::new(granted), true).await.unwrap(), 0);

        let denied = FixedAuthorizer::new(AuthorizationStatus::Denied);
        assert_eq!(
            cmd_check(DataTracker::new(denied), false).await.unwrap(),
            EXIT_NOT_AUTHORIZED
        );
    }

    #[test]
    fn test_usage_error_is_not_confused_with_not_authorized() {
        let err = Cli::try_parse_from(["consent", "--status", "granted", "check"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), EXIT_ERROR);
        assert_ne!(usage_exit_code(&err), EXIT_NOT_AUTHORIZED);

        let help = Cli::try_parse_from(["consent", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&help), 0);
    }

    #[test]
    fn test_status_flag_overrides_config() {
        let config = Config::parse(
            r#"
[authorizer]
kind = "fixed"
status = "denied"
"#,
        )
        .unwrap();
        let cli = Cli::parse_from(["consent", "--status", "authorized", "status"]);

        let (command, settings) = resolve(cli, config);
        assert!(matches!(command, Commands::Status));
        assert_eq!(settings.kind, AuthorizerKind::Fixed);
        assert_eq!(settings.status, AuthorizationStatus::Authorized);
    }

    #[test]
    fn test_config_status_used_without_override() {
        let config = Config::parse("[authorizer]\nstatus = \"restricted\"\n").unwrap();
        let (command, settings) = resolve(Cli::parse_from(["consent"]), config);
        assert!(matches!(command, Commands::Check { json: false }));
        assert_eq!(settings.status, AuthorizationStatus::Restricted);
    }

    #[tokio::test]
    async fn test_status_command_never_prompts() {
        let spy = SpyAuthorizer::new(AuthorizationStatus::NotDetermined);

        assert_eq!(execute(Commands::Status, &spy).await.unwrap(), 0);
        assert_eq!(spy.request_count(), 0);
        assert_eq!(spy.status_reads(), 1);
    }

    #[test]
    fn test_explicit_missing_config_fails() {
        assert!(load_config(Some(Path::new("/nonexistent/consent.toml"))).is_err());
    }
}
