use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::info;

use csr_engine::api::{AppState, create_router};
use csr_engine::calculation::compute_score;
use csr_engine::config::ConfigLoader;
use csr_engine::error::EngineError;
use csr_engine::models::{ComplianceSnapshot, Viewer, ViewerRole};
use csr_engine::telemetry::{self, TelemetryError};
use csr_engine::visibility::project_for_viewer;

#[derive(Parser, Debug)]
#[command(
    name = "csr-engine",
    about = "Compute and serve Company Safety Ratings for rope access companies",
    version
)]
struct Cli {
    /// Directory holding rating.yaml, categories.yaml and tiers.yaml
    #[arg(long, env = "CSR_CONFIG_DIR", default_value = "./config/csr", global = true)]
    config_dir: PathBuf,
    /// Log level or filter directive; RUST_LOG takes precedence
    #[arg(long, env = "CSR_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,
    // server flags used when no subcommand is given
    #[command(flatten)]
    serve: ServeArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a snapshot file and print the viewer's projection as JSON
    Score(ScoreArgs),
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "CSR_HOST", default_value = "127.0.0.1")]
    host: String,
    /// Port to bind
    #[arg(long, env = "CSR_PORT", default_value_t = 8080)]
    port: u16,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Path to a JSON compliance snapshot
    #[arg(long)]
    snapshot: PathBuf,
    /// Viewer role (owner, technician, property_manager, ...)
    #[arg(long, default_value = "owner", value_parser = parse_role)]
    role: ViewerRole,
    /// Companies the viewer manages (property managers only)
    #[arg(long, value_delimiter = ',')]
    managed: Vec<String>,
    /// Override the snapshot's evaluation date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level)?;

    let config = ConfigLoader::load(&cli.config_dir)?;

    match cli.into_command() {
        Command::Serve(args) => run_server(config, args).await,
        Command::Score(args) => run_score(&config, args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_role(raw: &str) -> Result<ViewerRole, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string()))
        .map_err(|_| format!("unknown viewer role '{raw}'"))
}

async fn run_server(config: ConfigLoader, args: ServeArgs) -> Result<(), CliError> {
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "CSR engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_score(config: &ConfigLoader, args: ScoreArgs) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(&args.snapshot)?;
    let mut snapshot: ComplianceSnapshot = serde_json::from_str(&raw)?;
    if let Some(as_of) = args.as_of {
        snapshot.as_of = as_of;
    }

    let mut viewer = Viewer::new(args.role);
    viewer.managed_companies = args.managed.into_iter().collect();

    let result = compute_score(&snapshot, config.config())?;
    let view = project_for_viewer(&result, &viewer)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(args).expect("arguments parse").into_command()
    }

    #[test]
    fn server_flags_apply_without_subcommand() {
        match parse(&["csr-engine", "--port", "9000", "--host", "0.0.0.0"]) {
            Command::Serve(args) => {
                assert_eq!(args.port, 9000);
                assert_eq!(args.host, "0.0.0.0");
            }
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn serve_subcommand_takes_its_own_flags() {
        match parse(&["csr-engine", "serve", "--port", "9001"]) {
            Command::Serve(args) => assert_eq!(args.port, 9001),
            other => panic!("expected serve, got {:?}", other),
        }
    }

    #[test]
    fn score_subcommand_parses_viewer() {
        match parse(&[
            "csr-engine",
            "score",
            "--snapshot",
            "acme.json",
            "--role",
            "property_manager",
            "--managed",
            "acme_rope,other_co",
            "--as-of",
            "2026-01-15",
        ]) {
            Command::Score(args) => {
                assert_eq!(args.role, ViewerRole::PropertyManager);
                assert_eq!(args.managed, vec!["acme_rope", "other_co"]);
                assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2026, 1, 15));
            }
            other => panic!("expected score, got {:?}", other),
        }
    }
}
