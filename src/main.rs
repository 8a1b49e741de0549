use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use fetch_events_core::FetchError;
use fetch_events_core::command::resolve_program;
use fetch_events_core::config::FetchConfig;
use fetch_events_core::fetcher::ToolFetcher;
use fetch_events_core::orchestrator::{self, Invocation};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fetch_events")]
#[command(about = "Fetch calendar events for a personal and a work account (plus extra calendars) in parallel")]
struct Cli {
    /// Calendar CLI to run (default: gog, or `tool` in the config file)
    #[arg(long)]
    tool: Option<String>,

    /// Maximum number of events per calendar (default: 50)
    #[arg(long)]
    max: Option<u32>,

    /// <personal_account> <work_account> <from> <to> [extra_calendar_ids...]
    ///
    /// `from`/`to` are YYYY-MM-DD or RFC3339 and are passed through as-is.
    /// Extra calendars use the form `account:calendarId`, where `personal`
    /// and `work` refer to the two accounts above.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let invocation = match Invocation::from_args(&cli.args) {
        Ok(invocation) => invocation,
        Err(FetchError::Usage(usage)) => {
            eprintln!("{usage}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let config = FetchConfig::load_or_default().with_overrides(cli.tool, cli.max);
    tracing::debug!(tool = %config.tool, max_results = config.max_results, "configuration loaded");

    let fetcher = Arc::new(ToolFetcher::new(resolve_program(&config), config.max_results));

    orchestrator::run(&invocation, fetcher, &mut io::stdout().lock(), &mut io::stderr())
        .await
        .context("Failed to write results")?;

    Ok(())
}

/// Log records go to stderr; stdout carries only section output.
fn init_logging() {
    let filter = EnvFilter::try_from_env("FETCH_EVENTS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
