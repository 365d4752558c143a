// src/bin/cogen.rs

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::time::FormatTime;

use cogen::cli::{Cli, Commands};
use cogen::commands::run::run_scenario;
use cogen::commands::version::print_version;

/// A timer that outputs nothing but still enables span timing calculation
struct NoTimestamp;

impl FormatTime for NoTimestamp {
    fn format_time(
        &self,
        _w: &mut tracing_subscriber::fmt::format::Writer<'_>,
    ) -> std::fmt::Result {
        Ok(())
    }
}

fn main() -> ExitCode {
    // Initialize tracing if COGEN_LOG is set
    // COGEN_LOG_STYLE: "compact" (default) or "full" (verbose with timestamps)
    if let Ok(filter) = EnvFilter::try_from_env("COGEN_LOG") {
        let style = std::env::var("COGEN_LOG_STYLE").unwrap_or_default();
        if style == "full" {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_level(true)
                .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
                .with_writer(std::io::stderr)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_level(true)
                .with_timer(NoTimestamp)
                .with_writer(std::io::stderr)
                .init();
        }
        tracing::debug!("tracing initialized");
    }

    let cli = Cli::parse();
    let config = cli.generator_config();
    tracing::debug!(stack_size = config.stack.size(), on_return = %config.on_return, "configuration");

    match &cli.command {
        Commands::Run { scenario } => run_scenario(scenario, config),
        Commands::Version => print_version(),
    }
}
