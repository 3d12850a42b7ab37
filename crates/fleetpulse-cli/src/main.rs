//! fleetpulse CLI - KPI insight tooling
//!
//! Usage:
//!   fleetpulse insight --input FILE              Explain one metric
//!   fleetpulse breakdown --kpi OTD_RING_1 ...    Break down a KPI from backend payloads
//!   fleetpulse metrics                           List KPI types

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Insight { input, json } => commands::cmd_insight(&input, json),
        Commands::Breakdown {
            kpi,
            metrics,
            history,
            period,
            from,
            to,
            json,
        } => {
            let catalog = commands::load_catalog(cli.catalog.as_deref())?;
            commands::cmd_breakdown(
                &catalog,
                &commands::BreakdownArgs {
                    kpi: &kpi,
                    metrics: &metrics,
                    history: &history,
                    period: &period,
                    from: from.as_deref(),
                    to: to.as_deref(),
                },
                json,
            )
        }
        Commands::Metrics => {
            let catalog = commands::load_catalog(cli.catalog.as_deref())?;
            commands::cmd_metrics(&catalog)
        }
    }
}
