//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// fleetpulse - Explain fleet KPIs against their targets
#[derive(Parser)]
#[command(name = "fleetpulse")]
#[command(about = "Deterministic insights for fleet and logistics KPIs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Metric catalog override (labels and contributor keys)
    ///
    /// Defaults to ~/.local/share/fleetpulse/config/catalog.toml when present,
    /// otherwise the built-in catalog.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute an insight from an insight input JSON file
    Insight {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Print the insight as JSON
        #[arg(long)]
        json: bool,
    },

    /// Break down a KPI from backend aggregated-metrics and history responses
    Breakdown {
        /// KPI type (e.g. OTD_RING_1, otd-ring-1, or aggregated key like otd)
        #[arg(short, long)]
        kpi: String,

        /// Aggregated KPI metrics response (JSON)
        #[arg(short, long)]
        metrics: PathBuf,

        /// KPI history response (JSON)
        #[arg(long)]
        history: PathBuf,

        /// Period: custom, annual, last_six_months, last_three_months, monthly
        #[arg(short, long, default_value = "custom")]
        period: String,

        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Range end (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        to: Option<String>,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// List KPI types with their aggregated key, direction and family
    Metrics,
}
