//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `insight` - Single-metric insight from an insight input file
//! - `breakdown` - KPI breakdown from raw backend responses
//! - `metrics` - KPI type listing

pub mod breakdown;
pub mod insight;
pub mod metrics;

// Re-export command functions for main.rs
pub use breakdown::*;
pub use insight::*;
pub use metrics::*;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use fleetpulse_core::Catalog;

/// Load the metric catalog from an explicit path or the default location
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let catalog = match path {
        Some(path) => Catalog::with_path(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => Catalog::load().context("Failed to load catalog")?,
    };
    Ok(catalog)
}

/// Read and parse a JSON file, `-` reads stdin
pub fn read_json(path: &Path) -> Result<serde_json::Value> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
