//! Insight command implementation

use std::path::Path;

use anyhow::{Context, Result};
use fleetpulse_core::insights::{
    build_deterministic_insight, format_number, DeterministicInsight, InsightInput, Severity,
};

use super::{read_json, truncate};

/// Parse an insight input file and build the insight
pub fn run_insight(input: &Path) -> Result<DeterministicInsight> {
    let value = read_json(input)?;
    let input: InsightInput =
        serde_json::from_value(value).context("Input does not match the insight input format")?;

    tracing::debug!(
        metric = %input.metric_key,
        contributors = input.contributors.len(),
        trend_points = input.trend_values.len(),
        "Building insight"
    );

    Ok(build_deterministic_insight(&input))
}

pub fn cmd_insight(input: &Path, json: bool) -> Result<()> {
    let insight = run_insight(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&insight)?);
    } else {
        print_insight(&insight);
    }

    Ok(())
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Healthy => "🟢",
        Severity::Warning => "🟡",
        Severity::Critical => "🔴",
        Severity::Unknown => "⚪",
    }
}

/// Print an insight in human-readable form
pub fn print_insight(insight: &DeterministicInsight) {
    println!();
    println!("{} {}", severity_icon(insight.severity), insight.headline);
    println!("   {}", insight.summary);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Gap: {}  Ratio: {}  Trend: {} ({}%)",
        format_number(insight.gap_to_target),
        format_number(insight.gap_ratio),
        insight.trend_signal,
        format_number(insight.trend_delta_percent)
    );

    if !insight.top_contributors.is_empty() {
        println!();
        println!("   Top contributors:");
        println!(
            "   {:25} │ {:>10} │ {:>10} │ {:>10}",
            "Metric", "Actual", "Expected", "Variance"
        );
        println!("   ──────────────────────────┼────────────┼────────────┼───────────");
        for c in &insight.top_contributors {
            println!(
                "   {:25} │ {:>10} │ {:>10} │ {:>10}",
                truncate(&c.label, 25),
                format_number(c.actual),
                format_number(c.expected),
                format_number(c.variance)
            );
        }
    }

    println!();
    println!("   Recommended actions:");
    for (i, action) in insight.actions.iter().enumerate() {
        println!("   {}. {}", i + 1, action.title);
        println!("      \x1b[2m{}\x1b[0m", action.description);
    }
}
