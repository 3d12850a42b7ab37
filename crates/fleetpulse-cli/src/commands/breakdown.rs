//! Breakdown command implementation

use std::path::Path;

use anyhow::Result;
use fleetpulse_core::insights::format_number;
use fleetpulse_core::{
    parse_metric_type_param, resolve_date_range, BreakdownPeriod, Catalog, KpiBreakdown,
};

use super::{print_insight, read_json};

/// Arguments for a breakdown run
pub struct BreakdownArgs<'a> {
    pub kpi: &'a str,
    pub metrics: &'a Path,
    pub history: &'a Path,
    pub period: &'a str,
    pub from: Option<&'a str>,
    pub to: Option<&'a str>,
}

/// Build a KPI breakdown from backend response files
pub fn run_breakdown(catalog: &Catalog, args: &BreakdownArgs<'_>) -> Result<KpiBreakdown> {
    let kpi = parse_metric_type_param(args.kpi).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown KPI: {}. Run `fleetpulse metrics` to list them",
            args.kpi
        )
    })?;
    let period = args
        .period
        .parse::<BreakdownPeriod>()
        .map_err(|e| anyhow::anyhow!(e))?;

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let end = args.to.unwrap_or(today.as_str());
    let start = args.from.unwrap_or(end);
    let range = resolve_date_range(period, start, end);

    let aggregated = read_json(args.metrics)?;
    let history = read_json(args.history)?;

    tracing::info!(
        kpi = kpi.as_str(),
        start = %range.start_date,
        end = %range.end_date,
        "Building KPI breakdown"
    );

    Ok(KpiBreakdown::build(kpi, catalog, range, &aggregated, &history))
}

pub fn cmd_breakdown(catalog: &Catalog, args: &BreakdownArgs<'_>, json: bool) -> Result<()> {
    let breakdown = run_breakdown(catalog, args)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!();
    println!("📊 {} Breakdown", breakdown.kpi_type.display_name());
    println!(
        "   Period: {} to {}",
        breakdown.range.start_date, breakdown.range.end_date
    );
    println!("   ─────────────────────────────────────────────────────────────");

    let Some(ref metric) = breakdown.selected_metric else {
        println!("   No data for this KPI in the aggregated metrics.");
        return Ok(());
    };

    println!(
        "   {}: {} {} (target {})",
        metric.title,
        format_number(metric.actual),
        metric.unit,
        format_number(metric.expected)
    );
    if !metric.description.is_empty() {
        println!("   \x1b[2m{}\x1b[0m", metric.description);
    }

    if !breakdown.trend_rows.is_empty() {
        println!();
        println!("   History:");
        for row in &breakdown.trend_rows {
            println!("   {:>8} │ {:>10}", row.label, format_number(row.raw_value));
        }
    }

    if let Some(ref insight) = breakdown.insight {
        print_insight(insight);
    }

    Ok(())
}
