//! KPI listing command

use anyhow::Result;
use fleetpulse_core::insights::{metric_direction, metric_family, MetricDirection};
use fleetpulse_core::{Catalog, KpiType};

use super::truncate;

pub fn cmd_metrics(catalog: &Catalog) -> Result<()> {
    println!();
    println!("📋 KPI Types");
    if let Some(source) = catalog.source() {
        println!("   Catalog: {}", source.display());
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:26} │ {:24} │ {:5} │ {:12} │ {:>5}",
        "KPI", "Aggregated key", "Dir", "Family", "Contr"
    );
    println!("   ───────────────────────────┼──────────────────────────┼───────┼──────────────┼───────");

    for kpi in KpiType::all() {
        let key = kpi.aggregated_key();
        let arrow = match metric_direction(key) {
            MetricDirection::HigherIsBetter => "↑",
            MetricDirection::LowerIsBetter => "↓",
        };
        println!(
            "   {:26} │ {:24} │ {:5} │ {:12} │ {:>5}",
            kpi.as_str(),
            truncate(key, 24),
            arrow,
            metric_family(key).as_str(),
            catalog.contributors_for(*kpi).len()
        );
    }

    Ok(())
}
