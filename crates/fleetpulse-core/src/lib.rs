//! fleetpulse Core Library
//!
//! Shared functionality for the fleetpulse KPI tooling:
//! - Deterministic KPI insight engine (severity, trend, contributors, actions)
//! - KPI type catalogue and route-parameter parsing
//! - Normalization of raw backend KPI payloads into engine input
//! - Breakdown period presets and date-range resolution
//! - Metric catalog configuration (labels and contributor keys)

pub mod breakdown;
pub mod catalog;
pub mod error;
pub mod insights;
pub mod kpi;
pub mod period;

pub use breakdown::{AiAnalysisMetric, KpiBreakdown, SelectedMetric, TrendRow};
pub use catalog::{Catalog, MetricEntry};
pub use error::{Error, Result};
pub use insights::{
    build_deterministic_insight, metric_direction, metric_family, ContributorMetric,
    DeterministicInsight, InsightInput, MetricDirection, MetricFamily, RecommendedAction,
    Severity, TrendSignal,
};
pub use kpi::{format_kpi_type, parse_metric_type_param, KpiType};
pub use period::{resolve_date_range, BreakdownPeriod, DateRange};
