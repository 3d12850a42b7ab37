//! KPI Insight Engine - Deterministic Metric Explanations
//!
//! Given a metric's actual and expected values, a handful of related
//! contributor metrics, and a short value history, the engine explains where
//! the metric stands and what to do about it. It runs synchronously, holds
//! no state, and is safe to call once per visible KPI tile.
//!
//! ## Pipeline
//!
//! - **Classification** - metric direction and family lookup tables
//! - **Severity** - gap to target bucketed by ratio (5% / 15%)
//! - **Trend** - latest value vs early-period baseline, direction-aware
//! - **Contributors** - ranked by deviation, top three kept
//! - **Actions** - three canned recommendations per family
//!
//! ## Usage
//!
//! ```rust
//! use fleetpulse_core::insights::{build_deterministic_insight, InsightInput, Severity};
//!
//! let input = InsightInput {
//!     metric_key: "otd".to_string(),
//!     metric_label: "OTD Ring 1".to_string(),
//!     actual: Some(82.0),
//!     expected: Some(90.0),
//!     contributors: vec![],
//!     trend_values: vec![88.0, 87.0, 85.0, 82.0],
//! };
//! let insight = build_deterministic_insight(&input);
//! assert_eq!(insight.severity, Severity::Warning);
//! ```

pub mod actions;
pub mod engine;
pub mod metric;
pub mod types;

pub use actions::actions_for_family;
pub use engine::{
    build_deterministic_insight, format_number, resolve_severity, resolve_trend_signal,
    top_contributors, SeverityAssessment, TrendAssessment,
};
pub use metric::{metric_direction, metric_family};
pub use types::{
    ContributorMetric, DeterministicInsight, InsightInput, MetricDirection, MetricFamily,
    RecommendedAction, Severity, TrendSignal,
};
