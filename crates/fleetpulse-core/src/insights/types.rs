//! Core types for the KPI insight engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a metric improves as it goes up or as it goes down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricDirection {
    HigherIsBetter,
    LowerIsBetter,
}

impl MetricDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricDirection::HigherIsBetter => "higher_is_better",
            MetricDirection::LowerIsBetter => "lower_is_better",
        }
    }
}

impl fmt::Display for MetricDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coarse domain category of a metric, used to pick recommended actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricFamily {
    Delivery,
    Safety,
    Turnaround,
    Utilization,
    Cost,
    Productivity,
}

impl MetricFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricFamily::Delivery => "delivery",
            MetricFamily::Safety => "safety",
            MetricFamily::Turnaround => "turnaround",
            MetricFamily::Utilization => "utilization",
            MetricFamily::Cost => "cost",
            MetricFamily::Productivity => "productivity",
        }
    }

    /// Get all metric families
    pub fn all() -> &'static [MetricFamily] {
        &[
            Self::Delivery,
            Self::Safety,
            Self::Turnaround,
            Self::Utilization,
            Self::Cost,
            Self::Productivity,
        ]
    }
}

impl fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MetricFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" => Ok(MetricFamily::Delivery),
            "safety" => Ok(MetricFamily::Safety),
            "turnaround" => Ok(MetricFamily::Turnaround),
            "utilization" => Ok(MetricFamily::Utilization),
            "cost" => Ok(MetricFamily::Cost),
            "productivity" => Ok(MetricFamily::Productivity),
            _ => Err(format!("Unknown metric family: {}", s)),
        }
    }
}

/// How far a metric sits from its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Within 5% of target
    Healthy,
    /// Between 5% and 15% off target (inclusive)
    Warning,
    /// More than 15% off target
    Critical,
    /// Actual or expected value missing
    Unknown,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Healthy => "healthy",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
            Severity::Unknown => "unknown",
        }
    }

    /// Label used as the headline prefix
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Healthy => "Healthy",
            Severity::Warning => "Watch",
            Severity::Critical => "Needs Attention",
            Severity::Unknown => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "healthy" => Ok(Severity::Healthy),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            "unknown" => Ok(Severity::Unknown),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Direction of recent movement relative to the early-period baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSignal {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl TrendSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendSignal::Improving => "improving",
            TrendSignal::Declining => "declining",
            TrendSignal::Stable => "stable",
            TrendSignal::InsufficientData => "insufficient_data",
        }
    }

    /// Closing sentence of the insight summary
    pub fn sentence(&self) -> &'static str {
        match self {
            TrendSignal::Improving => "Trend is improving.",
            TrendSignal::Declining => "Trend is declining.",
            TrendSignal::Stable => "Trend is stable.",
            TrendSignal::InsufficientData => "Trend data is limited.",
        }
    }
}

impl fmt::Display for TrendSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrendSignal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "improving" => Ok(TrendSignal::Improving),
            "declining" => Ok(TrendSignal::Declining),
            "stable" => Ok(TrendSignal::Stable),
            "insufficient_data" => Ok(TrendSignal::InsufficientData),
            _ => Err(format!("Unknown trend signal: {}", s)),
        }
    }
}

/// A related metric that may explain the primary metric's movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorMetric {
    pub key: String,
    pub label: String,
    pub actual: Option<f64>,
    pub expected: Option<f64>,
    pub variance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ContributorMetric {
    /// Create a contributor with no values set
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            actual: None,
            expected: None,
            variance: None,
            unit: None,
            description: None,
        }
    }

    pub fn with_values(
        mut self,
        actual: Option<f64>,
        expected: Option<f64>,
        variance: Option<f64>,
    ) -> Self {
        self.actual = actual;
        self.expected = expected;
        self.variance = variance;
        self
    }

    /// True when the contributor carries at least one value
    pub fn has_data(&self) -> bool {
        self.actual.is_some() || self.expected.is_some() || self.variance.is_some()
    }
}

/// Everything the engine needs to explain one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightInput {
    pub metric_key: String,
    pub metric_label: String,
    pub actual: Option<f64>,
    pub expected: Option<f64>,
    #[serde(default)]
    pub contributors: Vec<ContributorMetric>,
    /// Chronological, oldest first
    #[serde(default)]
    pub trend_values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Output of the deterministic insight engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeterministicInsight {
    pub severity: Severity,
    pub trend_signal: TrendSignal,
    pub headline: String,
    pub summary: String,
    pub gap_to_target: Option<f64>,
    pub gap_ratio: Option<f64>,
    pub trend_delta_percent: Option<f64>,
    /// At most 3, strongest first
    pub top_contributors: Vec<ContributorMetric>,
    /// Always exactly 3
    pub actions: Vec<RecommendedAction>,
}
