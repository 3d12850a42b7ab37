//! KPI breakdown assembly
//!
//! Normalizes raw backend payloads into insight engine input. The backend
//! is loose about types and field names: numbers arrive as JSON numbers or
//! numeric strings, and a metric's value may live under `actual`,
//! `metricValue`, `value` or `score`. Everything is reduced to
//! `Option<f64>` here so the engine never sees garbage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::Catalog;
use crate::insights::{
    build_deterministic_insight, ContributorMetric, DeterministicInsight, InsightInput,
};
use crate::kpi::{format_kpi_type, KpiType};
use crate::period::DateRange;

const METRIC_VALUE_FIELDS: &[&str] = &["actual", "metricValue", "value", "score"];
const HISTORY_VALUE_FIELDS: &[&str] = &["metricValue", "actual", "value", "score"];
const HISTORY_LABEL_FIELDS: &[&str] = &[
    "calculationWindowStart",
    "period",
    "date",
    "startDate",
    "windowStart",
];

/// The KPI being broken down, as read from the aggregated payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedMetric {
    pub key: String,
    pub title: String,
    pub actual: Option<f64>,
    pub expected: Option<f64>,
    pub variance: Option<f64>,
    pub unit: String,
    pub description: String,
    pub formula: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rankings: Option<Map<String, Value>>,
}

/// One point of the KPI history chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRow {
    pub label: String,
    /// Raw value, or 0 when the point had none
    pub value: f64,
    pub raw_value: Option<f64>,
}

/// Metric record handed to AI analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysisMetric {
    pub name: String,
    pub description: String,
    pub actual: f64,
    pub expected: f64,
    pub variance: f64,
    pub unit: String,
}

/// Everything the breakdown view needs for one KPI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiBreakdown {
    pub kpi_type: KpiType,
    pub range: DateRange,
    pub selected_metric: Option<SelectedMetric>,
    pub contributors: Vec<ContributorMetric>,
    pub trend_rows: Vec<TrendRow>,
    pub insight: Option<DeterministicInsight>,
    pub ai_analysis_metric: Option<AiAnalysisMetric>,
}

/// Normalize a loosely typed JSON value to a finite number.
///
/// Numbers pass through when finite; non-blank strings are trimmed and
/// parsed. Everything else is `None`.
pub fn to_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) if !s.trim().is_empty() => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite()),
        _ => None,
    }
}

/// First field that is present and not null, mirroring a `??` chain
fn first_present<'a>(object: &'a Map<String, Value>, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|field| object.get(*field))
        .find(|v| !v.is_null())
}

/// JSON truthiness: null, false, 0, and "" are all absent
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn string_field(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(Value::as_str).map(str::to_string)
}

pub fn metric_value(metric: &Value) -> Option<f64> {
    match metric.as_object() {
        Some(object) => first_present(object, METRIC_VALUE_FIELDS).and_then(to_numeric),
        None => to_numeric(metric),
    }
}

pub fn expected_value(metric: &Value) -> Option<f64> {
    metric.as_object()?.get("expected").and_then(to_numeric)
}

pub fn variance_value(metric: &Value) -> Option<f64> {
    metric.as_object()?.get("variance").and_then(to_numeric)
}

fn metric_label(catalog: &Catalog, key: &str) -> String {
    catalog
        .label(key)
        .map(str::to_string)
        .unwrap_or_else(|| format_kpi_type(key))
}

/// The `result.kpiMetrics` object of an aggregated metrics response
fn kpi_metrics(aggregated: &Value) -> Option<&Map<String, Value>> {
    aggregated.get("result")?.get("kpiMetrics")?.as_object()
}

/// Read the selected KPI out of an aggregated metrics response
pub fn selected_metric(
    kpi: KpiType,
    catalog: &Catalog,
    aggregated: &Value,
) -> Option<SelectedMetric> {
    let key = kpi.aggregated_key();
    let raw = kpi_metrics(aggregated)?.get(key).filter(|v| is_truthy(v))?;

    Some(SelectedMetric {
        key: key.to_string(),
        title: metric_label(catalog, key),
        actual: metric_value(raw),
        expected: expected_value(raw),
        variance: variance_value(raw),
        unit: string_field(raw, "unitOfMeasurement").unwrap_or_default(),
        description: string_field(raw, "kpiDescription").unwrap_or_default(),
        formula: string_field(raw, "formula").unwrap_or_default(),
        rankings: raw.get("rankings").and_then(Value::as_object).cloned(),
    })
}

/// Collect the configured contributors of a KPI that carry data
pub fn contributors(kpi: KpiType, catalog: &Catalog, aggregated: &Value) -> Vec<ContributorMetric> {
    let Some(metrics) = kpi_metrics(aggregated) else {
        return Vec::new();
    };

    catalog
        .contributors_for(kpi)
        .iter()
        .filter_map(|key| {
            let raw = metrics.get(key).filter(|v| is_truthy(v))?;
            let contributor = ContributorMetric {
                key: key.clone(),
                label: metric_label(catalog, key),
                actual: metric_value(raw),
                expected: expected_value(raw),
                variance: variance_value(raw),
                unit: string_field(raw, "unitOfMeasurement"),
                description: string_field(raw, "kpiDescription"),
            };
            contributor.has_data().then_some(contributor)
        })
        .collect()
}

fn point_label(entry: &Value, index: usize) -> String {
    let raw = entry
        .as_object()
        .and_then(|object| first_present(object, HISTORY_LABEL_FIELDS));

    match raw.and_then(Value::as_str) {
        Some(s) if !s.is_empty() => {
            // ISO dates render as MM-DD
            let chars: Vec<char> = s.chars().collect();
            if chars.len() >= 10 {
                chars[5..10].iter().collect()
            } else {
                s.to_string()
            }
        }
        _ => (index + 1).to_string(),
    }
}

/// Turn a KPI history response into chart rows.
///
/// `result` may be the array of points itself or an object carrying a
/// `history` array; anything else yields no rows.
pub fn trend_rows(history: &Value) -> Vec<TrendRow> {
    let points = match history.get("result") {
        Some(Value::Array(points)) => points.as_slice(),
        Some(result) => result
            .get("history")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        None => &[],
    };

    points
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let raw_value = entry
                .as_object()
                .and_then(|object| first_present(object, HISTORY_VALUE_FIELDS))
                .and_then(to_numeric);
            TrendRow {
                label: point_label(entry, index),
                value: raw_value.unwrap_or(0.0),
                raw_value,
            }
        })
        .collect()
}

/// Metric record for AI analysis, only when the metric has a current value
pub fn ai_analysis_metric(metric: &SelectedMetric) -> Option<AiAnalysisMetric> {
    let actual = metric.actual?;
    let expected = metric.expected.unwrap_or(0.0);

    Some(AiAnalysisMetric {
        name: metric.key.clone(),
        description: if metric.description.is_empty() {
            metric.title.clone()
        } else {
            metric.description.clone()
        },
        actual,
        expected,
        variance: metric.variance.unwrap_or(actual - expected),
        unit: metric.unit.clone(),
    })
}

impl KpiBreakdown {
    /// Assemble the breakdown for one KPI from raw aggregated and history responses
    pub fn build(
        kpi: KpiType,
        catalog: &Catalog,
        range: DateRange,
        aggregated: &Value,
        history: &Value,
    ) -> Self {
        let selected_metric = selected_metric(kpi, catalog, aggregated);
        let contributors = contributors(kpi, catalog, aggregated);
        let trend_rows = trend_rows(history);

        let insight = selected_metric.as_ref().map(|metric| {
            build_deterministic_insight(&InsightInput {
                metric_key: metric.key.clone(),
                metric_label: metric.title.clone(),
                actual: metric.actual,
                expected: metric.expected,
                contributors: contributors.clone(),
                trend_values: trend_rows.iter().map(|row| row.value).collect(),
            })
        });
        let ai_analysis_metric = selected_metric.as_ref().and_then(ai_analysis_metric);

        if selected_metric.is_none() {
            tracing::warn!(
                kpi = kpi.as_str(),
                key = kpi.aggregated_key(),
                "Selected metric missing from aggregated payload"
            );
        }
        tracing::debug!(
            kpi = kpi.as_str(),
            contributors = contributors.len(),
            trend_points = trend_rows.len(),
            severity = insight.as_ref().map(|i| i.severity.as_str()),
            "KPI breakdown assembled"
        );

        Self {
            kpi_type: kpi,
            range,
            selected_metric,
            contributors,
            trend_rows,
            insight,
            ai_analysis_metric,
        }
    }
}
