//! Deterministic insight engine
//!
//! Turns a metric's actual/expected values, its contributors, and a short
//! value history into a severity, a trend signal, ranked contributors and
//! recommended actions. Everything here is a pure function of its input:
//! no clock, no randomness, no I/O.

use super::actions::actions_for_family;
use super::metric::{metric_direction, metric_family};
use super::types::{
    ContributorMetric, DeterministicInsight, InsightInput, MetricDirection, Severity, TrendSignal,
};

/// Gap ratio below which a metric is healthy (exclusive)
pub const HEALTHY_GAP_RATIO: f64 = 0.05;

/// Gap ratio up to which a metric is a warning (inclusive)
pub const WARNING_GAP_RATIO: f64 = 0.15;

/// Trend movement, in percent, still considered stable (inclusive)
pub const STABLE_TREND_PERCENT: f64 = 3.0;

/// Number of leading history points averaged into the trend baseline
pub const BASELINE_WINDOW: usize = 3;

/// Maximum number of contributors reported
pub const MAX_TOP_CONTRIBUTORS: usize = 3;

/// Severity plus the gap it was derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityAssessment {
    pub severity: Severity,
    pub gap_to_target: Option<f64>,
    pub gap_ratio: Option<f64>,
}

/// Trend signal plus the percent movement it was derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendAssessment {
    pub trend_signal: TrendSignal,
    pub trend_delta_percent: Option<f64>,
}

/// Classify how far `actual` sits from `expected`.
///
/// The ratio is normalized by `max(|expected|, 1)` so targets at or near
/// zero don't blow up. Direction doesn't matter here: overshooting a target
/// by 20% is as critical as missing it by 20%.
pub fn resolve_severity(actual: Option<f64>, expected: Option<f64>) -> SeverityAssessment {
    let (Some(actual), Some(expected)) = (actual, expected) else {
        return SeverityAssessment {
            severity: Severity::Unknown,
            gap_to_target: None,
            gap_ratio: None,
        };
    };

    let gap_to_target = actual - expected;
    let gap_ratio = gap_to_target.abs() / expected.abs().max(1.0);

    let severity = if gap_ratio < HEALTHY_GAP_RATIO {
        Severity::Healthy
    } else if gap_ratio <= WARNING_GAP_RATIO {
        Severity::Warning
    } else {
        Severity::Critical
    };

    SeverityAssessment {
        severity,
        gap_to_target: Some(gap_to_target),
        gap_ratio: Some(gap_ratio),
    }
}

/// Compare the latest value against the average of the first few values.
///
/// The baseline is always the early-period window, not a rolling one, so a
/// long series is judged against where it started.
pub fn resolve_trend_signal(metric_key: &str, trend_values: &[f64]) -> TrendAssessment {
    let Some(&latest) = trend_values.last().filter(|_| trend_values.len() >= 2) else {
        return TrendAssessment {
            trend_signal: TrendSignal::InsufficientData,
            trend_delta_percent: None,
        };
    };

    let window = &trend_values[..BASELINE_WINDOW.min(trend_values.len())];
    let baseline = window.iter().sum::<f64>() / window.len() as f64;
    let delta_percent = (latest - baseline) / baseline.abs().max(1.0) * 100.0;

    let trend_signal = if delta_percent.abs() <= STABLE_TREND_PERCENT {
        TrendSignal::Stable
    } else {
        let improving = match metric_direction(metric_key) {
            MetricDirection::HigherIsBetter => delta_percent > 0.0,
            MetricDirection::LowerIsBetter => delta_percent < 0.0,
        };
        if improving {
            TrendSignal::Improving
        } else {
            TrendSignal::Declining
        }
    };

    TrendAssessment {
        trend_signal,
        trend_delta_percent: Some(delta_percent),
    }
}

fn contributor_score(contributor: &ContributorMetric) -> f64 {
    if let Some(variance) = contributor.variance.filter(|v| v.is_finite()) {
        return variance.abs();
    }

    match (contributor.actual, contributor.expected) {
        (Some(actual), Some(expected)) if actual.is_finite() && expected.is_finite() => {
            (actual - expected).abs()
        }
        _ => 0.0,
    }
}

/// Rank contributors by the size of their deviation and keep the top three.
///
/// Contributors with no values at all are dropped. The sort is stable, so
/// equal scores keep their input order.
pub fn top_contributors(contributors: &[ContributorMetric]) -> Vec<ContributorMetric> {
    let mut scored: Vec<(f64, &ContributorMetric)> = contributors
        .iter()
        .filter(|c| c.has_data())
        .map(|c| (contributor_score(c), c))
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored
        .into_iter()
        .take(MAX_TOP_CONTRIBUTORS)
        .map(|(_, c)| c.clone())
        .collect()
}

/// Render a value for display: `-` when missing, no decimals when whole,
/// otherwise two decimals with ties rounded away from zero.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            if v.fract() == 0.0 {
                // -0.0 would otherwise print as "-0"
                format!("{:.0}", v + 0.0)
            } else {
                // `{:.2}` alone rounds 0.125 to 0.12
                let rounded = (v.abs() * 100.0).round() / 100.0;
                format!("{:.2}", rounded.copysign(v))
            }
        }
        _ => "-".to_string(),
    }
}

fn build_summary(
    metric_label: &str,
    actual: Option<f64>,
    expected: Option<f64>,
    gap_to_target: Option<f64>,
    trend_signal: TrendSignal,
) -> String {
    let Some(actual_value) = actual else {
        return format!("{} has no current value for this date range.", metric_label);
    };

    let (Some(_), Some(gap)) = (expected, gap_to_target) else {
        return format!(
            "{} is at {} with no configured target baseline.",
            metric_label,
            format_number(Some(actual_value))
        );
    };

    let direction_word = if gap >= 0.0 { "above" } else { "below" };

    format!(
        "{} is {} {} target ({} vs {}). {}",
        metric_label,
        format_number(Some(gap.abs())),
        direction_word,
        format_number(actual),
        format_number(expected),
        trend_signal.sentence()
    )
}

/// Build the full deterministic insight for one metric.
pub fn build_deterministic_insight(input: &InsightInput) -> DeterministicInsight {
    let top_contributors = top_contributors(&input.contributors);
    let trend = resolve_trend_signal(&input.metric_key, &input.trend_values);
    let assessment = resolve_severity(input.actual, input.expected);
    let actions = actions_for_family(metric_family(&input.metric_key));
    let summary = build_summary(
        &input.metric_label,
        input.actual,
        input.expected,
        assessment.gap_to_target,
        trend.trend_signal,
    );

    DeterministicInsight {
        severity: assessment.severity,
        trend_signal: trend.trend_signal,
        headline: format!("{} {}", assessment.severity.label(), input.metric_label),
        summary,
        gap_to_target: assessment.gap_to_target,
        gap_ratio: assessment.gap_ratio,
        trend_delta_percent: trend.trend_delta_percent,
        top_contributors,
        actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(actual: Option<f64>, expected: Option<f64>, trend_values: Vec<f64>) -> InsightInput {
        InsightInput {
            metric_key: "otd".to_string(),
            metric_label: "OTD Ring 1".to_string(),
            actual,
            expected,
            contributors: vec![],
            trend_values,
        }
    }

    fn contributor(key: &str, variance: Option<f64>) -> ContributorMetric {
        ContributorMetric::new(key, key.to_uppercase()).with_values(None, None, variance)
    }

    // ========== Severity ==========

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(
            resolve_severity(Some(104.9), Some(100.0)).severity,
            Severity::Healthy
        );
        assert_eq!(
            resolve_severity(Some(105.0), Some(100.0)).severity,
            Severity::Warning
        );
        assert_eq!(
            resolve_severity(Some(115.0), Some(100.0)).severity,
            Severity::Warning
        );
        assert_eq!(
            resolve_severity(Some(115.1), Some(100.0)).severity,
            Severity::Critical
        );
    }

    #[test]
    fn test_severity_is_direction_independent() {
        assert_eq!(
            resolve_severity(Some(80.0), Some(100.0)).severity,
            Severity::Critical
        );
        assert_eq!(
            resolve_severity(Some(120.0), Some(100.0)).severity,
            Severity::Critical
        );
    }

    #[test]
    fn test_severity_null_propagation() {
        for (actual, expected) in [(None, Some(100.0)), (Some(100.0), None), (None, None)] {
            let result = resolve_severity(actual, expected);
            assert_eq!(result.severity, Severity::Unknown);
            assert_eq!(result.gap_to_target, None);
            assert_eq!(result.gap_ratio, None);
        }
    }

    #[test]
    fn test_severity_zero_expected_floors_denominator() {
        let result = resolve_severity(Some(0.1), Some(0.0));
        assert_eq!(result.gap_ratio, Some(0.1));
        assert_eq!(result.severity, Severity::Warning);

        let result = resolve_severity(Some(-2.0), Some(0.0));
        assert_eq!(result.gap_to_target, Some(-2.0));
        assert_eq!(result.gap_ratio, Some(2.0));
        assert_eq!(result.severity, Severity::Critical);
    }

    // ========== Trend ==========

    #[test]
    fn test_trend_insufficient_data() {
        for values in [vec![], vec![5.0]] {
            let result = resolve_trend_signal("otd", &values);
            assert_eq!(result.trend_signal, TrendSignal::InsufficientData);
            assert_eq!(result.trend_delta_percent, None);
        }
    }

    #[test]
    fn test_trend_stability_boundary() {
        let stable = resolve_trend_signal("otd", &[100.0, 100.0, 100.0, 103.0]);
        assert_eq!(stable.trend_signal, TrendSignal::Stable);
        assert_eq!(stable.trend_delta_percent, Some(3.0));

        let moving = resolve_trend_signal("otd", &[100.0, 100.0, 100.0, 103.01]);
        assert_eq!(moving.trend_signal, TrendSignal::Improving);
    }

    #[test]
    fn test_trend_direction_aware() {
        let lower_better_down = resolve_trend_signal("violationRate", &[100.0, 80.0]);
        assert_eq!(lower_better_down.trend_signal, TrendSignal::Improving);
        assert_eq!(lower_better_down.trend_delta_percent, Some(-20.0));

        let lower_better_up = resolve_trend_signal("violationRate", &[100.0, 120.0]);
        assert_eq!(lower_better_up.trend_signal, TrendSignal::Declining);

        let higher_better_down = resolve_trend_signal("otd", &[100.0, 80.0]);
        assert_eq!(higher_better_down.trend_signal, TrendSignal::Declining);

        let higher_better_up = resolve_trend_signal("otd", &[100.0, 120.0]);
        assert_eq!(higher_better_up.trend_signal, TrendSignal::Improving);
    }

    #[test]
    fn test_trend_baseline_uses_first_three_points_only() {
        // Baseline is (10 + 10 + 10) / 3, the later 50s are ignored
        let result = resolve_trend_signal("otd", &[10.0, 10.0, 10.0, 50.0, 50.0, 11.0]);
        assert_eq!(result.trend_delta_percent, Some(10.0));
        assert_eq!(result.trend_signal, TrendSignal::Improving);
    }

    #[test]
    fn test_trend_two_points_latest_is_in_baseline() {
        // Baseline is the mean of both points
        let result = resolve_trend_signal("otd", &[100.0, 120.0]);
        let expected = (120.0 - 110.0) / 110.0 * 100.0;
        assert!((result.trend_delta_percent.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_trend_small_baseline_floors_denominator() {
        let result = resolve_trend_signal("otd", &[0.0, 0.0, 0.0, 0.5]);
        assert_eq!(result.trend_delta_percent, Some(50.0));
    }

    // ========== Contributors ==========

    #[test]
    fn test_contributor_ranking() {
        let contributors = vec![
            contributor("a", Some(2.0)),
            contributor("b", Some(-5.0)),
            contributor("empty", None),
            contributor("d", Some(3.0)),
            ContributorMetric::new("e", "E").with_values(Some(5.0), Some(4.0), None),
        ];

        let top = top_contributors(&contributors);
        let keys: Vec<&str> = top.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "d", "a"]);
    }

    #[test]
    fn test_contributor_all_null_excluded() {
        let contributors = vec![
            contributor("empty", None),
            ContributorMetric::new("e", "E").with_values(Some(5.0), Some(4.0), None),
        ];

        let top = top_contributors(&contributors);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].key, "e");
    }

    #[test]
    fn test_contributor_ties_keep_input_order() {
        let contributors = vec![
            contributor("first", Some(1.0)),
            contributor("second", Some(-1.0)),
            contributor("third", Some(1.0)),
        ];

        let top = top_contributors(&contributors);
        let keys: Vec<&str> = top.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_contributor_score_fallbacks() {
        // Non-finite variance falls back to actual - expected
        let c = ContributorMetric::new("x", "X").with_values(Some(10.0), Some(4.0), Some(f64::NAN));
        assert_eq!(contributor_score(&c), 6.0);

        // Only one side present scores zero but is still kept
        let c = ContributorMetric::new("y", "Y").with_values(Some(10.0), None, None);
        assert_eq!(contributor_score(&c), 0.0);
        assert_eq!(top_contributors(&[c]).len(), 1);
    }

    // ========== Text ==========

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(None), "-");
        assert_eq!(format_number(Some(f64::INFINITY)), "-");
        assert_eq!(format_number(Some(82.0)), "82");
        assert_eq!(format_number(Some(-8.0)), "-8");
        assert_eq!(format_number(Some(-0.0)), "0");
        assert_eq!(format_number(Some(86.6666)), "86.67");
        assert_eq!(format_number(Some(0.5)), "0.50");
    }

    #[test]
    fn test_format_number_rounds_ties_away_from_zero() {
        assert_eq!(format_number(Some(0.125)), "0.13");
        assert_eq!(format_number(Some(1.125)), "1.13");
        assert_eq!(format_number(Some(82.125)), "82.13");
        assert_eq!(format_number(Some(-2.625)), "-2.63");
        assert_eq!(format_number(Some(1.999)), "2.00");
    }

    #[test]
    fn test_summary_without_actual() {
        let insight = build_deterministic_insight(&input(None, Some(90.0), vec![]));
        assert_eq!(
            insight.summary,
            "OTD Ring 1 has no current value for this date range."
        );
        assert_eq!(insight.headline, "Info OTD Ring 1");
    }

    #[test]
    fn test_summary_without_target() {
        let insight = build_deterministic_insight(&input(Some(82.5), None, vec![]));
        assert_eq!(
            insight.summary,
            "OTD Ring 1 is at 82.50 with no configured target baseline."
        );
    }

    #[test]
    fn test_summary_above_target_and_limited_trend() {
        let insight = build_deterministic_insight(&input(Some(92.0), Some(90.0), vec![92.0]));
        assert_eq!(
            insight.summary,
            "OTD Ring 1 is 2 above target (92 vs 90). Trend data is limited."
        );
        assert_eq!(insight.headline, "Healthy OTD Ring 1");
    }

    #[test]
    fn test_summary_rounds_half_hundredths_up() {
        let insight = build_deterministic_insight(&input(Some(90.125), Some(90.0), vec![]));
        assert_eq!(
            insight.summary,
            "OTD Ring 1 is 0.13 above target (90.13 vs 90). Trend data is limited."
        );
    }

    #[test]
    fn test_summary_on_target_reads_above() {
        let insight = build_deterministic_insight(&input(Some(90.0), Some(90.0), vec![90.0, 90.0]));
        assert_eq!(
            insight.summary,
            "OTD Ring 1 is 0 above target (90 vs 90). Trend is stable."
        );
    }

    #[test]
    fn test_headline_labels() {
        let critical = build_deterministic_insight(&input(Some(50.0), Some(90.0), vec![]));
        assert_eq!(critical.headline, "Needs Attention OTD Ring 1");

        let warning = build_deterministic_insight(&input(Some(82.0), Some(90.0), vec![]));
        assert_eq!(warning.headline, "Watch OTD Ring 1");
    }

    // ========== End to end ==========

    #[test]
    fn test_otd_scenario() {
        let input = InsightInput {
            metric_key: "otd".to_string(),
            metric_label: "OTD Ring 1".to_string(),
            actual: Some(82.0),
            expected: Some(90.0),
            contributors: vec![ContributorMetric::new("gigo", "Gate In/Out").with_values(
                Some(10.0),
                Some(8.0),
                Some(2.0),
            )],
            trend_values: vec![88.0, 87.0, 85.0, 82.0],
        };

        let insight = build_deterministic_insight(&input);

        assert_eq!(insight.severity, Severity::Warning);
        assert_eq!(insight.gap_to_target, Some(-8.0));
        assert!((insight.gap_ratio.unwrap() - 8.0 / 90.0).abs() < 1e-12);
        assert_eq!(insight.trend_signal, TrendSignal::Declining);
        let delta = insight.trend_delta_percent.unwrap();
        assert!((delta - (-5.384615384615)).abs() < 1e-6);
        assert_eq!(
            insight.summary,
            "OTD Ring 1 is 8 below target (82 vs 90). Trend is declining."
        );
        assert_eq!(insight.headline, "Watch OTD Ring 1");
        assert_eq!(insight.top_contributors.len(), 1);
        assert_eq!(insight.top_contributors[0].key, "gigo");
        let ids: Vec<&str> = insight.actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["delivery-1", "delivery-2", "delivery-3"]);
        assert_eq!(insight.actions[0].title, "Action 1");
    }

    #[test]
    fn test_actions_follow_metric_family() {
        let mut safety = input(Some(1.0), Some(1.0), vec![]);
        safety.metric_key = "violationRate".to_string();
        let insight = build_deterministic_insight(&safety);
        assert_eq!(insight.actions.len(), 3);
        assert!(insight.actions.iter().all(|a| a.id.starts_with("safety-")));

        let mut unknown = input(Some(1.0), Some(1.0), vec![]);
        unknown.metric_key = "brandNewMetric".to_string();
        let insight = build_deterministic_insight(&unknown);
        assert_eq!(insight.actions[2].id, "productivity-3");
    }

    #[test]
    fn test_idempotent_output() {
        let mut input = input(Some(82.0), Some(90.0), vec![88.0, 87.0, 85.0, 82.0]);
        input.contributors = vec![contributor("a", Some(1.5)), contributor("b", Some(-2.0))];

        let first = serde_json::to_string(&build_deterministic_insight(&input)).unwrap();
        let second = serde_json::to_string(&build_deterministic_insight(&input)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_contract_field_names() {
        let insight = build_deterministic_insight(&input(None, None, vec![]));
        let value = serde_json::to_value(&insight).unwrap();

        assert_eq!(value["severity"], "unknown");
        assert_eq!(value["trendSignal"], "insufficient_data");
        assert!(value["gapToTarget"].is_null());
        assert!(value["gapRatio"].is_null());
        assert!(value["trendDeltaPercent"].is_null());
        assert_eq!(value["topContributors"], serde_json::json!([]));
        assert_eq!(value["actions"].as_array().unwrap().len(), 3);
    }
}
