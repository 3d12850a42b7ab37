//! Canned recommended actions per metric family

use super::types::{MetricFamily, RecommendedAction};

type ActionDescriptions = [&'static str; 3];

fn action_descriptions(family: MetricFamily) -> &'static ActionDescriptions {
    match family {
        MetricFamily::Delivery => &[
            "Prioritize delayed lanes and dispatch windows with late start times first.",
            "Set early escalation for trips crossing the midpoint without milestone updates.",
            "Review plant-to-customer handoff delays and fix top recurring blockers this week.",
        ],
        MetricFamily::Safety => &[
            "Coach high-risk operators first and track daily behavior change on flagged routes.",
            "Run safety compliance checks at shift start and resolve missing requirements immediately.",
            "Open root-cause actions for recurring violations and close owners with due dates.",
        ],
        MetricFamily::Turnaround => &[
            "Reduce queue time at loading and offloading points using time-slice scheduling.",
            "Track dwell-time exceptions every shift and assign owners to the top 3 bottlenecks.",
            "Align gate, dispatch, and yard teams on a shared turnaround SLA for this metric.",
        ],
        MetricFamily::Utilization => &[
            "Rebalance truck assignment toward low-utilization assets before adding new capacity.",
            "Increase trip density by pairing outbound and return loads on compatible lanes.",
            "Track idle windows daily and convert long idle blocks into scheduled movements.",
        ],
        MetricFamily::Cost => &[
            "Review high-cost lanes and apply route or load-consolidation corrections immediately.",
            "Set variance guardrails for freight spend and trigger approval on outlier trips.",
            "Pair cost tracking with payload and trip efficiency to reduce spend per delivered unit.",
        ],
        MetricFamily::Productivity => &[
            "Focus operational reviews on the lowest-performing depots or route clusters first.",
            "Standardize loading and movement practices from top-performing teams across shifts.",
            "Set a weekly target uplift for this KPI and monitor progress in daily huddles.",
        ],
    }
}

/// The three recommended actions for a family, ids `{family}-1..3` and
/// titles `Action 1..3`
pub fn actions_for_family(family: MetricFamily) -> Vec<RecommendedAction> {
    action_descriptions(family)
        .iter()
        .enumerate()
        .map(|(index, description)| RecommendedAction {
            id: format!("{}-{}", family.as_str(), index + 1),
            title: format!("Action {}", index + 1),
            description: (*description).to_string(),
        })
        .collect()
}
