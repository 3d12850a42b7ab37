//! Metric classification tables
//!
//! Keys are the backend's aggregated metric spellings (`ti`, `skmd`, ...).
//! They are not derivable from any naming rule, so both tables are listed
//! out explicitly. A wrong entry in the direction table silently inverts
//! the trend reading for that metric.

use super::types::{MetricDirection, MetricFamily};

/// Resolve whether a metric improves by going up or down.
///
/// Anything not listed as lower-is-better is treated as higher-is-better.
pub fn metric_direction(metric_key: &str) -> MetricDirection {
    match metric_key {
        "ti"
        | "to"
        | "totalTimeIn"
        | "totalTimeOut"
        | "averageDistancePerTrip"
        | "violationRate"
        | "highRiskDrivers"
        | "hrd"
        | "fatalIncidents"
        | "totalFreightCost"
        | "freightCostPerTon"
        | "redDrivers"
        | "rta" => MetricDirection::LowerIsBetter,
        _ => MetricDirection::HigherIsBetter,
    }
}

/// Resolve the domain family of a metric, defaulting to productivity.
pub fn metric_family(metric_key: &str) -> MetricFamily {
    match metric_key {
        "otd" | "otdCount" | "volumeMoved" | "totalTrips" | "backhaulVolume"
        | "backhaulCount" | "totalCico" | "timeInCount" | "timeOutCount" => {
            MetricFamily::Delivery
        }

        "skmd" | "violationRate" | "hrd" | "highRiskDrivers" | "fatalIncidents"
        | "totalSafetyScore" | "redDrivers" | "greenDriversKm" | "rta" => MetricFamily::Safety,

        "ti" | "to" | "totalTimeIn" | "totalTimeOut" | "averageDistancePerTrip"
        | "averageDistance" => MetricFamily::Turnaround,

        "availability" | "totalTrucks" | "tripsPerTruck" | "payloadCount" => {
            MetricFamily::Utilization
        }

        "totalFreightCost" | "freightCostPerTon" => MetricFamily::Cost,

        "averagePayload" | "totalPayload" | "totalDistance" | "totalDrivers"
        | "averageScoreCard" => MetricFamily::Productivity,

        _ => MetricFamily::Productivity,
    }
}
