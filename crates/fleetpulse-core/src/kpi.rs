//! KPI type catalogue
//!
//! The backend identifies KPIs by upper-snake identifiers (`OTD_RING_1`)
//! while the aggregated metrics payload keys them in camelCase (`otd`).
//! This module maps between the two and parses loosely-formatted route
//! parameters back into a KPI type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KpiType {
    DispatchVolume,
    Gigo,
    CicoCustomer,
    Backhaul,
    LeadTime,
    #[serde(rename = "OTD_RING_1")]
    OtdRing1,
    AvgDistancePerTrip,
    TripsPerTruckPerWeek,
    Ti,
    To,
    AverageScoreCard,
    Availability,
    TotalTrucks,
    ViolationRate,
    Skmd,
    Hrd,
}

impl KpiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DispatchVolume => "DISPATCH_VOLUME",
            Self::Gigo => "GIGO",
            Self::CicoCustomer => "CICO_CUSTOMER",
            Self::Backhaul => "BACKHAUL",
            Self::LeadTime => "LEAD_TIME",
            Self::OtdRing1 => "OTD_RING_1",
            Self::AvgDistancePerTrip => "AVG_DISTANCE_PER_TRIP",
            Self::TripsPerTruckPerWeek => "TRIPS_PER_TRUCK_PER_WEEK",
            Self::Ti => "TI",
            Self::To => "TO",
            Self::AverageScoreCard => "AVERAGE_SCORE_CARD",
            Self::Availability => "AVAILABILITY",
            Self::TotalTrucks => "TOTAL_TRUCKS",
            Self::ViolationRate => "VIOLATION_RATE",
            Self::Skmd => "SKMD",
            Self::Hrd => "HRD",
        }
    }

    /// All KPI types in catalogue order
    pub fn all() -> &'static [KpiType] {
        &[
            Self::DispatchVolume,
            Self::Gigo,
            Self::CicoCustomer,
            Self::Backhaul,
            Self::LeadTime,
            Self::OtdRing1,
            Self::AvgDistancePerTrip,
            Self::TripsPerTruckPerWeek,
            Self::Ti,
            Self::To,
            Self::AverageScoreCard,
            Self::Availability,
            Self::TotalTrucks,
            Self::ViolationRate,
            Self::Skmd,
            Self::Hrd,
        ]
    }

    /// Key of this KPI in the aggregated metrics payload.
    ///
    /// Several KPIs share a key (GIGO and CICO_CUSTOMER both read `totalCico`).
    pub fn aggregated_key(&self) -> &'static str {
        match self {
            Self::DispatchVolume => "volumeMoved",
            Self::Gigo => "totalCico",
            Self::CicoCustomer => "totalCico",
            Self::Backhaul => "backhaulVolume",
            Self::LeadTime => "averageDistancePerTrip",
            Self::OtdRing1 => "otd",
            Self::AvgDistancePerTrip => "averageDistancePerTrip",
            Self::TripsPerTruckPerWeek => "tripsPerTruck",
            Self::Ti => "ti",
            Self::To => "to",
            Self::AverageScoreCard => "averageScoreCard",
            Self::Availability => "availability",
            Self::TotalTrucks => "totalTrucks",
            Self::ViolationRate => "violationRate",
            Self::Skmd => "skmd",
            Self::Hrd => "hrd",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DispatchVolume => "Dispatch Volume",
            Self::Gigo => "Gate In / Gate Out",
            Self::CicoCustomer => "Check In / Check Out",
            Self::Backhaul => "Backhaul",
            Self::LeadTime => "Lead Time",
            Self::OtdRing1 => "OTD Ring 1",
            Self::AvgDistancePerTrip => "Avg Distance/Trip",
            Self::TripsPerTruckPerWeek => "Trips/Truck/Week",
            Self::Ti => "Turnaround In",
            Self::To => "Turnaround Out",
            Self::AverageScoreCard => "Avg Score Card",
            Self::Availability => "Availability",
            Self::TotalTrucks => "Total Trucks",
            Self::ViolationRate => "Violation Rate",
            Self::Skmd => "SKMD",
            Self::Hrd => "HRD",
        }
    }
}

impl fmt::Display for KpiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for KpiType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|kpi| kpi.as_str() == s)
            .ok_or_else(|| Error::UnknownKpiType(s.to_string()))
    }
}

/// Human-readable name for a KPI identifier.
///
/// Known identifiers use their display name; anything else is title-cased
/// with underscores turned into spaces (`FUEL_BURN` -> `Fuel Burn`).
pub fn format_kpi_type(kpi_type: &str) -> String {
    if let Ok(kpi) = KpiType::from_str(kpi_type) {
        return kpi.display_name().to_string();
    }

    let lowered = kpi_type.replace('_', " ").to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut at_word_start = true;
    for c in lowered.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !is_word;
    }
    out
}

fn normalize_param(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Parse a loosely formatted KPI route parameter.
///
/// Tries an exact identifier first, then a case- and punctuation-insensitive
/// match on the identifier (`otd-ring-1`), then on the aggregated key
/// (`volumeMoved`). When several KPIs share an aggregated key the first in
/// catalogue order wins.
pub fn parse_metric_type_param(raw: &str) -> Option<KpiType> {
    if raw.is_empty() {
        return None;
    }

    if let Ok(kpi) = KpiType::from_str(raw) {
        return Some(kpi);
    }

    let normalized = normalize_param(raw);

    KpiType::all()
        .iter()
        .copied()
        .find(|kpi| normalize_param(kpi.as_str()) == normalized)
        .or_else(|| {
            KpiType::all()
                .iter()
                .copied()
                .find(|kpi| normalize_param(kpi.aggregated_key()) == normalized)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpi_type_str_round_trip() {
        for kpi in KpiType::all() {
            assert_eq!(KpiType::from_str(kpi.as_str()).unwrap(), *kpi);
        }
        assert_eq!(KpiType::all().len(), 16);
    }

    #[test]
    fn test_kpi_type_serde_matches_identifier() {
        for kpi in KpiType::all() {
            assert_eq!(
                serde_json::to_value(kpi).unwrap(),
                serde_json::json!(kpi.as_str())
            );
        }
    }

    #[test]
    fn test_unknown_kpi_type() {
        let err = KpiType::from_str("FUEL_BURN").unwrap_err();
        assert!(matches!(err, Error::UnknownKpiType(ref s) if s == "FUEL_BURN"));
    }

    #[test]
    fn test_aggregated_keys() {
        assert_eq!(KpiType::OtdRing1.aggregated_key(), "otd");
        assert_eq!(KpiType::Gigo.aggregated_key(), "totalCico");
        assert_eq!(KpiType::CicoCustomer.aggregated_key(), "totalCico");
        assert_eq!(KpiType::LeadTime.aggregated_key(), "averageDistancePerTrip");
        assert_eq!(KpiType::TripsPerTruckPerWeek.aggregated_key(), "tripsPerTruck");
    }

    #[test]
    fn test_format_kpi_type() {
        assert_eq!(format_kpi_type("GIGO"), "Gate In / Gate Out");
        assert_eq!(format_kpi_type("OTD_RING_1"), "OTD Ring 1");
        assert_eq!(format_kpi_type("FUEL_BURN_RATE"), "Fuel Burn Rate");
        assert_eq!(format_kpi_type("otd"), "Otd");
        assert_eq!(format_kpi_type("volumeMoved"), "Volumemoved");
        assert_eq!(format_kpi_type(""), "");
    }

    #[test]
    fn test_parse_metric_type_param_exact() {
        assert_eq!(parse_metric_type_param("SKMD"), Some(KpiType::Skmd));
        assert_eq!(parse_metric_type_param(""), None);
    }

    #[test]
    fn test_parse_metric_type_param_normalized() {
        assert_eq!(parse_metric_type_param("otd-ring-1"), Some(KpiType::OtdRing1));
        assert_eq!(
            parse_metric_type_param("Trips Per Truck Per Week"),
            Some(KpiType::TripsPerTruckPerWeek)
        );
        assert_eq!(parse_metric_type_param("ti"), Some(KpiType::Ti));
    }

    #[test]
    fn test_parse_metric_type_param_by_aggregated_key() {
        assert_eq!(parse_metric_type_param("volumeMoved"), Some(KpiType::DispatchVolume));
        assert_eq!(parse_metric_type_param("otd"), Some(KpiType::OtdRing1));
        // Shared key resolves to the first KPI in catalogue order
        assert_eq!(parse_metric_type_param("totalCico"), Some(KpiType::Gigo));
        assert_eq!(
            parse_metric_type_param("average_distance_per_trip"),
            Some(KpiType::LeadTime)
        );
    }

    #[test]
    fn test_parse_metric_type_param_unknown() {
        assert_eq!(parse_metric_type_param("fuelBurn"), None);
    }
}
