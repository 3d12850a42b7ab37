//! Breakdown period presets and date-range resolution

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Period selector on the KPI breakdown view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownPeriod {
    /// Use the given start and end dates unchanged
    Custom,
    Annual,
    LastSixMonths,
    LastThreeMonths,
    Monthly,
}

impl BreakdownPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Annual => "annual",
            Self::LastSixMonths => "last_six_months",
            Self::LastThreeMonths => "last_three_months",
            Self::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Custom => "Custom",
            Self::Annual => "Annual",
            Self::LastSixMonths => "Last 6 months",
            Self::LastThreeMonths => "Last 3 months",
            Self::Monthly => "Monthly",
        }
    }

    pub fn all() -> &'static [BreakdownPeriod] {
        &[
            Self::Custom,
            Self::Annual,
            Self::LastSixMonths,
            Self::LastThreeMonths,
            Self::Monthly,
        ]
    }

    /// Months covered by the preset, `None` for custom ranges
    pub fn months(&self) -> Option<u32> {
        match self {
            Self::Custom => None,
            Self::Annual => Some(12),
            Self::LastSixMonths => Some(6),
            Self::LastThreeMonths => Some(3),
            Self::Monthly => Some(1),
        }
    }
}

impl fmt::Display for BreakdownPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BreakdownPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "custom" => Ok(Self::Custom),
            "annual" => Ok(Self::Annual),
            "last_six_months" => Ok(Self::LastSixMonths),
            "last_three_months" => Ok(Self::LastThreeMonths),
            "monthly" => Ok(Self::Monthly),
            _ => Err(format!(
                "Unknown period: {} (valid: custom, annual, last_six_months, last_three_months, monthly)",
                s
            )),
        }
    }
}

/// Inclusive date range as `YYYY-MM-DD` strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: String,
    pub end_date: String,
}

/// Resolve the date range for a breakdown period.
///
/// Custom ranges are passed through untouched. Presets count back from
/// `end_date`, or from today when `end_date` doesn't parse. Month
/// arithmetic clamps to the last day of shorter months (Aug 31 minus six
/// months is Feb 28/29).
pub fn resolve_date_range(period: BreakdownPeriod, start_date: &str, end_date: &str) -> DateRange {
    let Some(months) = period.months() else {
        return DateRange {
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        };
    };

    let end = NaiveDate::parse_from_str(end_date, DATE_FORMAT).unwrap_or_else(|_| {
        tracing::debug!(end_date, "Unparseable end date, counting back from today");
        chrono::Local::now().date_naive()
    });
    let start = end.checked_sub_months(Months::new(months)).unwrap_or(end);

    DateRange {
        start_date: start.format(DATE_FORMAT).to_string(),
        end_date: end.format(DATE_FORMAT).to_string(),
    }
}
