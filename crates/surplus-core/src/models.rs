//! Data models for Surplus

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time window shown on the surplus chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Daily points for the last week
    #[default]
    Week,
    /// Daily points for the last month
    Month,
    /// Monthly points for the last year
    Year,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    pub fn all() -> &'static [Granularity] {
        &[Self::Week, Self::Month, Self::Year]
    }

    /// Whether labels are "Mon D" day tokens (as opposed to month names)
    pub fn has_day_labels(&self) -> bool {
        matches!(self, Self::Week | Self::Month)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            "year" | "yearly" => Ok(Self::Year),
            _ => Err(format!(
                "Unknown granularity: {} (valid: week, month, year)",
                s
            )),
        }
    }
}

/// One observed surplus amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Date or month token, e.g. "Apr 6" or "Dec"
    pub label: String,
    pub amount: f64,
}

impl TimePoint {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// A projected surplus amount with its confidence band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub label: String,
    pub projected: f64,
    pub confidence_upper: f64,
    pub confidence_lower: f64,
}

impl ForecastPoint {
    /// Width of the confidence band
    pub fn band_width(&self) -> f64 {
        self.confidence_upper - self.confidence_lower
    }
}

/// Direction of the series from its first to its last point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Peak, trough and trend of a series plus a readable summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub peak: TimePoint,
    pub trough: TimePoint,
    pub trend_direction: TrendDirection,
    pub summary_text: String,
    /// Peak label as shown to users (weekday name for day labels)
    pub peak_display: String,
    /// Suggested production cut on peak-like days, in whole units
    pub suggested_reduction: f64,
}

impl Insight {
    /// Insight for a series with no points
    pub fn empty() -> Self {
        Self {
            peak: TimePoint::new("", 0.0),
            trough: TimePoint::new("", 0.0),
            trend_direction: TrendDirection::Decreasing,
            summary_text: "No surplus data is available for this period yet.".to_string(),
            peak_display: String::new(),
            suggested_reduction: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_parse() {
        assert_eq!("week".parse::<Granularity>().unwrap(), Granularity::Week);
        assert_eq!("Monthly".parse::<Granularity>().unwrap(), Granularity::Month);
        assert_eq!(" YEAR ".parse::<Granularity>().unwrap(), Granularity::Year);

        let err = "daily".parse::<Granularity>().unwrap_err();
        assert!(err.contains("valid: week, month, year"));
    }

    #[test]
    fn test_granularity_serde_lowercase() {
        let json = serde_json::to_string(&Granularity::Month).unwrap();
        assert_eq!(json, "\"month\"");
        let parsed: Granularity = serde_json::from_str("\"year\"").unwrap();
        assert_eq!(parsed, Granularity::Year);
    }

    #[test]
    fn test_day_labels() {
        assert!(Granularity::Week.has_day_labels());
        assert!(Granularity::Month.has_day_labels());
        assert!(!Granularity::Year.has_day_labels());
    }

    #[test]
    fn test_empty_insight() {
        let insight = Insight::empty();
        assert!(insight.peak.label.is_empty());
        assert_eq!(insight.trend_direction, TrendDirection::Decreasing);
    }
}
