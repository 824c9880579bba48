//! Label arithmetic for chart points
//!
//! Week and month views label points with "Mon D" day tokens, the year view
//! with month names. Projected points need synthetic labels continuing the
//! historical ones, and day tokens are shown to users as weekday names.

use chrono::NaiveDate;

use crate::config::ForecastConfig;
use crate::models::Granularity;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Zero-based month index for "Apr", "april", "APR." etc.
pub fn month_index(token: &str) -> Option<usize> {
    let prefix: String = token.chars().take(3).collect::<String>().to_lowercase();
    MONTHS.iter().position(|m| m.to_lowercase() == prefix)
}

/// Split a "Mon D" token into its month part and day number
pub fn parse_day_label(label: &str) -> Option<(&str, u32)> {
    let mut parts = label.split_whitespace();
    let month = parts.next()?;
    let day = parts.next()?.parse::<u32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((month, day))
}

/// Split a "Mon" or "Mon YYYY" token into month index and year
fn parse_month_label(label: &str, reference_year: i32) -> Option<(usize, i32)> {
    let mut parts = label.split_whitespace();
    let month = month_index(parts.next()?)?;
    let year = match parts.next() {
        Some(token) => token.parse::<i32>().ok()?,
        None => reference_year,
    };
    if parts.next().is_some() {
        return None;
    }
    Some((month, year))
}

/// Label for the projected point `step` (0-based) after `last`
///
/// Day labels keep their month and add `step + 1` days without rolling into
/// the next month. Month labels advance on a 12-month cycle and carry a year.
/// Labels that cannot be parsed, or whose day or year would overflow, get an
/// offset suffix instead.
pub fn next_label(
    last: &str,
    step: usize,
    granularity: Granularity,
    config: &ForecastConfig,
) -> String {
    let offset = step + 1;

    let label = if granularity.has_day_labels() {
        parse_day_label(last).and_then(|(month, day)| {
            let day = (day as usize).checked_add(offset)?;
            Some(format!("{} {}", month, day))
        })
    } else {
        parse_month_label(last, config.reference_year).and_then(|(month, year)| {
            let index = month.checked_add(offset)?;
            let year = i32::try_from(index / 12).ok().and_then(|y| year.checked_add(y))?;
            Some(format!("{} {}", MONTHS[index % 12], year))
        })
    };

    label.unwrap_or_else(|| {
        tracing::debug!(label = last, granularity = %granularity, "Unparseable label, using offset suffix");
        format!("{} +{}", last, offset)
    })
}

/// User-facing form of a label
///
/// Day labels resolve to a weekday name in the reference year; anything that
/// fails to parse (and all year-view labels) is returned unchanged.
pub fn display_label(label: &str, granularity: Granularity, config: &ForecastConfig) -> String {
    if !granularity.has_day_labels() {
        return label.to_string();
    }

    let weekday = parse_day_label(label).and_then(|(month, day)| {
        let month = month_index(month)?;
        NaiveDate::from_ymd_opt(config.reference_year, month as u32 + 1, day)
    });

    match weekday {
        Some(date) => date.format("%A").to_string(),
        None => {
            tracing::debug!(label, "Could not resolve weekday, showing raw label");
            label.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ForecastConfig {
        ForecastConfig::default()
    }

    #[test]
    fn test_month_index() {
        assert_eq!(month_index("Jan"), Some(0));
        assert_eq!(month_index("april"), Some(3));
        assert_eq!(month_index("DEC"), Some(11));
        assert_eq!(month_index("Foo"), None);
        assert_eq!(month_index(""), None);
    }

    #[test]
    fn test_parse_day_label() {
        assert_eq!(parse_day_label("Apr 6"), Some(("Apr", 6)));
        assert_eq!(parse_day_label("Apr"), None);
        assert_eq!(parse_day_label("Apr six"), None);
        assert_eq!(parse_day_label("Apr 6 2025"), None);
    }

    #[test]
    fn test_next_day_label() {
        let c = config();
        assert_eq!(next_label("Apr 7", 0, Granularity::Week, &c), "Apr 8");
        assert_eq!(next_label("Apr 7", 2, Granularity::Week, &c), "Apr 10");
        assert_eq!(next_label("Mar 24", 6, Granularity::Month, &c), "Mar 31");
    }

    #[test]
    fn test_next_day_label_does_not_roll_month() {
        let c = config();
        assert_eq!(next_label("Apr 30", 0, Granularity::Month, &c), "Apr 31");
    }

    #[test]
    fn test_next_month_label_rolls_year() {
        let c = config();
        assert_eq!(next_label("Oct", 0, Granularity::Year, &c), "Nov 2025");
        assert_eq!(next_label("Dec", 0, Granularity::Year, &c), "Jan 2026");
        assert_eq!(next_label("Dec", 3, Granularity::Year, &c), "Apr 2026");
        assert_eq!(next_label("Nov 2030", 1, Granularity::Year, &c), "Jan 2031");
    }

    #[test]
    fn test_next_label_unparseable() {
        let c = config();
        assert_eq!(next_label("d3", 0, Granularity::Week, &c), "d3 +1");
        assert_eq!(next_label("Q4", 1, Granularity::Year, &c), "Q4 +2");
    }

    #[test]
    fn test_next_label_year_overflow_uses_suffix() {
        let c = config();
        assert_eq!(
            next_label("Dec 2147483647", 0, Granularity::Year, &c),
            "Dec 2147483647 +1"
        );
        // Without a rollover the maximum year is still representable
        assert_eq!(
            next_label("Oct 2147483647", 0, Granularity::Year, &c),
            "Nov 2147483647"
        );
    }

    #[test]
    fn test_display_label_weekday() {
        let c = config();
        // 2025-04-06 is a Sunday
        assert_eq!(display_label("Apr 6", Granularity::Week, &c), "Sunday");
        assert_eq!(display_label("Apr 1", Granularity::Month, &c), "Tuesday");
    }

    #[test]
    fn test_display_label_year_view_is_raw() {
        assert_eq!(display_label("Jul", Granularity::Year, &config()), "Jul");
    }

    #[test]
    fn test_display_label_falls_back_to_raw() {
        let c = config();
        assert_eq!(display_label("Feb 30", Granularity::Week, &c), "Feb 30");
        assert_eq!(display_label("someday", Granularity::Week, &c), "someday");
    }
}
