//! Surplus Forecaster
//!
//! Projects the next few surplus amounts by extending the average change
//! over a trailing window, with a confidence band that widens each step by
//! the sample deviation of those changes.

use serde::{Deserialize, Serialize};

use crate::config::ForecastConfig;
use crate::labels::next_label;
use crate::models::{ForecastPoint, Granularity, TimePoint};

/// Slope and spread estimated from the trailing window of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendEstimate {
    /// Number of points the estimate was taken from
    pub window: usize,
    /// Mean first difference across the window
    pub avg_change: f64,
    /// Sample deviation of the first differences
    pub std_dev: f64,
}

/// Forecast engine for surplus series
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    config: ForecastConfig,
}

impl Forecaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Estimate the trend over the trailing window for `granularity`
    ///
    /// Returns `None` when the series has fewer than two points.
    pub fn estimate(&self, series: &[TimePoint], granularity: Granularity) -> Option<TrendEstimate> {
        if series.len() < 2 {
            return None;
        }

        let window = self.config.window(granularity).min(series.len());
        let recent = &series[series.len() - window..];

        let changes: Vec<f64> = recent
            .windows(2)
            .map(|pair| pair[1].amount - pair[0].amount)
            .collect();

        let avg_change = if changes.is_empty() {
            0.0
        } else {
            changes.iter().sum::<f64>() / changes.len() as f64
        };

        let std_dev = if changes.len() > 1 {
            let sum_sq: f64 = changes.iter().map(|c| (c - avg_change).powi(2)).sum();
            (sum_sq / (changes.len() - 1) as f64).sqrt()
        } else {
            // Absolute value keeps the band ordered for falling series
            avg_change.abs() * self.config.stddev_fallback_ratio
        };

        Some(TrendEstimate {
            window,
            avg_change,
            std_dev,
        })
    }

    /// Project the next points of `series`
    ///
    /// Returns an empty forecast for series with fewer than two points, with
    /// non-finite amounts, or whose projection overflows.
    pub fn forecast(&self, series: &[TimePoint], granularity: Granularity) -> Vec<ForecastPoint> {
        if series.iter().any(|p| !p.amount.is_finite()) {
            tracing::warn!(granularity = %granularity, "Series contains non-finite amounts, skipping forecast");
            return vec![];
        }

        let Some(trend) = self.estimate(series, granularity) else {
            tracing::debug!(
                points = series.len(),
                "Not enough points to estimate a trend"
            );
            return vec![];
        };

        // estimate() guarantees at least two points
        let last = &series[series.len() - 1];
        let horizon = self.config.horizon(granularity);

        tracing::debug!(
            granularity = %granularity,
            window = trend.window,
            avg_change = trend.avg_change,
            std_dev = trend.std_dev,
            horizon,
            "Projecting surplus"
        );

        let points: Option<Vec<ForecastPoint>> = (0..horizon)
            .map(|step| {
                let steps_ahead = (step + 1) as f64;
                let projected = (last.amount + trend.avg_change * steps_ahead).max(0.0);
                let spread = trend.std_dev * steps_ahead * self.config.band_multiplier;
                let upper = projected + spread;
                if !projected.is_finite() || !upper.is_finite() {
                    return None;
                }

                Some(ForecastPoint {
                    label: next_label(&last.label, step, granularity, &self.config),
                    projected: round_tenth(projected),
                    confidence_upper: round_tenth(upper.max(0.0)),
                    confidence_lower: round_tenth((projected - spread).max(0.0)),
                })
            })
            .collect();

        points.unwrap_or_else(|| {
            tracing::warn!(granularity = %granularity, "Projection overflowed, skipping forecast");
            vec![]
        })
    }
}

/// Project `series` with the default configuration
pub fn forecast(series: &[TimePoint], granularity: Granularity) -> Vec<ForecastPoint> {
    Forecaster::new().forecast(series, granularity)
}

/// Round to one decimal place
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_week, series};

    #[test]
    fn test_short_series_yields_empty_forecast() {
        assert!(forecast(&[], Granularity::Week).is_empty());
        assert!(forecast(&series(&[("Apr 1", 3.0)]), Granularity::Week).is_empty());
    }

    #[test]
    fn test_non_finite_series_yields_empty_forecast() {
        let s = series(&[("Apr 1", 3.0), ("Apr 2", f64::NAN), ("Apr 3", 4.0)]);
        assert!(forecast(&s, Granularity::Week).is_empty());
    }

    #[test]
    fn test_overflowing_projection_yields_empty_forecast() {
        let s = series(&[("Apr 1", 0.0), ("Apr 2", 1e308), ("Apr 3", 1.7e308)]);
        assert!(forecast(&s, Granularity::Week).is_empty());
    }

    #[test]
    fn test_year_label_at_max_year_does_not_panic() {
        let s = series(&[("Nov 2147483647", 3.0), ("Dec 2147483647", 4.0)]);
        let points = forecast(&s, Granularity::Year);

        assert_eq!(points.len(), 4);
        assert_eq!(points[0].label, "Dec 2147483647 +1");
        assert_eq!(points[0].projected, 5.0);
    }

    #[test]
    fn test_flat_series_has_flat_projection_and_zero_band() {
        let s = series(&[("Apr 1", 4.0), ("Apr 2", 4.0), ("Apr 3", 4.0)]);

        let trend = Forecaster::new().estimate(&s, Granularity::Week).unwrap();
        assert_eq!(trend.avg_change, 0.0);
        assert_eq!(trend.std_dev, 0.0);

        let points = forecast(&s, Granularity::Week);
        assert_eq!(points.len(), 3);
        for p in &points {
            assert_eq!(p.projected, 4.0);
            assert_eq!(p.band_width(), 0.0);
        }
        assert_eq!(points[0].label, "Apr 4");
        assert_eq!(points[2].label, "Apr 6");
    }

    #[test]
    fn test_week_forecast_uses_trailing_three_points() {
        // Last three: 3.6, 5.9, 4.8 → changes 2.3, -1.1 → avg 0.6
        let points = forecast(&sample_week(), Granularity::Week);
        assert_eq!(points.len(), 3);

        assert_eq!(points[0].label, "Apr 8");
        assert_eq!(points[0].projected, 5.4);
        assert_eq!(points[1].projected, 6.0);
        assert_eq!(points[2].projected, 6.6);

        // stddev of [2.3, -1.1] = sqrt(2 * 1.7^2) ≈ 2.404; step 1 spread ≈ 1.923
        assert_eq!(points[0].confidence_upper, 7.3);
        assert_eq!(points[0].confidence_lower, 3.5);
    }

    #[test]
    fn test_two_point_series_uses_stddev_fallback() {
        let s = series(&[("Apr 1", 2.0), ("Apr 2", 4.0)]);
        let trend = Forecaster::new().estimate(&s, Granularity::Week).unwrap();

        assert_eq!(trend.window, 2);
        assert_eq!(trend.avg_change, 2.0);
        assert!((trend.std_dev - 0.6).abs() < 1e-9);

        let points = forecast(&s, Granularity::Week);
        assert_eq!(points[0].projected, 6.0);
        // 6.0 ± 0.6 * 1 * 0.8
        assert_eq!(points[0].confidence_upper, 6.5);
        assert_eq!(points[0].confidence_lower, 5.5);
    }

    #[test]
    fn test_falling_series_is_clamped_at_zero() {
        let s = series(&[("Apr 1", 9.0), ("Apr 2", 5.0), ("Apr 3", 1.0)]);
        let points = forecast(&s, Granularity::Week);

        assert_eq!(points.len(), 3);
        for p in &points {
            assert_eq!(p.projected, 0.0);
            assert!(p.confidence_lower >= 0.0);
            assert!(p.confidence_lower <= p.projected);
            assert!(p.projected <= p.confidence_upper);
        }
    }

    #[test]
    fn test_falling_two_point_series_keeps_band_ordered() {
        let s = series(&[("Apr 1", 10.0), ("Apr 2", 8.0)]);
        let points = forecast(&s, Granularity::Week);

        assert_eq!(points[0].projected, 6.0);
        assert!(points[0].confidence_lower < points[0].projected);
        assert!(points[0].confidence_upper > points[0].projected);
    }

    #[test]
    fn test_horizon_per_granularity() {
        let s: Vec<TimePoint> = (1..=12)
            .map(|d| TimePoint::new(format!("Mar {}", d), d as f64))
            .collect();

        assert_eq!(forecast(&s, Granularity::Week).len(), 3);
        assert_eq!(forecast(&s, Granularity::Month).len(), 7);

        let months = series(&[("Sep", 10.0), ("Oct", 12.0), ("Nov", 11.0), ("Dec", 13.0)]);
        let points = forecast(&months, Granularity::Year);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0].label, "Jan 2026");
        assert_eq!(points[3].label, "Apr 2026");
    }

    #[test]
    fn test_custom_window_config() {
        let config = ForecastConfig {
            week_window: 5,
            ..Default::default()
        };
        let points = Forecaster::with_config(config).forecast(&sample_week(), Granularity::Week);
        assert_eq!(points.len(), 5);
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(1.24), 1.2);
        assert_eq!(round_tenth(1.25), 1.3);
        assert_eq!(round_tenth(0.0), 0.0);
    }
}
