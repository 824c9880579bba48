//! Insight Extractor
//!
//! Finds the peak and trough of a surplus series, its overall direction,
//! and writes a one-paragraph summary with a production cut suggestion.

use crate::config::ForecastConfig;
use crate::labels::display_label;
use crate::models::{Granularity, Insight, TimePoint, TrendDirection};

use super::format_amount;

/// Extracts insights from a surplus series
#[derive(Debug, Clone, Default)]
pub struct InsightExtractor {
    config: ForecastConfig,
    /// When set, day labels are shown as weekday names
    granularity: Option<Granularity>,
}

impl InsightExtractor {
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            config,
            granularity: None,
        }
    }

    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = Some(granularity);
        self
    }

    pub fn extract(&self, series: &[TimePoint]) -> Insight {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Insight::empty();
        };

        // Strict comparisons keep the first occurrence on ties
        let mut peak = first;
        let mut trough = first;
        for point in &series[1..] {
            if point.amount > peak.amount {
                peak = point;
            }
            if point.amount < trough.amount {
                trough = point;
            }
        }

        let trend_direction = if last.amount > first.amount {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        };

        let peak_display = match self.granularity {
            Some(granularity) => display_label(&peak.label, granularity, &self.config),
            None => peak.label.clone(),
        };

        let suggested_reduction = (peak.amount * self.config.reduction_ratio).round();

        let when = if peak_display == peak.label {
            peak.label.clone()
        } else {
            format!("{} ({})", peak_display, peak.label)
        };

        let summary_text = format!(
            "Surplus is {} over this period. It peaked at {} {} on {}. \
             Consider reducing production by about {} {} on similar days.",
            trend_direction,
            format_amount(peak.amount),
            self.config.unit,
            when,
            suggested_reduction,
            self.config.unit,
        );

        Insight {
            peak: peak.clone(),
            trough: trough.clone(),
            trend_direction,
            summary_text,
            peak_display,
            suggested_reduction,
        }
    }
}

/// Extract an insight using raw labels and the default configuration
pub fn extract_insight(series: &[TimePoint]) -> Insight {
    InsightExtractor::default().extract(series)
}
