//! Analysis bundle - forecast and insight for one chart view

use serde::{Deserialize, Serialize};

use crate::config::ForecastConfig;
use crate::models::{ForecastPoint, Granularity, Insight, TimePoint};

use super::{AnswerContext, Assistant, Forecaster, InsightExtractor};

/// Everything derived from one series at one granularity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurplusAnalysis {
    pub granularity: Granularity,
    pub series: Vec<TimePoint>,
    pub forecast: Vec<ForecastPoint>,
    pub insight: Insight,
}

impl SurplusAnalysis {
    /// Compute forecast and insight for `series`
    pub fn run(series: Vec<TimePoint>, granularity: Granularity, config: &ForecastConfig) -> Self {
        let forecast = Forecaster::with_config(config.clone()).forecast(&series, granularity);
        let insight = InsightExtractor::new(config.clone())
            .with_granularity(granularity)
            .extract(&series);

        tracing::debug!(
            granularity = %granularity,
            points = series.len(),
            projected = forecast.len(),
            trend = %insight.trend_direction,
            "Analysis complete"
        );

        Self {
            granularity,
            series,
            forecast,
            insight,
        }
    }

    /// Answer a question against this analysis
    pub fn answer(&self, question: &str, forecast_enabled: bool, config: &ForecastConfig) -> String {
        Assistant::new(config.clone()).answer(
            question,
            &AnswerContext {
                series: &self.series,
                insight: &self.insight,
                forecast: &self.forecast,
                forecast_enabled,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrendDirection;
    use crate::test_utils::sample_week;

    #[test]
    fn test_run_week() {
        let config = ForecastConfig::default();
        let analysis = SurplusAnalysis::run(sample_week(), Granularity::Week, &config);

        assert_eq!(analysis.series.len(), 7);
        assert_eq!(analysis.forecast.len(), 3);
        assert_eq!(analysis.insight.trend_direction, TrendDirection::Increasing);
        assert_eq!(analysis.insight.peak_display, "Sunday");
    }

    #[test]
    fn test_run_empty() {
        let config = ForecastConfig::default();
        let analysis = SurplusAnalysis::run(vec![], Granularity::Month, &config);

        assert!(analysis.forecast.is_empty());
        assert_eq!(analysis.insight, Insight::empty());
        assert_eq!(
            analysis.answer("what is the peak?", true, &config),
            "No surplus data is available yet."
        );
    }

    #[test]
    fn test_answer_uses_unit() {
        let config = ForecastConfig {
            unit: "portions".to_string(),
            ..Default::default()
        };
        let analysis = SurplusAnalysis::run(sample_week(), Granularity::Week, &config);
        assert_eq!(
            analysis.answer("highest?", true, &config),
            "The highest surplus was 5.9 portions on Apr 6."
        );
    }
}
