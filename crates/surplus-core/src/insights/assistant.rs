//! Question answering over surplus data
//!
//! A closed rule set: the lower-cased question is matched against keyword
//! groups in priority order and the first match picks the answer template.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ForecastConfig;
use crate::models::{ForecastPoint, Insight, TimePoint};

use super::format_amount;

/// Answer returned when no rule matches
pub const FALLBACK_ANSWER: &str = "I can help with reducing production, peak surplus days, \
and surplus forecasts. Try asking \"Which day had the highest surplus?\"";

const NO_DATA_ANSWER: &str = "No surplus data is available yet.";

/// Question categories the assistant recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ReduceProduction,
    Lowest,
    Highest,
    Forecast,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReduceProduction => "reduce_production",
            Self::Lowest => "lowest",
            Self::Highest => "highest",
            Self::Forecast => "forecast",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a free-text question (case-insensitive substring rules)
pub fn classify(question: &str) -> Intent {
    let q = question.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| q.contains(w));

    if q.contains("reduce") && q.contains("production") {
        Intent::ReduceProduction
    } else if has_any(&["lowest", "minimum"]) {
        Intent::Lowest
    } else if has_any(&["highest", "maximum", "peak"]) {
        Intent::Highest
    } else if has_any(&["forecast", "predict"]) {
        Intent::Forecast
    } else {
        Intent::Unknown
    }
}

/// Everything an answer may draw on
#[derive(Debug, Clone, Copy)]
pub struct AnswerContext<'a> {
    pub series: &'a [TimePoint],
    pub insight: &'a Insight,
    pub forecast: &'a [ForecastPoint],
    pub forecast_enabled: bool,
}

/// Rule-based assistant answering questions about a surplus series
#[derive(Debug, Clone, Default)]
pub struct Assistant {
    config: ForecastConfig,
}

impl Assistant {
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    pub fn answer(&self, question: &str, ctx: &AnswerContext<'_>) -> String {
        let intent = classify(question);
        tracing::debug!(intent = intent.as_str(), "Classified question");
        self.answer_intent(intent, ctx)
    }

    pub fn answer_intent(&self, intent: Intent, ctx: &AnswerContext<'_>) -> String {
        let unit = &self.config.unit;
        let insight = ctx.insight;

        if intent == Intent::Unknown {
            return FALLBACK_ANSWER.to_string();
        }
        if ctx.series.is_empty() {
            return NO_DATA_ANSWER.to_string();
        }

        match intent {
            Intent::ReduceProduction => {
                let day = if insight.peak_display.is_empty()
                    || insight.peak_display == insight.peak.label
                {
                    insight.peak.label.clone()
                } else {
                    format!("{} ({})", insight.peak_display, insight.peak.label)
                };
                format!(
                    "Consider reducing production on {}. Surplus peaked at {} {} on {}, \
                     so cutting about {} {} there would help most.",
                    day,
                    format_amount(insight.peak.amount),
                    unit,
                    insight.peak.label,
                    insight.suggested_reduction,
                    unit,
                )
            }
            Intent::Lowest => format!(
                "The lowest surplus was {} {} on {}.",
                format_amount(insight.trough.amount),
                unit,
                insight.trough.label,
            ),
            Intent::Highest => format!(
                "The highest surplus was {} {} on {}.",
                format_amount(insight.peak.amount),
                unit,
                insight.peak.label,
            ),
            Intent::Forecast => {
                if !ctx.forecast_enabled {
                    "Turn on the forecast to see projected surplus.".to_string()
                } else if let Some(last) = ctx.forecast.last() {
                    format!(
                        "By {}, surplus is projected to reach {} {}.",
                        last.label,
                        format_amount(last.projected),
                        unit,
                    )
                } else {
                    "No forecast data is available for this view.".to_string()
                }
            }
            Intent::Unknown => FALLBACK_ANSWER.to_string(),
        }
    }
}

/// Answer a question with the default configuration
pub fn answer(
    question: &str,
    series: &[TimePoint],
    insight: &Insight,
    forecast: &[ForecastPoint],
    forecast_enabled: bool,
) -> String {
    Assistant::default().answer(
        question,
        &AnswerContext {
            series,
            insight,
            forecast,
            forecast_enabled,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{extract_insight, forecast};
    use crate::models::Granularity;
    use crate::test_utils::{sample_week, series};

    fn ask(question: &str, forecast_enabled: bool) -> String {
        let s = sample_week();
        let insight = extract_insight(&s);
        let points = forecast(&s, Granularity::Week);
        answer(question, &s, &insight, &points, forecast_enabled)
    }

    #[test]
    fn test_classify_priority() {
        assert_eq!(classify("How can I reduce production?"), Intent::ReduceProduction);
        // "reduce production" wins over "peak"
        assert_eq!(
            classify("Should I reduce production on the peak day?"),
            Intent::ReduceProduction
        );
        assert_eq!(classify("reduce waste"), Intent::Unknown);
        assert_eq!(classify("What was the minimum?"), Intent::Lowest);
        // "lowest" wins over "peak"
        assert_eq!(classify("lowest or peak?"), Intent::Lowest);
        assert_eq!(classify("Which day was the PEAK"), Intent::Highest);
        assert_eq!(classify("maximum surplus"), Intent::Highest);
        assert_eq!(classify("Can you predict next week?"), Intent::Forecast);
        assert_eq!(classify("Forecast please"), Intent::Forecast);
        assert_eq!(classify("random gibberish"), Intent::Unknown);
        assert_eq!(classify(""), Intent::Unknown);
    }

    #[test]
    fn test_reduce_production_cites_peak() {
        let text = ask("How can I reduce production?", true);
        assert!(text.contains("Apr 6"));
        assert!(text.contains("5.9"));
    }

    #[test]
    fn test_lowest_and_highest() {
        assert_eq!(
            ask("what was the lowest day", true),
            "The lowest surplus was 2.3 kg on Apr 1."
        );
        assert_eq!(
            ask("what was the highest day", true),
            "The highest surplus was 5.9 kg on Apr 6."
        );
    }

    #[test]
    fn test_forecast_answers() {
        assert_eq!(
            ask("forecast?", true),
            "By Apr 10, surplus is projected to reach 6.6 kg."
        );
        assert_eq!(
            ask("forecast?", false),
            "Turn on the forecast to see projected surplus."
        );

        let s = series(&[("Apr 1", 3.0)]);
        let insight = extract_insight(&s);
        assert_eq!(
            answer("predict tomorrow", &s, &insight, &[], true),
            "No forecast data is available for this view."
        );
    }

    #[test]
    fn test_fallback_regardless_of_series() {
        assert_eq!(ask("random gibberish", true), FALLBACK_ANSWER);
        assert_eq!(
            answer("random gibberish", &[], &Insight::empty(), &[], false),
            FALLBACK_ANSWER
        );
    }

    #[test]
    fn test_empty_series_data_intents() {
        let insight = Insight::empty();
        assert_eq!(
            answer("highest?", &[], &insight, &[], true),
            "No surplus data is available yet."
        );
    }

    #[test]
    fn test_reduce_production_with_weekday_display() {
        let s = sample_week();
        let insight = crate::insights::InsightExtractor::new(ForecastConfig::default())
            .with_granularity(Granularity::Week)
            .extract(&s);
        let text = answer("reduce production?", &s, &insight, &[], true);

        assert!(text.starts_with("Consider reducing production on Sunday (Apr 6)."));
        assert!(text.contains("about 5 kg"));
    }
}
