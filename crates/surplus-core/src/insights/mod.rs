//! Surplus insights - forecasting, peak detection and question answering
//!
//! All functions here are pure: they take a series and return derived
//! values, with no I/O and no shared state. Degenerate input produces a
//! well-defined value rather than an error:
//!
//! - fewer than two points → empty forecast
//! - empty series → [`Insight::empty`](crate::models::Insight::empty)
//! - unrecognized question → [`FALLBACK_ANSWER`]
//!
//! ## Usage
//!
//! ```rust
//! use surplus_core::insights::{answer, extract_insight, forecast};
//! use surplus_core::models::{Granularity, TimePoint};
//!
//! let series = vec![TimePoint::new("Apr 1", 2.3), TimePoint::new("Apr 2", 3.1)];
//! let points = forecast(&series, Granularity::Week);
//! let insight = extract_insight(&series);
//! let reply = answer("what was the peak?", &series, &insight, &points, true);
//! assert!(reply.contains("Apr 2"));
//! ```

pub mod analysis;
pub mod assistant;
pub mod extractor;
pub mod forecaster;

pub use analysis::SurplusAnalysis;
pub use assistant::{answer, classify, AnswerContext, Assistant, Intent, FALLBACK_ANSWER};
pub use extractor::{extract_insight, InsightExtractor};
pub use forecaster::{forecast, round_tenth, Forecaster, TrendEstimate};

/// Format an amount with one decimal place
pub fn format_amount(amount: f64) -> String {
    format!("{:.1}", amount)
}
