//! Surplus Core Library
//!
//! Shared functionality for the Surplus marketplace dashboard:
//! - Surplus forecasting with confidence bands
//! - Peak/trough detection and summaries
//! - Rule-based question answering over surplus series
//! - Label arithmetic for projected points
//! - Forecast configuration with file overrides
//! - Series sources (embedded sample data, TOML/JSON/CSV files)
//! - Key-value store for chart preferences

pub mod config;
pub mod error;
pub mod insights;
pub mod labels;
pub mod models;
pub mod series;
pub mod store;

/// Series builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigSource, ForecastConfig};
pub use error::{Error, Result};
pub use insights::{
    answer, classify, extract_insight, forecast, Assistant, Forecaster, InsightExtractor, Intent,
    SurplusAnalysis,
};
pub use models::{ForecastPoint, Granularity, Insight, TimePoint, TrendDirection};
pub use series::{SeriesSet, SeriesSource, StaticSeries};
pub use store::{ChartPreferences, JsonFileStore, KeyValueStore, MemoryStore};
