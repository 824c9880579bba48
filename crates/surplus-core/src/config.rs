//! Forecast configuration
//!
//! Tunables for the forecast band, trend windows, reduction suggestions and
//! label display.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/surplus/config/forecast.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::Granularity;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/forecast.toml");

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolved forecast configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Confidence band widening per projected step
    pub band_multiplier: f64,
    /// Fallback stddev as a ratio of |avg change|
    pub stddev_fallback_ratio: f64,
    /// Trailing window (and horizon) for week view
    pub week_window: usize,
    /// Trailing window (and horizon) for month view
    pub month_window: usize,
    /// Trailing window (and horizon) for year view
    pub year_window: usize,
    /// Suggested reduction as a ratio of the peak amount
    pub reduction_ratio: f64,
    /// Year assumed for labels that carry no year
    pub reference_year: i32,
    /// Unit printed after amounts
    pub unit: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            band_multiplier: 0.8,
            stddev_fallback_ratio: 0.3,
            week_window: 3,
            month_window: 7,
            year_window: 4,
            reduction_ratio: 0.8,
            reference_year: 2025,
            unit: "kg".to_string(),
        }
    }
}

impl ForecastConfig {
    /// Load from the default override location, falling back to embedded defaults
    pub fn load() -> Result<(Self, ConfigSource)> {
        load_config(None)
    }

    /// Load from an explicit path, falling back to embedded defaults if it is missing
    pub fn load_from(path: &Path) -> Result<(Self, ConfigSource)> {
        load_config(Some(path))
    }

    /// Parse config from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Number of trailing points used to estimate the trend
    pub fn window(&self, granularity: Granularity) -> usize {
        match granularity {
            Granularity::Week => self.week_window,
            Granularity::Month => self.month_window,
            Granularity::Year => self.year_window,
        }
    }

    /// Number of projected points
    pub fn horizon(&self, granularity: Granularity) -> usize {
        self.window(granularity)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("surplus").join("config").join("forecast.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<(ForecastConfig, ConfigSource)> {
    let candidate = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    if let Some(path) = candidate {
        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
            tracing::debug!(path = %path.display(), "Loaded forecast config override");
            return Ok((parse_config(&content)?, ConfigSource::File(path)));
        }
        if override_path.is_some() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using embedded defaults"
            );
        }
    }

    Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    forecast: Option<RawForecast>,
    windows: Option<RawWindows>,
    insight: Option<RawInsight>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawForecast {
    band_multiplier: Option<f64>,
    stddev_fallback_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawWindows {
    week: Option<usize>,
    month: Option<usize>,
    year: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawInsight {
    reduction_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    reference_year: Option<i32>,
    unit: Option<String>,
}

fn parse_config(content: &str) -> Result<ForecastConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = ForecastConfig::default();

    if let Some(forecast) = raw.forecast {
        if let Some(m) = forecast.band_multiplier {
            config.band_multiplier = non_negative("forecast.band_multiplier", m)?;
        }
        if let Some(r) = forecast.stddev_fallback_ratio {
            config.stddev_fallback_ratio = non_negative("forecast.stddev_fallback_ratio", r)?;
        }
    }

    if let Some(windows) = raw.windows {
        if let Some(w) = windows.week {
            config.week_window = positive_window("windows.week", w)?;
        }
        if let Some(w) = windows.month {
            config.month_window = positive_window("windows.month", w)?;
        }
        if let Some(w) = windows.year {
            config.year_window = positive_window("windows.year", w)?;
        }
    }

    if let Some(insight) = raw.insight {
        if let Some(r) = insight.reduction_ratio {
            config.reduction_ratio = non_negative("insight.reduction_ratio", r)?;
        }
    }

    if let Some(display) = raw.display {
        if let Some(year) = display.reference_year {
            config.reference_year = year;
        }
        if let Some(unit) = display.unit {
            config.unit = unit;
        }
    }

    Ok(config)
}

fn non_negative(key: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::Config(format!(
            "{} must be a non-negative number, got {}",
            key, value
        )))
    }
}

fn positive_window(key: &str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(Error::Config(format!("{} must be at least 1", key)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, ForecastConfig::default());
    }

    #[test]
    fn test_windows_and_horizons() {
        let config = ForecastConfig::default();
        assert_eq!(config.window(Granularity::Week), 3);
        assert_eq!(config.window(Granularity::Month), 7);
        assert_eq!(config.window(Granularity::Year), 4);
        assert_eq!(config.horizon(Granularity::Month), 7);
    }

    #[test]
    fn test_partial_override() {
        let config = ForecastConfig::from_toml(
            r#"
            [display]
            unit = "portions"

            [windows]
            month = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.unit, "portions");
        assert_eq!(config.month_window, 10);
        assert_eq!(config.week_window, 3);
        assert_eq!(config.band_multiplier, 0.8);
    }

    #[test]
    fn test_rejects_zero_window() {
        let err = ForecastConfig::from_toml("[windows]\nweek = 0\n").unwrap_err();
        assert!(err.to_string().contains("windows.week"));
    }

    #[test]
    fn test_rejects_negative_ratio() {
        let err = ForecastConfig::from_toml("[insight]\nreduction_ratio = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("reduction_ratio"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(ForecastConfig::from_toml("[forecast\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nreference_year = 2024").unwrap();

        let (config, source) = ForecastConfig::load_from(file.path()).unwrap();
        assert_eq!(config.reference_year, 2024);
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_load_from_missing_file_uses_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) = ForecastConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, ForecastConfig::default());
        assert_eq!(source, ConfigSource::Embedded);
    }
}
