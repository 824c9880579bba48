//! Shared command plumbing and the config command

use std::path::Path;

use anyhow::{Context, Result};
use surplus_core::config::default_config_path;
use surplus_core::{
    ChartPreferences, ConfigSource, ForecastConfig, Granularity, JsonFileStore, SeriesSource,
    StaticSeries,
};

/// Everything a chart or assistant command needs
pub struct Workspace {
    pub source: Box<dyn SeriesSource>,
    pub config: ForecastConfig,
    pub config_source: ConfigSource,
    pub store: JsonFileStore,
}

/// Open the series source, forecast config and preference store
pub fn open_workspace(
    data_path: Option<&Path>,
    config_path: Option<&Path>,
    store_path: &Path,
) -> Result<Workspace> {
    let source = open_source(data_path)?;
    let (config, config_source) = load_config(config_path)?;
    tracing::debug!(source = source.name(), config = %config_source, "Opened workspace");

    Ok(Workspace {
        source,
        config,
        config_source,
        store: open_store(store_path),
    })
}

/// Series from a file, or the built-in sample data
pub fn open_source(data_path: Option<&Path>) -> Result<Box<dyn SeriesSource>> {
    let source = match data_path {
        Some(path) => StaticSeries::load(path)
            .with_context(|| format!("Failed to load series from {}", path.display()))?,
        None => StaticSeries::sample().context("Built-in sample series is invalid")?,
    };
    Ok(Box::new(source))
}

pub fn load_config(config_path: Option<&Path>) -> Result<(ForecastConfig, ConfigSource)> {
    let loaded = match config_path {
        Some(path) => ForecastConfig::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ForecastConfig::load().context("Failed to load forecast config")?,
    };
    Ok(loaded)
}

pub fn open_store(store_path: &Path) -> JsonFileStore {
    JsonFileStore::new(store_path)
}

/// Use the explicit `--granularity` if given, otherwise the saved preference
pub fn resolve_granularity(arg: Option<&str>, prefs: &ChartPreferences) -> Result<Granularity> {
    match arg {
        Some(s) => s.parse().map_err(|e: String| anyhow::anyhow!(e)),
        None => Ok(prefs.granularity),
    }
}

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let (config, source) = load_config(config_path)?;

    println!();
    println!("⚙️  Forecast Configuration");
    println!("   Source: {}", source);
    if source == ConfigSource::Embedded {
        if let Some(path) = default_config_path() {
            println!("   Override path: {}", path.display());
        }
    }
    println!("   ─────────────────────────────────────────");
    println!("   {:24} {}", "Band multiplier", config.band_multiplier);
    println!("   {:24} {}", "Stddev fallback ratio", config.stddev_fallback_ratio);
    println!("   {:24} {}", "Reduction ratio", config.reduction_ratio);
    for granularity in Granularity::all() {
        println!(
            "   {:24} {} points",
            format!("Window ({})", granularity),
            config.window(*granularity)
        );
    }
    println!("   {:24} {}", "Reference year", config.reference_year);
    println!("   {:24} {}", "Unit", config.unit);

    Ok(())
}
