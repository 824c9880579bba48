//! Chart preference commands

use anyhow::Result;
use surplus_core::store::{last_answer, PREFERENCES_KEY};
use surplus_core::{ChartPreferences, Granularity, KeyValueStore};

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub fn cmd_prefs_show(store: &dyn KeyValueStore) -> Result<()> {
    let prefs = ChartPreferences::load(store)?;

    println!();
    println!("🎛️  Chart Preferences");
    println!("   ─────────────────────────────");
    println!("   {:12} {}", "View", prefs.granularity);
    println!("   {:12} {}", "Forecast", on_off(prefs.show_forecast));
    println!("   {:12} {}", "Confidence", on_off(prefs.show_confidence));

    if let Some(answer) = last_answer(store)? {
        println!();
        println!("   Last answer: {}", answer);
    }

    Ok(())
}

pub fn cmd_prefs_set(
    store: &dyn KeyValueStore,
    granularity: Option<&str>,
    show_forecast: Option<bool>,
    show_confidence: Option<bool>,
) -> Result<()> {
    if granularity.is_none() && show_forecast.is_none() && show_confidence.is_none() {
        anyhow::bail!("Nothing to change. Pass --granularity, --forecast or --confidence");
    }

    let mut prefs = ChartPreferences::load(store)?;
    if let Some(g) = granularity {
        prefs.granularity = g.parse::<Granularity>().map_err(|e| anyhow::anyhow!(e))?;
    }
    if let Some(v) = show_forecast {
        prefs.show_forecast = v;
    }
    if let Some(v) = show_confidence {
        prefs.show_confidence = v;
    }
    prefs.save(store)?;

    println!(
        "✓ Saved preferences: view={}, forecast={}, confidence={}",
        prefs.granularity,
        on_off(prefs.show_forecast),
        on_off(prefs.show_confidence)
    );
    Ok(())
}

pub fn cmd_prefs_reset(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(PREFERENCES_KEY)?;
    println!("✓ Preferences reset to defaults");
    Ok(())
}
