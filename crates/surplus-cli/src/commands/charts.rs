//! Chart view commands

use anyhow::Result;
use surplus_core::insights::format_amount;
use surplus_core::labels::display_label;
use surplus_core::{ChartPreferences, ForecastConfig, Forecaster, SurplusAnalysis};

use super::{resolve_granularity, truncate, Workspace};

pub fn cmd_series(ws: &Workspace, granularity: Option<&str>) -> Result<()> {
    let prefs = ChartPreferences::load(&ws.store)?;
    let granularity = resolve_granularity(granularity, &prefs)?;
    let series = ws.source.series(granularity)?;

    println!();
    println!("📊 Surplus ({})", granularity);
    println!("   Source: {}", ws.source.name());
    println!("   ─────────────────────────────────────────");

    if series.is_empty() {
        println!("   No surplus data for this view.");
        return Ok(());
    }

    println!("   {:12} │ {:12} │ {:>10}", "Label", "Shown as", "Amount");
    println!("   ─────────────┼──────────────┼───────────");
    for point in &series {
        println!(
            "   {:12} │ {:12} │ {:>7} {}",
            truncate(&point.label, 12),
            truncate(&display_label(&point.label, granularity, &ws.config), 12),
            format_amount(point.amount),
            ws.config.unit
        );
    }

    let total: f64 = series.iter().map(|p| p.amount).sum();
    println!();
    println!(
        "   {} points, {} {} total",
        series.len(),
        format_amount(total),
        ws.config.unit
    );

    Ok(())
}

pub fn cmd_forecast(
    ws: &Workspace,
    granularity: Option<&str>,
    no_confidence: bool,
    json: bool,
) -> Result<()> {
    let prefs = ChartPreferences::load(&ws.store)?;
    let granularity = resolve_granularity(granularity, &prefs)?;
    let series = ws.source.series(granularity)?;
    let points = Forecaster::with_config(ws.config.clone()).forecast(&series, granularity);

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    let show_band = prefs.show_confidence && !no_confidence;

    println!();
    println!("📈 Surplus Forecast ({})", granularity);
    println!("   Source: {}", ws.source.name());
    println!("   ─────────────────────────────────────────────────");

    if points.is_empty() {
        println!("   Not enough data to forecast (need at least 2 points).");
        return Ok(());
    }

    if !prefs.show_forecast {
        println!("   (forecast is hidden on the chart; showing it here anyway)");
    }

    if show_band {
        println!(
            "   {:12} │ {:>10} │ {:>10} │ {:>10}",
            "Label", "Projected", "Lower", "Upper"
        );
        println!("   ─────────────┼────────────┼────────────┼───────────");
        for point in &points {
            println!(
                "   {:12} │ {:>10} │ {:>10} │ {:>10}",
                truncate(&point.label, 12),
                format_amount(point.projected),
                format_amount(point.confidence_lower),
                format_amount(point.confidence_upper)
            );
        }
    } else {
        println!("   {:12} │ {:>10}", "Label", "Projected");
        println!("   ─────────────┼───────────");
        for point in &points {
            println!(
                "   {:12} │ {:>10}",
                truncate(&point.label, 12),
                format_amount(point.projected)
            );
        }
    }
    println!("   Amounts in {}", ws.config.unit);

    Ok(())
}

pub fn cmd_insight(ws: &Workspace, granularity: Option<&str>, json: bool) -> Result<()> {
    let prefs = ChartPreferences::load(&ws.store)?;
    let granularity = resolve_granularity(granularity, &prefs)?;
    let series = ws.source.series(granularity)?;
    let analysis = SurplusAnalysis::run(series, granularity, &ws.config);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!();
    println!("💡 Surplus Insight ({})", granularity);
    println!("   ─────────────────────────────────────────");
    for line in insight_lines(&analysis, &ws.config) {
        println!("   {}", line);
    }

    Ok(())
}

/// Body lines of the insight view
pub fn insight_lines(analysis: &SurplusAnalysis, config: &ForecastConfig) -> Vec<String> {
    let insight = &analysis.insight;

    if analysis.series.is_empty() {
        return vec![insight.summary_text.clone()];
    }

    let unit = &config.unit;
    vec![
        format!(
            "Peak:    {} {} on {}",
            format_amount(insight.peak.amount),
            unit,
            insight.peak_display
        ),
        format!(
            "Trough:  {} {} on {}",
            format_amount(insight.trough.amount),
            unit,
            display_label(&insight.trough.label, analysis.granularity, config)
        ),
        format!("Trend:   {}", insight.trend_direction),
        format!(
            "Suggest: reduce production by about {} {}",
            insight.suggested_reduction, unit
        ),
        String::new(),
        insight.summary_text.clone(),
    ]
}
