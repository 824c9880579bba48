//! Chart handlers - series, forecast, insight and combined analysis

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use surplus_core::{Forecaster, ForecastPoint, Insight, InsightExtractor, SurplusAnalysis, TimePoint};

use super::parse_granularity;
use crate::{AppError, AppState};

/// GET /api/series/:granularity - Historical points
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Path(granularity): Path<String>,
) -> Result<Json<Vec<TimePoint>>, AppError> {
    let granularity = parse_granularity(&granularity)?;
    Ok(Json(state.series.series(granularity)?))
}

/// GET /api/forecast/:granularity - Projected points with confidence band
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Path(granularity): Path<String>,
) -> Result<Json<Vec<ForecastPoint>>, AppError> {
    let granularity = parse_granularity(&granularity)?;
    let series = state.series.series(granularity)?;

    let points = Forecaster::with_config(state.forecast.clone()).forecast(&series, granularity);
    Ok(Json(points))
}

/// GET /api/insight/:granularity - Peak, trough, trend and summary
pub async fn get_insight(
    State(state): State<Arc<AppState>>,
    Path(granularity): Path<String>,
) -> Result<Json<Insight>, AppError> {
    let granularity = parse_granularity(&granularity)?;
    let series = state.series.series(granularity)?;

    let insight = InsightExtractor::new(state.forecast.clone())
        .with_granularity(granularity)
        .extract(&series);
    Ok(Json(insight))
}

/// GET /api/analysis/:granularity - Series, forecast and insight in one response
pub async fn get_analysis(
    State(state): State<Arc<AppState>>,
    Path(granularity): Path<String>,
) -> Result<Json<SurplusAnalysis>, AppError> {
    let granularity = parse_granularity(&granularity)?;
    let series = state.series.series(granularity)?;

    Ok(Json(SurplusAnalysis::run(series, granularity, &state.forecast)))
}
