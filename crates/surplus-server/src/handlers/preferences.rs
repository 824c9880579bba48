//! Chart preference handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use surplus_core::{ChartPreferences, Granularity};

use crate::{AppError, AppState};

/// Request body for updating preferences (all fields optional)
#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub granularity: Option<Granularity>,
    pub show_forecast: Option<bool>,
    pub show_confidence: Option<bool>,
}

/// GET /api/preferences
pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartPreferences>, AppError> {
    Ok(Json(ChartPreferences::load(&*state.store)?))
}

/// PUT /api/preferences - Merge the provided fields into the saved preferences
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Json(body): Json<UpdatePreferencesRequest>,
) -> Result<Json<ChartPreferences>, AppError> {
    let mut prefs = ChartPreferences::load(&*state.store)?;

    if let Some(granularity) = body.granularity {
        prefs.granularity = granularity;
    }
    if let Some(show) = body.show_forecast {
        prefs.show_forecast = show;
    }
    if let Some(show) = body.show_confidence {
        prefs.show_confidence = show;
    }

    prefs.save(&*state.store)?;
    tracing::debug!(?prefs, "Updated chart preferences");

    Ok(Json(prefs))
}
