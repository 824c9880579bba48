//! Assistant handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use surplus_core::store::{last_answer, save_last_answer};
use surplus_core::{classify, ChartPreferences, Granularity, Intent, SurplusAnalysis};

use crate::{AppError, AppState, MAX_QUESTION_LEN};

/// Request body for asking a question
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
    /// Chart view to answer about (defaults to the saved preference)
    pub granularity: Option<Granularity>,
    /// Whether the forecast toggle is on (defaults to the saved preference)
    pub forecast_enabled: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub intent: Intent,
    pub granularity: Granularity,
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct LastAnswerResponse {
    pub answer: Option<String>,
}

/// POST /api/ask - Answer a question about the current chart
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AskRequest>,
) -> Result<Json<AskResponse>, AppError> {
    let question = body.question.trim();
    if question.is_empty() {
        return Err(AppError::bad_request("Question cannot be empty"));
    }
    if question.chars().count() > MAX_QUESTION_LEN {
        return Err(AppError::bad_request(&format!(
            "Question exceeds maximum length of {} characters",
            MAX_QUESTION_LEN
        )));
    }

    let prefs = ChartPreferences::load(&*state.store)?;
    let granularity = body.granularity.unwrap_or(prefs.granularity);
    let forecast_enabled = body.forecast_enabled.unwrap_or(prefs.show_forecast);

    let series = state.series.series(granularity)?;
    let analysis = SurplusAnalysis::run(series, granularity, &state.forecast);
    let answer = analysis.answer(question, forecast_enabled, &state.forecast);
    let intent = classify(question);

    tracing::info!(intent = intent.as_str(), granularity = %granularity, "Answered question");

    save_last_answer(&*state.store, &answer)?;

    Ok(Json(AskResponse {
        intent,
        granularity,
        answer,
    }))
}

/// GET /api/ask/last - Most recent answer (for re-speaking)
pub async fn get_last_answer(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LastAnswerResponse>, AppError> {
    Ok(Json(LastAnswerResponse {
        answer: last_answer(&*state.store)?,
    }))
}
