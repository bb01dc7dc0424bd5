use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;

use crate::errors::AppError;
use crate::models::{PlayerStats, PredictionResponse};
use crate::AppState;

/// GET /api/nba/predict — Prediction from the 19 statistics passed as query parameters.
pub async fn predict_player(
    State(state): State<AppState>,
    stats: Result<Query<PlayerStats>, QueryRejection>,
) -> Result<Json<PredictionResponse>, AppError> {
    let Query(stats) = stats.map_err(|e| AppError::Validation(e.body_text()))?;

    let response = state.predictor.predict_stats(&stats)?;
    Ok(Json(response))
}
