use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::NameDecision;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    #[serde(rename = "Name")]
    pub name: String,
}

/// GET /api/nba/info — Decision for a player of the reference dataset.
///
/// An unknown player is still a 200 with an `error` field.
pub async fn decision_by_name(
    State(state): State<AppState>,
    query: Result<Query<InfoQuery>, QueryRejection>,
) -> Result<Json<NameDecision>, AppError> {
    let Query(InfoQuery { name }) = query.map_err(|e| AppError::Validation(e.body_text()))?;

    let predictor = state.predictor.clone();
    let decision = tokio::task::spawn_blocking(move || predictor.predict_by_name(&name)).await??;

    Ok(Json(decision))
}
