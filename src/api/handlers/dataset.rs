use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;

use crate::errors::AppError;
use crate::inference::Dataset;
use crate::models::{DatasetDecision, NOT_CSV_MESSAGE};
use crate::AppState;

/// Multipart field carrying the uploaded CSV.
const FILE_FIELD: &str = "file";

/// POST /api/nba/dataset — Batch predictions over an uploaded CSV.
pub async fn classify_dataset(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DatasetDecision>, AppError> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.ends_with(".csv") {
            tracing::info!(filename = %filename, "Rejected non-CSV upload");
            return Ok(Json(DatasetDecision::Rejected {
                error: NOT_CSV_MESSAGE.to_string(),
            }));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        tracing::debug!(filename = %filename, size = bytes.len(), "Dataset upload received");

        let predictor = state.predictor.clone();
        let decision = tokio::task::spawn_blocking(move || -> Result<DatasetDecision, AppError> {
            let dataset = Dataset::from_csv_bytes(&bytes)?;
            Ok(predictor.predict_dataset(&dataset)?)
        })
        .await??;

        return Ok(Json(decision));
    }

    Err(AppError::Validation(format!(
        "missing multipart field `{FILE_FIELD}`"
    )))
}
