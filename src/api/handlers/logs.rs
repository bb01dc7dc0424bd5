use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::db::log_repo::{self, RECENT_LOGS_LIMIT};
use crate::models::RequestLog;
use crate::AppState;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// GET /api/logs — Most recent request log rows.
pub async fn recent(State(state): State<AppState>) -> Json<ApiResponse<Vec<RequestLog>>> {
    let Some(db) = &state.db else {
        return Json(ApiResponse {
            success: false,
            data: None,
            error: Some("request logging is disabled".into()),
        });
    };

    match log_repo::get_recent_logs(db, RECENT_LOGS_LIMIT).await {
        Ok(logs) => Json(ApiResponse {
            success: true,
            data: Some(logs),
            error: None,
        }),
        Err(e) => Json(ApiResponse {
            success: false,
            data: None,
            error: Some(e.to_string()),
        }),
    }
}
