use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::errors::AppError;
use crate::AppState;

pub const WELCOME_MESSAGE: &str = "Le serveur NBA prediction a démarré !";

/// GET / — Welcome banner.
pub async fn welcome() -> impl IntoResponse {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// GET /health — Liveness, plus a database ping when logging is configured.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let Some(db) = &state.db else {
        return (StatusCode::OK, Json(json!({ "status": "healthy" })));
    };

    let db_ok = sqlx::query("SELECT 1").execute(db).await.is_ok();

    if db_ok {
        (StatusCode::OK, Json(json!({ "status": "healthy" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unhealthy", "db": "disconnected" })),
        )
    }
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
