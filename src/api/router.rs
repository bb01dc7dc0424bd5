use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::services::request_logger::log_requests;
use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // CORS: the API is consumed from arbitrary front-ends
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health::welcome))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render))
        // Predictions
        .route("/api/nba/predict", get(handlers::predict::predict_player))
        .route("/api/nba/info", get(handlers::info::decision_by_name))
        .route("/api/nba/dataset", post(handlers::dataset::classify_dataset))
        // Request logs
        .route("/api/logs", get(handlers::logs::recent))
        .fallback(handlers::health::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
