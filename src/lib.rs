pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod inference;
pub mod metrics;
pub mod models;
pub mod services;

use std::sync::Arc;

use crate::inference::Predictor;
use crate::services::request_logger::RequestLogger;

#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    /// Present only when request logging is configured.
    pub db: Option<sqlx::PgPool>,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    pub request_logger: Option<RequestLogger>,
}
