use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::mpsc;
use tower::ServiceExt;

use nba_predict::api::router::create_router;
use nba_predict::inference::Predictor;
use nba_predict::models::NewRequestLog;
use nba_predict::services::request_logger::RequestLogger;
use nba_predict::AppState;

/// Absolute path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Predictor backed by the fixture model: recruitable iff the scaled GP
/// column is strictly above 0.5.
#[allow(dead_code)]
pub fn fixture_predictor() -> Predictor {
    Predictor::load(fixture("classifier.json"), fixture("nba_reference.csv"))
        .expect("Failed to load fixture classifier")
}

/// Router without a database. When `with_logger` is set, the receiving
/// end of the request-log channel is returned for inspection.
#[allow(dead_code)]
pub fn build_test_app(with_logger: bool) -> (axum::Router, Option<mpsc::Receiver<NewRequestLog>>) {
    let (request_logger, log_rx) = if with_logger {
        let (logger, rx) = RequestLogger::channel(16);
        (Some(logger), Some(rx))
    } else {
        (None, None)
    };

    let state = AppState {
        predictor: Arc::new(fixture_predictor()),
        db: None,
        metrics_handle: nba_predict::metrics::detached_handle(),
        request_logger,
    };

    (create_router(state), log_rx)
}

/// Send a request and decode the JSON body.
#[allow(dead_code)]
pub async fn send_json(
    app: axum::Router,
    request: Request<Body>,
) -> (axum::http::StatusCode, serde_json::Value) {
    let resp = app.oneshot(request).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Multipart body with a single `file` part.
#[allow(dead_code)]
pub fn multipart_upload(filename: &str, contents: &str) -> Request<Body> {
    multipart_field("file", filename, contents)
}

/// Multipart body with a single part under an arbitrary field name.
#[allow(dead_code)]
pub fn multipart_field(field: &str, filename: &str, contents: &str) -> Request<Body> {
    let boundary = "nba-predict-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {contents}\r\n\
         --{boundary}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri("/api/nba/dataset")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Connect to the test database and run all migrations.
/// Returns None when `TEST_DATABASE_URL` is not set.
#[allow(dead_code)]
pub async fn setup_test_db() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // Clean tables for test isolation
    sqlx::query("DELETE FROM request_logs").execute(&pool).await.ok();

    Some(pool)
}
