use std::sync::Arc;

use nba_predict::api::router::create_router;
use nba_predict::config::AppConfig;
use nba_predict::inference::Predictor;
use nba_predict::services::request_logger::{run_log_writer, RequestLogger};
use nba_predict::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    // The model is loaded once; a missing or incompatible artifact aborts startup.
    tracing::info!(path = %config.model_path.display(), "Loading classifier...");
    let predictor = Predictor::load(&config.model_path, config.reference_dataset_path.clone())?;
    tracing::info!(
        reference = %predictor.reference_path().display(),
        "Predictor ready"
    );

    let metrics_handle = metrics::init_metrics();

    // --- Optional request logging: middleware → channel → writer task ---
    let (db, request_logger) = match (&config.database_url, config.request_logging()) {
        (Some(url), true) => {
            tracing::info!("Connecting to database...");
            let pool = db::init_pool(url).await?;
            tracing::info!("Database connected");

            let (logger, log_rx) = RequestLogger::channel(config.request_log_buffer);
            let writer_pool = pool.clone();
            tokio::spawn(async move {
                run_log_writer(log_rx, writer_pool).await;
            });

            (Some(pool), Some(logger))
        }
        _ => {
            tracing::info!("Request logging disabled (DATABASE_URL unset or REQUEST_LOG_ENABLED=false)");
            (None, None)
        }
    };

    let state = AppState {
        predictor: Arc::new(predictor),
        db,
        metrics_handle,
        request_logger,
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}
