use std::time::Instant;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use metrics::counter;
use sqlx::PgPool;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::db::log_repo;
use crate::models::NewRequestLog;
use crate::AppState;

/// Fire-and-forget handle for request logging. Failures are logged but
/// never reach the caller.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    tx: mpsc::Sender<NewRequestLog>,
}

impl RequestLogger {
    /// Create a logger and the receiving end consumed by [`run_log_writer`].
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<NewRequestLog>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Queue an entry without waiting. Returns false if it was dropped.
    pub fn record(&self, entry: NewRequestLog) -> bool {
        match self.tx.try_send(entry) {
            Ok(()) => true,
            Err(TrySendError::Full(entry)) => {
                counter!("request_logs_dropped_total").increment(1);
                tracing::warn!(path = %entry.path, "Request log buffer full, dropping entry");
                false
            }
            Err(TrySendError::Closed(entry)) => {
                counter!("request_logs_dropped_total").increment(1);
                tracing::warn!(path = %entry.path, "Request log writer stopped, dropping entry");
                false
            }
        }
    }
}

/// Drain queued entries into the database until every logger is dropped.
pub async fn run_log_writer(mut rx: mpsc::Receiver<NewRequestLog>, pool: PgPool) {
    tracing::info!("Request log writer started");

    while let Some(entry) = rx.recv().await {
        match log_repo::insert_log(&pool, &entry).await {
            Ok(_) => {
                counter!("request_logs_written_total").increment(1);
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    method = %entry.method,
                    path = %entry.path,
                    "Failed to write request log"
                );
            }
        }
    }

    tracing::warn!("Request log channel closed");
}

/// Middleware: time each request and queue a log entry once the
/// response has been produced.
pub async fn log_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(logger) = state.request_logger.clone() else {
        return next.run(req).await;
    };

    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(str::to_string);
    let start = Instant::now();

    let response = next.run(req).await;

    logger.record(NewRequestLog {
        method,
        path,
        query,
        status_code: i32::from(response.status().as_u16()),
        duration_ms: start.elapsed().as_secs_f64() * 1000.0,
    });

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str) -> NewRequestLog {
        NewRequestLog {
            method: "GET".into(),
            path: path.into(),
            query: None,
            status_code: 200,
            duration_ms: 1.5,
        }
    }

    #[tokio::test]
    async fn test_record_drops_when_buffer_full() {
        let (logger, mut rx) = RequestLogger::channel(1);

        assert!(logger.record(entry("/first")));
        assert!(!logger.record(entry("/second")));

        let received = rx.recv().await.unwrap();
        assert_eq!(received.path, "/first");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_record_after_writer_gone_does_not_panic() {
        let (logger, rx) = RequestLogger::channel(4);
        drop(rx);
        assert!(!logger.record(entry("/orphan")));
    }

    #[tokio::test]
    async fn test_writer_survives_database_errors() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgres://invalid:1/nba")
            .unwrap();
        let (logger, rx) = RequestLogger::channel(4);

        assert!(logger.record(entry("/unreachable")));
        drop(logger);

        tokio::time::timeout(std::time::Duration::from_secs(10), run_log_writer(rx, pool))
            .await
            .expect("writer should stop once the channel closes");
    }
}
