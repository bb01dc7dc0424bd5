use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the request_logs table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RequestLog {
    pub id: Uuid,
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub status_code: i32,
    pub duration_ms: f64,
    pub created_at: DateTime<Utc>,
}

/// Entry queued by the logging middleware, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRequestLog {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub status_code: i32,
    pub duration_ms: f64,
}
