use sqlx::PgPool;

use crate::models::{NewRequestLog, RequestLog};

/// Number of rows returned by `/api/logs`.
pub const RECENT_LOGS_LIMIT: i64 = 20;

/// Insert a request log entry.
pub async fn insert_log(pool: &PgPool, entry: &NewRequestLog) -> anyhow::Result<RequestLog> {
    let log = sqlx::query_as::<_, RequestLog>(
        r#"
        INSERT INTO request_logs (method, path, query, status_code, duration_ms)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(&entry.method)
    .bind(&entry.path)
    .bind(&entry.query)
    .bind(entry.status_code)
    .bind(entry.duration_ms)
    .fetch_one(pool)
    .await?;

    Ok(log)
}

/// Get the N most recent log rows, newest first.
pub async fn get_recent_logs(pool: &PgPool, limit: i64) -> anyhow::Result<Vec<RequestLog>> {
    let logs = sqlx::query_as::<_, RequestLog>(
        "SELECT * FROM request_logs ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(logs)
}
