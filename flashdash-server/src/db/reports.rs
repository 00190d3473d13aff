use chrono::{DateTime, Utc};
use serde_json::Value;
use shared::models::SyncStatus;
use sqlx::PgPool;

/// Snapshot payload plus its capture time, for freshness checks
#[derive(Debug, sqlx::FromRow)]
pub struct Snapshot {
    pub payload: Value,
    pub captured_at: DateTime<Utc>,
}

pub async fn upsert_report_snapshot(
    pool: &PgPool,
    section: &str,
    range_key: &str,
    rows: &Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO report_snapshots (section, range_key, rows, captured_at)
         VALUES ($1, $2, $3, now())
         ON CONFLICT (section, range_key)
         DO UPDATE SET rows = EXCLUDED.rows, captured_at = EXCLUDED.captured_at",
    )
    .bind(section)
    .bind(range_key)
    .bind(rows)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_report_snapshot(
    pool: &PgPool,
    section: &str,
    range_key: &str,
) -> Result<Option<Snapshot>, sqlx::Error> {
    sqlx::query_as(
        "SELECT rows AS payload, captured_at FROM report_snapshots
         WHERE section = $1 AND range_key = $2",
    )
    .bind(section)
    .bind(range_key)
    .fetch_optional(pool)
    .await
}

pub async fn upsert_summary_snapshot(
    pool: &PgPool,
    role: &str,
    summary: &Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO summary_snapshots (role, summary, captured_at)
         VALUES ($1, $2, now())
         ON CONFLICT (role)
         DO UPDATE SET summary = EXCLUDED.summary, captured_at = EXCLUDED.captured_at",
    )
    .bind(role)
    .bind(summary)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_summary_snapshot(
    pool: &PgPool,
    role: &str,
) -> Result<Option<Snapshot>, sqlx::Error> {
    sqlx::query_as(
        "SELECT summary AS payload, captured_at FROM summary_snapshots WHERE role = $1",
    )
    .bind(role)
    .fetch_optional(pool)
    .await
}

// ========== Sync bookkeeping (single row) ==========

pub async fn record_sync_attempt(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE sync_state SET last_attempt_at = now()")
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn record_sync_success(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE sync_state SET last_success_at = now(), last_error = NULL")
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn record_sync_error(pool: &PgPool, error: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE sync_state SET last_error = $1")
        .bind(error)
        .execute(pool)
        .await?;
    Ok(())
}

#[derive(sqlx::FromRow)]
struct SyncRow {
    last_attempt_at: Option<DateTime<Utc>>,
    last_success_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

pub async fn fetch_sync_status(pool: &PgPool, active: bool) -> Result<SyncStatus, sqlx::Error> {
    let row: SyncRow = sqlx::query_as(
        "SELECT last_attempt_at, last_success_at, last_error FROM sync_state",
    )
    .fetch_one(pool)
    .await?;

    Ok(SyncStatus {
        active,
        last_successful_sync: row.last_success_at,
        last_attempt: row.last_attempt_at,
        last_error: row.last_error,
    })
}
