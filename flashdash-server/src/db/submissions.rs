use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

/// Append one submission attempt. Rows are never updated afterwards.
pub async fn insert(
    pool: &PgPool,
    employee_id: Option<i64>,
    payload: &Value,
    forth_status: &str,
    forth_response: &Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO submissions (employee_id, payload, forth_status, forth_response)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(employee_id)
    .bind(payload)
    .bind(forth_status)
    .bind(forth_response)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn count_total(pool: &PgPool) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submissions")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn count_between(
    pool: &PgPool,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM submissions WHERE created_at >= $1 AND created_at < $2",
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn count_with_status_between(
    pool: &PgPool,
    forth_status: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM submissions
         WHERE forth_status = $1 AND created_at >= $2 AND created_at < $3",
    )
    .bind(forth_status)
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;
    Ok(count)
}
