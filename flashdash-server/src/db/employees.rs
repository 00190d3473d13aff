use chrono::{DateTime, Utc};
use shared::models::{Employee, EmployeeSummary};
use sqlx::PgPool;

/// Full employee row, password hash included. Never leaves this crate.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub agent_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const SUMMARY_COLUMNS: &str = "id, email, role, agent_name, first_name, last_name, active";

pub async fn list_newest_first(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, email, role, agent_name, first_name, last_name, active,
                created_at, updated_at
         FROM employees ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<EmployeeRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employees WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<EmployeeRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM employees WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

#[allow(clippy::too_many_arguments)]
pub async fn insert(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    role: &str,
    agent_name: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<EmployeeSummary, sqlx::Error> {
    sqlx::query_as(&format!(
        "INSERT INTO employees (email, password_hash, role, agent_name, first_name, last_name, active)
         VALUES ($1, $2, $3, $4, $5, $6, TRUE)
         RETURNING {SUMMARY_COLUMNS}"
    ))
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(agent_name)
    .bind(first_name)
    .bind(last_name)
    .fetch_one(pool)
    .await
}

/// Write back a full set of column values computed by the update builder.
/// The password hash is only touched when `password_hash` is `Some`.
#[allow(clippy::too_many_arguments)]
pub async fn update(
    pool: &PgPool,
    id: i64,
    email: &str,
    role: &str,
    agent_name: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    password_hash: Option<&str>,
) -> Result<Option<EmployeeSummary>, sqlx::Error> {
    sqlx::query_as(&format!(
        "UPDATE employees
         SET email = $2, role = $3, agent_name = $4, first_name = $5, last_name = $6,
             password_hash = COALESCE($7, password_hash), updated_at = now()
         WHERE id = $1
         RETURNING {SUMMARY_COLUMNS}"
    ))
    .bind(id)
    .bind(email)
    .bind(role)
    .bind(agent_name)
    .bind(first_name)
    .bind(last_name)
    .bind(password_hash)
    .fetch_optional(pool)
    .await
}

pub async fn update_password(
    pool: &PgPool,
    id: i64,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE employees SET password_hash = $1, updated_at = now() WHERE id = $2",
    )
    .bind(password_hash)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
