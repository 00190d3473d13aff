//! Database access: one module per table, free functions over `&PgPool`

pub mod access_rules;
pub mod employees;
pub mod reports;
pub mod submissions;
pub mod user_mappings;

/// Postgres unique-constraint violation (duplicate email, duplicate mapping)
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
