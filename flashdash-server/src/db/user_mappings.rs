use shared::models::{EmployeeSummary, ForthUser, UserMapping};
use sqlx::PgPool;

/// Refresh the CRM user cache. One transaction so a mapping listing never
/// sees a half-written refresh.
pub async fn upsert_forth_users(pool: &PgPool, users: &[ForthUser]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    for user in users {
        sqlx::query(
            "INSERT INTO forth_users (id, name, email, fetched_at)
             VALUES ($1, $2, $3, now())
             ON CONFLICT (id)
             DO UPDATE SET name = EXCLUDED.name, email = EXCLUDED.email,
                           fetched_at = EXCLUDED.fetched_at",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

pub async fn list_forth_users(pool: &PgPool) -> Result<Vec<ForthUser>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, email FROM forth_users ORDER BY name NULLS LAST, id")
        .fetch_all(pool)
        .await
}

/// Raw mapping join row; the employee columns are nullable because the
/// linked employee may have been deleted
#[derive(sqlx::FromRow)]
struct MappingRow {
    forth_user_id: String,
    flash_user_id: i64,
    forth_user: String,
    flash_email: Option<String>,
    flash_role: Option<String>,
    flash_agent_name: Option<String>,
    flash_first_name: Option<String>,
    flash_last_name: Option<String>,
    flash_active: Option<bool>,
}

impl MappingRow {
    /// Employee-side display name via [`EmployeeSummary::display_name`]
    fn resolve(self) -> UserMapping {
        let flash_user = self.flash_email.map(|email| {
            EmployeeSummary {
                id: self.flash_user_id,
                email,
                role: self.flash_role.unwrap_or_default(),
                agent_name: self.flash_agent_name,
                first_name: self.flash_first_name,
                last_name: self.flash_last_name,
                active: self.flash_active.unwrap_or(false),
            }
            .display_name()
        });

        UserMapping {
            forth_user_id: self.forth_user_id,
            flash_user_id: self.flash_user_id,
            forth_user: Some(self.forth_user),
            flash_user,
        }
    }
}

/// All mapping records with display names resolved from the CRM cache and
/// the employee table
pub async fn list(pool: &PgPool) -> Result<Vec<UserMapping>, sqlx::Error> {
    let rows: Vec<MappingRow> = sqlx::query_as(
        "SELECT m.forth_user_id, m.flash_user_id,
                COALESCE(f.name, f.email, m.forth_user_id) AS forth_user,
                e.email AS flash_email,
                e.role AS flash_role,
                e.agent_name AS flash_agent_name,
                e.first_name AS flash_first_name,
                e.last_name AS flash_last_name,
                e.active AS flash_active
         FROM user_mappings m
         LEFT JOIN forth_users f ON f.id = m.forth_user_id
         LEFT JOIN employees e ON e.id = m.flash_user_id
         ORDER BY m.created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(MappingRow::resolve).collect())
}

/// Upsert by CRM user id; a re-link replaces the previous employee
pub async fn set(pool: &PgPool, forth_user_id: &str, flash_user_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO user_mappings (forth_user_id, flash_user_id)
         VALUES ($1, $2)
         ON CONFLICT (forth_user_id) DO UPDATE SET flash_user_id = EXCLUDED.flash_user_id",
    )
    .bind(forth_user_id)
    .bind(flash_user_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn delete(pool: &PgPool, forth_user_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM user_mappings WHERE forth_user_id = $1")
        .bind(forth_user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(email: Option<&str>, agent: Option<&str>, first: Option<&str>) -> MappingRow {
        MappingRow {
            forth_user_id: "f-100".to_string(),
            flash_user_id: 7,
            forth_user: "Carlos".to_string(),
            flash_email: email.map(str::to_string),
            flash_role: email.map(|_| "opener".to_string()),
            flash_agent_name: agent.map(str::to_string),
            flash_first_name: first.map(str::to_string),
            flash_last_name: first.map(|_| "Reyes".to_string()),
            flash_active: email.map(|_| true),
        }
    }

    #[test]
    fn test_resolve_prefers_agent_name() {
        let mapping = row(Some("bella@flashdash.io"), Some("Bella"), Some("Isabella")).resolve();
        assert_eq!(mapping.flash_user.as_deref(), Some("Bella"));
        assert_eq!(mapping.forth_user.as_deref(), Some("Carlos"));
    }

    #[test]
    fn test_resolve_falls_back_to_full_name_then_email() {
        let mapping = row(Some("bella@flashdash.io"), None, Some("Isabella")).resolve();
        assert_eq!(mapping.flash_user.as_deref(), Some("Isabella Reyes"));

        let mapping = row(Some("bella@flashdash.io"), None, None).resolve();
        assert_eq!(mapping.flash_user.as_deref(), Some("bella@flashdash.io"));
    }

    #[test]
    fn test_resolve_deleted_employee_has_no_flash_name() {
        let mapping = row(None, None, None).resolve();
        assert!(mapping.flash_user.is_none());
        assert_eq!(mapping.flash_user_id, 7);
    }
}
