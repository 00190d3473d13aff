use shared::models::{AccessRuleMap, PermissionFlags};
use sqlx::PgPool;

#[derive(sqlx::FromRow)]
struct AccessRuleRow {
    role: String,
    dashboard: bool,
    reports: bool,
    lead_intake: bool,
    user_mapping: bool,
    access_control: bool,
}

/// The persisted rule map. Empty until an admin saves one.
pub async fn fetch_all(pool: &PgPool) -> Result<AccessRuleMap, sqlx::Error> {
    let rows: Vec<AccessRuleRow> = sqlx::query_as("SELECT * FROM access_rules")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            (
                row.role,
                PermissionFlags {
                    dashboard: row.dashboard,
                    reports: row.reports,
                    lead_intake: row.lead_intake,
                    user_mapping: row.user_mapping,
                    access_control: row.access_control,
                },
            )
        })
        .collect())
}

/// Replace the persisted map wholesale in one transaction. The panel always
/// re-sends the full map, so there are no partial-update semantics.
pub async fn replace_all(pool: &PgPool, rules: &AccessRuleMap) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM access_rules")
        .execute(&mut *tx)
        .await?;

    for (role, flags) in rules {
        sqlx::query(
            "INSERT INTO access_rules
                 (role, dashboard, reports, lead_intake, user_mapping, access_control)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(role)
        .bind(flags.dashboard)
        .bind(flags.reports)
        .bind(flags.lead_intake)
        .bind(flags.user_mapping)
        .bind(flags.access_control)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}
