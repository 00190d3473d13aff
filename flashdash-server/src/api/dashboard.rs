//! Dashboard summary endpoint

use axum::extract::{Query, State};
use axum::Extension;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use shared::error::{AppError, ErrorCode};
use shared::models::{DashboardSummary, DataStatus, SummaryResponse};

use crate::api::reports::is_fresh;
use crate::auth::AuthIdentity;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

#[derive(Deserialize)]
pub struct SummaryQuery {
    pub role: Option<String>,
}

/// GET /api/dashboard/summary?role=
///
/// The role parameter picks the summary flavor (pending label, metrics);
/// it defaults to the caller's own role.
pub async fn get_summary(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<SummaryResponse> {
    let role = query.role.unwrap_or(identity.role);

    let snapshot = db::reports::fetch_summary_snapshot(&state.pool, &role)
        .await
        .map_err(|e| {
            tracing::error!("Summary snapshot fetch failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    let response = match snapshot {
        Some(snap) if is_fresh(snap.captured_at, Utc::now(), state.sync_interval_secs) => {
            let summary: DashboardSummary =
                serde_json::from_value(snap.payload).map_err(|e| {
                    tracing::error!("Stored summary has an unexpected shape: {e}");
                    AppError::new(ErrorCode::InternalError)
                })?;
            SummaryResponse {
                status: DataStatus::Live,
                summary,
            }
        }
        _ => SummaryResponse {
            status: DataStatus::Fallback,
            summary: DashboardSummary::fallback(&role),
        },
    };

    Ok(Json(response))
}
