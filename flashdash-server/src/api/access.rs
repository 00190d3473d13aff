//! Access-control rule persistence

use axum::{Json, extract::State};
use serde_json::json;
use shared::error::{AppError, ErrorCode};
use shared::models::AccessRuleMap;

use crate::db;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/admin/access returns the persisted role-to-flags map (possibly empty).
/// Merging over the hardcoded defaults is the reader's job.
pub async fn get_rules(State(state): State<AppState>) -> ApiResult<AccessRuleMap> {
    let rules = db::access_rules::fetch_all(&state.pool)
        .await
        .map_err(|e| {
            tracing::error!("Access rules fetch failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    Ok(Json(rules))
}

/// POST /api/admin/access (and its /update alias): wholesale replace
pub async fn save_rules(
    State(state): State<AppState>,
    Json(rules): Json<AccessRuleMap>,
) -> ApiResult<serde_json::Value> {
    db::access_rules::replace_all(&state.pool, &rules)
        .await
        .map_err(|e| {
            tracing::error!("Access rules save failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    Ok(Json(json!({ "ok": true })))
}
