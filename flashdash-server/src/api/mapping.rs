//! ForthCRM user mapping endpoints

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::error::{AppError, ErrorCode};
use shared::models::{DataStatus, EmployeeSummary, ForthUser, UserMapping};

use crate::db;
use crate::state::AppState;

use super::ApiResult;

fn internal(e: sqlx::Error) -> AppError {
    tracing::error!("Mapping store error: {e}");
    AppError::new(ErrorCode::InternalError)
}

/// GET /api/forthcrm/users
///
/// Live CRM fetch, refreshing the local cache. When the CRM is unreachable
/// the cache is served with a fallback status; 502 only when the cache is
/// empty too.
#[derive(Serialize)]
pub struct ForthUsersResponse {
    pub status: DataStatus,
    pub users: Vec<ForthUser>,
}

pub async fn forth_users(State(state): State<AppState>) -> ApiResult<ForthUsersResponse> {
    if let Some(forth) = &state.forth {
        match forth.fetch_users().await {
            Ok(users) => {
                if let Err(e) = db::user_mappings::upsert_forth_users(&state.pool, &users).await {
                    tracing::error!("Forth user cache refresh failed: {e}");
                }
                return Ok(Json(ForthUsersResponse {
                    status: DataStatus::Live,
                    users,
                }));
            }
            Err(e) => tracing::warn!("Forth users fetch failed, serving cache: {e}"),
        }
    }

    let cached = db::user_mappings::list_forth_users(&state.pool)
        .await
        .map_err(internal)?;
    if cached.is_empty() {
        return Err(AppError::upstream("Forth users unavailable"));
    }

    Ok(Json(ForthUsersResponse {
        status: DataStatus::Fallback,
        users: cached,
    }))
}

/// GET /api/users: internal employees in mapping-friendly shape
#[derive(Serialize)]
pub struct FlashUsersResponse {
    pub users: Vec<EmployeeSummary>,
}

pub async fn flash_users(State(state): State<AppState>) -> ApiResult<FlashUsersResponse> {
    let users = db::employees::list_newest_first(&state.pool)
        .await
        .map_err(internal)?
        .into_iter()
        .map(|e| EmployeeSummary {
            id: e.id,
            email: e.email,
            role: e.role,
            agent_name: e.agent_name,
            first_name: e.first_name,
            last_name: e.last_name,
            active: e.active,
        })
        .collect();
    Ok(Json(FlashUsersResponse { users }))
}

/// GET /api/forthcrm/mapping (alias /get)
#[derive(Serialize)]
pub struct MappingListResponse {
    pub mappings: Vec<UserMapping>,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<MappingListResponse> {
    let mappings = db::user_mappings::list(&state.pool)
        .await
        .map_err(internal)?;
    Ok(Json(MappingListResponse { mappings }))
}

/// POST /api/forthcrm/mapping/set
#[derive(Deserialize)]
pub struct SetRequest {
    #[serde(rename = "forthUserId")]
    pub forth_user_id: String,
    #[serde(rename = "flashUserId")]
    pub flash_user_id: i64,
}

pub async fn set(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> ApiResult<serde_json::Value> {
    db::employees::find_by_id(&state.pool, req.flash_user_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    db::user_mappings::set(&state.pool, &req.forth_user_id, req.flash_user_id)
        .await
        .map_err(internal)?;

    Ok(Json(json!({ "ok": true })))
}

/// POST /api/forthcrm/mapping/delete
#[derive(Deserialize)]
pub struct DeleteRequest {
    #[serde(rename = "forthUserId")]
    pub forth_user_id: String,
}

pub async fn delete(
    State(state): State<AppState>,
    Json(req): Json<DeleteRequest>,
) -> ApiResult<serde_json::Value> {
    let removed = db::user_mappings::delete(&state.pool, &req.forth_user_id)
        .await
        .map_err(internal)?;
    if !removed {
        return Err(AppError::new(ErrorCode::MappingNotFound));
    }
    Ok(Json(json!({ "ok": true })))
}
