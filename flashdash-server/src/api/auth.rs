//! Authentication endpoints: login and the env-gated dev seed

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::SessionUser;

use crate::state::AppState;
use crate::util::{hash_password, verify_password};
use crate::{auth, db};

use super::ApiResult;

/// POST /auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: SessionUser,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(AppError::with_message(
            ErrorCode::MissingFields,
            "Email and password required",
        ));
    };
    if email.is_empty() || password.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::MissingFields,
            "Email and password required",
        ));
    }

    // Unknown email, inactive account and wrong password all take the same
    // exit so the response cannot distinguish them.
    let employee = db::employees::find_by_email(&state.pool, &email)
        .await
        .map_err(|e| {
            tracing::error!("DB error during login: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(AppError::invalid_credentials)?;

    if !employee.active || !verify_password(&password, &employee.password_hash) {
        return Err(AppError::invalid_credentials());
    }

    let token = auth::create_token(
        employee.id,
        &employee.email,
        &employee.role,
        &state.jwt_secret,
    )
    .map_err(|e| {
        tracing::error!("JWT creation failed: {e}");
        AppError::misconfigured("Server misconfiguration")
    })?;

    Ok(Json(LoginResponse {
        token,
        user: SessionUser {
            id: employee.id,
            email: employee.email,
            role: employee.role,
        },
    }))
}

/// POST /auth/seed
///
/// Bootstraps one admin account. Credentials come from server configuration,
/// never from the request body, and the route is dead in production.
pub async fn seed(State(state): State<AppState>) -> ApiResult<serde_json::Value> {
    if !state.seed_allowed {
        return Err(AppError::new(ErrorCode::SeedDisabled));
    }

    let (Some(email), Some(password)) = (&state.seed_email, &state.seed_password) else {
        return Err(AppError::misconfigured("Seed credentials not configured"));
    };

    let hash = hash_password(password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    db::employees::insert(&state.pool, email, &hash, "admin", None, None, None)
        .await
        .map_err(|e| {
            if db::is_unique_violation(&e) {
                AppError::with_message(ErrorCode::DuplicateEmail, e.to_string())
            } else {
                tracing::error!("Seed insert failed: {e}");
                AppError::new(ErrorCode::InternalError)
            }
        })?;

    Ok(Json(serde_json::json!({ "ok": true })))
}
