//! Admin employee CRUD, password reset and CSV export

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use shared::models::{Employee, EmployeeSummary, Role};
use shared::types::Field;

use crate::db;
use crate::db::employees::EmployeeRow;
use crate::state::AppState;
use crate::util::hash_password;

use super::ApiResult;

const MIN_PASSWORD_LEN: usize = 6;

fn db_error(e: sqlx::Error) -> AppError {
    if db::is_unique_violation(&e) {
        AppError::with_message(ErrorCode::DuplicateEmail, "Email already exists")
    } else {
        tracing::error!("Employee store error: {e}");
        AppError::new(ErrorCode::InternalError)
    }
}

/// GET /admin/employees
#[derive(Serialize)]
pub struct ListResponse {
    pub employees: Vec<Employee>,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<ListResponse> {
    let employees = db::employees::list_newest_first(&state.pool)
        .await
        .map_err(db_error)?;
    Ok(Json(ListResponse { employees }))
}

/// POST /admin/employees
#[derive(Deserialize)]
pub struct CreateRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "agentName")]
    pub agent_name: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

#[derive(Serialize)]
pub struct EmployeeResponse {
    pub employee: EmployeeSummary,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateRequest>,
) -> ApiResult<EmployeeResponse> {
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

    let role = match req.role.as_deref() {
        None => Role::default(),
        Some(value) => Role::parse(value)
            .ok_or_else(|| AppError::new(ErrorCode::InvalidRole))?,
    };

    let password_hash = hash_password(&password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let employee = db::employees::insert(
        &state.pool,
        &email,
        &password_hash,
        role.as_str(),
        req.agent_name.as_deref(),
        req.first_name.as_deref(),
        req.last_name.as_deref(),
    )
    .await
    .map_err(db_error)?;

    Ok(Json(EmployeeResponse { employee }))
}

/// PUT /admin/employees/{id}
///
/// Three-state partial update: omitted keys keep the stored value, explicit
/// nulls clear name fields, set values replace. The distinction comes from
/// [`Field`]; the admin panel relies on it to clear display names.
#[derive(Default, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub email: Field<String>,
    #[serde(default)]
    pub role: Field<String>,
    #[serde(default, rename = "agentName")]
    pub agent_name: Field<String>,
    #[serde(default, rename = "firstName")]
    pub first_name: Field<String>,
    #[serde(default, rename = "lastName")]
    pub last_name: Field<String>,
    #[serde(default)]
    pub password: Field<String>,
}

/// Column values an update resolves to. `new_password` is `None` whenever the
/// request carried no usable password, which leaves the stored hash alone.
#[derive(Debug, PartialEq)]
pub struct ResolvedUpdate {
    pub email: String,
    pub role: String,
    pub agent_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub new_password: Option<String>,
}

/// Merge an update request over the current row, validating provided fields.
/// Pure so the omitted/cleared/set semantics stay testable without a store.
pub fn resolve_update(current: &EmployeeRow, req: UpdateRequest) -> Result<ResolvedUpdate, AppError> {
    let email = match req.email {
        Field::Omitted => current.email.clone(),
        // An employee without an email cannot log in; reject rather than store ""
        Field::Cleared => return Err(AppError::new(ErrorCode::InvalidEmail)),
        Field::Set(value) => {
            if !value.contains('@') {
                return Err(AppError::new(ErrorCode::InvalidEmail));
            }
            value
        }
    };

    let role = match req.role {
        Field::Omitted => current.role.clone(),
        Field::Cleared => return Err(AppError::new(ErrorCode::InvalidRole)),
        Field::Set(value) => Role::parse(&value)
            .ok_or_else(|| AppError::new(ErrorCode::InvalidRole))?
            .as_str()
            .to_string(),
    };

    // Name fields: provided empties are stored as "", distinguishing
    // "cleared" from "not sent".
    let agent_name = req
        .agent_name
        .provided()
        .map_or_else(|| current.agent_name.clone(), Some);
    let first_name = req
        .first_name
        .provided()
        .map_or_else(|| current.first_name.clone(), Some);
    let last_name = req
        .last_name
        .provided()
        .map_or_else(|| current.last_name.clone(), Some);

    // Password is rehashed only for a non-empty value; empty/null means
    // "leave it alone", matching the admin panel's blank password box.
    let new_password = match req.password {
        Field::Set(value) if !value.is_empty() => {
            if value.len() < MIN_PASSWORD_LEN {
                return Err(AppError::new(ErrorCode::PasswordTooShort));
            }
            Some(value)
        }
        _ => None,
    };

    Ok(ResolvedUpdate {
        email,
        role,
        agent_name,
        first_name,
        last_name,
        new_password,
    })
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRequest>,
) -> ApiResult<EmployeeResponse> {
    let current = db::employees::find_by_id(&state.pool, id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    let resolved = resolve_update(&current, req)?;

    let password_hash = match &resolved.new_password {
        Some(password) => Some(hash_password(password).map_err(|e| {
            tracing::error!("Password hashing failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?),
        None => None,
    };

    let employee = db::employees::update(
        &state.pool,
        id,
        &resolved.email,
        &resolved.role,
        resolved.agent_name.as_deref(),
        resolved.first_name.as_deref(),
        resolved.last_name.as_deref(),
        password_hash.as_deref(),
    )
    .await
    .map_err(db_error)?
    .ok_or_else(|| AppError::new(ErrorCode::EmployeeNotFound))?;

    Ok(Json(EmployeeResponse { employee }))
}

/// DELETE /admin/employees/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<serde_json::Value> {
    let deleted = db::employees::delete(&state.pool, id)
        .await
        .map_err(db_error)?;
    if !deleted {
        return Err(AppError::new(ErrorCode::EmployeeNotFound));
    }
    Ok(Json(
        serde_json::json!({ "message": "Employee deleted successfully" }),
    ))
}

/// PUT /admin/employees/{id}/reset-password
#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(rename = "newPassword")]
    pub new_password: Option<String>,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<ResetPasswordRequest>,
) -> ApiResult<serde_json::Value> {
    let password = req.new_password.unwrap_or_default();
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort));
    }

    let hash = hash_password(&password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;

    let updated = db::employees::update_password(&state.pool, id, &hash)
        .await
        .map_err(db_error)?;
    if !updated {
        return Err(AppError::new(ErrorCode::EmployeeNotFound));
    }

    Ok(Json(
        serde_json::json!({ "message": "Password reset successfully" }),
    ))
}

/// GET /admin/export: employee list as a CSV attachment
pub async fn export_csv(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let employees = db::employees::list_newest_first(&state.pool)
        .await
        .map_err(db_error)?;

    let csv = employees_to_csv(&employees);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"employees.csv\"",
            ),
        ],
        csv,
    ))
}

fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

fn employees_to_csv(employees: &[Employee]) -> String {
    let mut out = String::from("id,email,role,agentName,firstName,lastName,active,created_at\n");
    for e in employees {
        let fields = [
            e.id.to_string(),
            e.email.clone(),
            e.role.clone(),
            e.agent_name.clone().unwrap_or_default(),
            e.first_name.clone().unwrap_or_default(),
            e.last_name.clone().unwrap_or_default(),
            e.active.to_string(),
            e.created_at.to_rfc3339(),
        ];
        let line: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }
    out
}
