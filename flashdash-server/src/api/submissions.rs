//! Lead submission proxy

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{Map, Value, json};
use shared::error::{AppError, ErrorCode};
use shared::models::{missing_fields, sanitize_payload};

use crate::state::AppState;
use crate::{auth, db};

use super::ApiResult;

/// POST /submissions/submit-lead
///
/// Validates the required field set, forwards form-encoded to ForthCRM, and
/// appends a submission record for every attempt, failures included. The
/// route is open (the intake form has no login), but a valid bearer token
/// attributes the submission to its employee.
pub async fn submit_lead(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(raw): Json<Map<String, Value>>,
) -> ApiResult<Value> {
    let employee_id = auth::identity_from_headers(&headers, &state.jwt_secret).map(|i| i.id);

    let sanitized = sanitize_payload(&raw);

    let missing = missing_fields(&sanitized);
    if !missing.is_empty() {
        // Validation failures write nothing; no attempt was made upstream.
        return Err(AppError::with_message(
            ErrorCode::MissingFields,
            format!("Missing required fields: {}", missing.join(", ")),
        )
        .with_detail("missing", json!(missing))
        .with_detail("received", Value::Object(sanitized)));
    }

    let forth = state
        .forth
        .as_ref()
        .ok_or_else(|| AppError::misconfigured("FORTH_CRM_URL not configured"))?;

    match forth.submit_lead(&sanitized).await {
        Ok(forth_response) => {
            db::submissions::insert(
                &state.pool,
                employee_id,
                &Value::Object(sanitized),
                "success",
                &forth_response,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to record submission: {e}");
                AppError::new(ErrorCode::InternalError)
            })?;

            Ok(Json(json!({ "ok": true, "forth_response": forth_response })))
        }
        Err(err) => {
            tracing::error!("Forth error: {err}");
            let detail = err.detail();

            // Best-effort failure record: its own failure is logged and
            // swallowed so the caller still sees the upstream error.
            if let Err(db_err) = db::submissions::insert(
                &state.pool,
                employee_id,
                &Value::Object(raw),
                "error",
                &detail,
            )
            .await
            {
                tracing::error!("Failed to save error to database: {db_err}");
            }

            Err(
                AppError::with_message(ErrorCode::UpstreamFailure, "Failed to submit to Forth")
                    .with_detail("details", detail),
            )
        }
    }
}
