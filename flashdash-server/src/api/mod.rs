//! API routes for flashdash-server

pub mod access;
pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod mapping;
pub mod reports;
pub mod submissions;

use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, post, put};
use axum::{Router, middleware};
use shared::error::AppError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{auth_middleware, require_admin};
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, AppError>;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Open routes: login, env-gated seed, lead intake (intake form is public)
    let public = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/seed", post(auth::seed))
        .route("/submissions/submit-lead", post(submissions::submit_lead));

    // Any authenticated role
    let authenticated = Router::new()
        .route("/api/reports/{section}", get(reports::get_section))
        .route("/api/dashboard/summary", get(dashboard::get_summary))
        .route("/api/forthcrm/sync/status", get(reports::sync_status))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Admin only
    let admin = Router::new()
        .route(
            "/admin/employees",
            get(employees::list).post(employees::create),
        )
        .route(
            "/admin/employees/{id}",
            put(employees::update).delete(employees::delete),
        )
        .route(
            "/admin/employees/{id}/reset-password",
            put(employees::reset_password),
        )
        .route("/admin/export", get(employees::export_csv))
        .route("/api/admin/access", get(access::get_rules).post(access::save_rules))
        .route("/api/admin/access/update", post(access::save_rules))
        .route("/api/forthcrm/users", get(mapping::forth_users))
        .route("/api/users", get(mapping::flash_users))
        .route("/api/forthcrm/mapping", get(mapping::list))
        .route("/api/forthcrm/mapping/get", get(mapping::list))
        .route("/api/forthcrm/mapping/set", post(mapping::set))
        .route("/api/forthcrm/mapping/delete", post(mapping::delete))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/health", get(health::health_check))
        .merge(public)
        .merge(authenticated)
        .merge(admin)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
