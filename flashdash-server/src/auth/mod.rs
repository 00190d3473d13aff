//! Session token authentication
//!
//! Tokens are stateless HS256 JWTs with an 8-hour expiry. Validity is a
//! function of signature and expiry alone; a role change does not affect
//! already-issued tokens.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::state::AppState;

/// JWT claims for employee sessions
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Employee ID
    pub id: i64,
    /// Employee email
    pub email: String,
    /// Role at issuance time
    pub role: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated employee identity extracted from a JWT
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl AuthIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

const TOKEN_EXPIRY_HOURS: i64 = 8;

/// Create a session token for an employee
pub fn create_token(
    id: i64,
    email: &str,
    role: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        id,
        email: email.to_string(),
        role: role.to_string(),
        exp: (now + chrono::Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode a token into claims, enforcing signature and expiry
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// Identity from a request's Authorization header, if a valid token is
/// present. Used by routes that record the caller when known but do not
/// require authentication.
pub fn identity_from_headers(headers: &HeaderMap, secret: &str) -> Option<AuthIdentity> {
    let token = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())?
        .strip_prefix("Bearer ")?;
    let claims = decode_token(token, secret).ok()?;
    Some(AuthIdentity {
        id: claims.id,
        email: claims.email,
        role: claims.role,
    })
}

/// Middleware that extracts and verifies the bearer token, inserting an
/// [`AuthIdentity`] into request extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(AppError::unauthorized)?;

    let claims = decode_token(token, &state.jwt_secret).map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        AppError::invalid_token()
    })?;

    let identity = AuthIdentity {
        id: claims.id,
        email: claims.email,
        role: claims.role,
    };

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Middleware that rejects non-admin identities. Layered inside
/// [`auth_middleware`], so the extension is always present.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let identity = request
        .extensions()
        .get::<AuthIdentity>()
        .ok_or_else(AppError::unauthorized)?;

    if !identity.is_admin() {
        return Err(AppError::permission_denied("Admin access required"));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_roundtrip() {
        let token = create_token(7, "bella@flashdash.io", "opener", SECRET).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();

        assert_eq!(claims.id, 7);
        assert_eq!(claims.email, "bella@flashdash.io");
        assert_eq!(claims.role, "opener");
    }

    #[test]
    fn test_token_expires_in_eight_hours() {
        let token = create_token(1, "a@b.c", "admin", SECRET).unwrap();
        let claims = decode_token(&token, SECRET).unwrap();

        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(1, "a@b.c", "admin", SECRET).unwrap();
        assert!(decode_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_identity_from_headers() {
        let token = create_token(3, "a@b.c", "intake", SECRET).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );

        let identity = identity_from_headers(&headers, SECRET).unwrap();
        assert_eq!(identity.id, 3);
        assert_eq!(identity.role, "intake");
        assert!(!identity.is_admin());
    }

    #[test]
    fn test_identity_from_headers_missing_or_malformed() {
        assert!(identity_from_headers(&HeaderMap::new(), SECRET).is_none());

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Token abc"));
        assert!(identity_from_headers(&headers, SECRET).is_none());

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", HeaderValue::from_static("Bearer garbage"));
        assert!(identity_from_headers(&headers, SECRET).is_none());
    }

    mod middleware {
        use super::super::*;
        use axum::{
            Extension, Router,
            body::Body,
            http::StatusCode,
            middleware,
            routing::get,
        };
        use tower::ServiceExt;

        use crate::state::AppState;

        const SECRET: &str = "test-secret";

        async fn body_string(response: Response) -> String {
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            String::from_utf8(bytes.to_vec()).unwrap()
        }

        fn identity(role: &str) -> AuthIdentity {
            AuthIdentity {
                id: 9,
                email: "someone@flashdash.io".to_string(),
                role: role.to_string(),
            }
        }

        fn admin_router(identity: AuthIdentity) -> Router {
            Router::new()
                .route("/admin/ping", get(|| async { "ok" }))
                .layer(middleware::from_fn(require_admin))
                .layer(Extension(identity))
        }

        fn protected_router() -> Router {
            let state = AppState::for_tests(SECRET);
            Router::new()
                .route("/ping", get(|| async { "ok" }))
                .layer(middleware::from_fn_with_state(state, auth_middleware))
        }

        fn get_request(uri: &str) -> Request {
            Request::builder().uri(uri).body(Body::empty()).unwrap()
        }

        #[tokio::test]
        async fn test_require_admin_allows_admin() {
            let app = admin_router(identity("admin"));
            let response = app.oneshot(get_request("/admin/ping")).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
        }

        #[tokio::test]
        async fn test_require_admin_rejects_other_roles() {
            for role in ["opener", "intake", "agent"] {
                let app = admin_router(identity(role));
                let response = app.oneshot(get_request("/admin/ping")).await.unwrap();

                assert_eq!(response.status(), StatusCode::FORBIDDEN, "role {role}");

                let body = body_string(response).await;
                assert!(body.contains("\"code\":1003"), "body: {body}");
                assert!(body.contains("Admin access required"), "body: {body}");
            }
        }

        #[tokio::test]
        async fn test_auth_middleware_rejects_missing_header() {
            let app = protected_router();
            let response = app.oneshot(get_request("/ping")).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(body_string(response).await.contains("\"code\":1001"));
        }

        #[tokio::test]
        async fn test_auth_middleware_rejects_garbage_token() {
            let app = protected_router();
            let request = Request::builder()
                .uri("/ping")
                .header("Authorization", "Bearer garbage")
                .body(Body::empty())
                .unwrap();
            let response = app.oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(body_string(response).await.contains("\"code\":1002"));
        }

        #[tokio::test]
        async fn test_auth_middleware_accepts_valid_token() {
            let token = create_token(4, "bella@flashdash.io", "opener", SECRET).unwrap();
            let app = protected_router();
            let request = Request::builder()
                .uri("/ping")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap();
            let response = app.oneshot(request).await.unwrap();

            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
