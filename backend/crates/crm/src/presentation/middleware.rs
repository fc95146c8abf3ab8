//! Auth Middleware
//!
//! Bearer token gate for protected routes and the admin-only gate layered
//! on top of it.

use axum::body::Body;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::CrmConfig;
use crate::domain::value_object::{UserId, UserRole};
use crate::error::CrmError;

/// Middleware state for the bearer token gate
#[derive(Clone)]
pub struct AuthGateState {
    pub config: Arc<CrmConfig>,
}

/// Authenticated caller, inserted into request extensions by `require_auth`
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub id: UserId,
    pub role: UserRole,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Middleware that requires a valid bearer token.
///
/// Missing or malformed `Authorization` header is 401 "Unauthorized";
/// a token that fails verification (bad signature, malformed, expired)
/// is 401 "Invalid token".
pub async fn require_auth(
    state: AuthGateState,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = match bearer_token(&req) {
        Some(token) => token,
        None => return Err(CrmError::Unauthorized.into_response()),
    };

    let claims = state
        .config
        .token_codec()
        .verify(token)
        .map_err(|e| CrmError::from(e).into_response())?;

    let role = match UserRole::parse(&claims.role) {
        Some(role) => role,
        None => return Err(CrmError::InvalidToken.into_response()),
    };

    req.extensions_mut().insert(AuthUser {
        id: UserId::from_i64(claims.sub),
        role,
    });

    Ok(next.run(req).await)
}

/// Middleware that requires the authenticated caller to be an admin.
///
/// Runs inside `require_auth`, so a missing `AuthUser` extension means
/// the request never passed the token gate.
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, Response> {
    match req.extensions().get::<AuthUser>() {
        Some(user) if user.is_admin() => Ok(next.run(req).await),
        Some(_) => Err(CrmError::Forbidden.into_response()),
        None => Err(CrmError::Unauthorized.into_response()),
    }
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    let header = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}
