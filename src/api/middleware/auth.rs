//! Bearer token authentication middleware.
//!
//! Extracts `Authorization: Bearer <token>`, validates against the
//! `AuthRegistry`, and injects the resolved [`Identity`] into request
//! extensions for downstream handlers. Requests that fail here never
//! reach the core.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

/// Require a valid bearer token on every request passing through.
///
/// Accesses `ApiContext` from request extensions (injected by the
/// Extension layer, which must be outermost).
pub async fn require_auth(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_auth_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_auth_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthorized)?;

    let identity = ctx.auth().resolve(token).ok_or(ApiError::Unauthorized)?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
