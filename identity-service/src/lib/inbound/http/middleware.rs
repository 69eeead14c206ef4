use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::UNAUTHORIZED;
use crate::domain::identity::models::IdentityId;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Caller identity attached to the request after a token passes the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    pub identity_id: IdentityId,
    pub role: String,
}

/// Middleware that validates bearer tokens and adds the caller to request extensions.
///
/// Every rejection produces the same 401 response; the cause goes to the log only.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        unauthorized()
    })?;

    let identity_id = IdentityId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not an identity ID");
        unauthorized()
    })?;

    req.extensions_mut().insert(AuthenticatedIdentity {
        identity_id,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            unauthorized()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::warn!("Authorization header is not valid ASCII");
        unauthorized()
    })?;

    auth_str.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        tracing::warn!("Authorization header is not a bearer credential");
        unauthorized()
    })
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized(UNAUTHORIZED.to_string())
}
