use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;

/// Echo the identity the request gate attached; no store lookup.
pub async fn me(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new(StatusCode::OK, (&identity).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub identity_id: String,
    pub role: String,
}

impl From<&AuthenticatedIdentity> for MeResponseData {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            identity_id: identity.identity_id.to_string(),
            role: identity.role.clone(),
        }
    }
}
