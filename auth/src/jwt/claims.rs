use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Session token claims.
///
/// Carries the identity and its single role plus the RFC 7519 timestamps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Role name; empty when the identity has no role relation
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims issued at `issued_at` and valid for `lifetime`.
    ///
    /// # Arguments
    /// * `subject` - Identity identifier
    /// * `role` - Role name
    /// * `issued_at` - Issue instant
    /// * `lifetime` - Time until the token expires
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration instant is out of the representable range
    pub fn new(
        subject: impl ToString,
        role: impl ToString,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        let expires_at = issued_at.checked_add_signed(lifetime).ok_or_else(|| {
            JwtError::EncodingFailed(format!("expiration out of range: {}", lifetime))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }

    /// Create claims issued now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration instant is out of the representable range
    pub fn issued_now(
        subject: impl ToString,
        role: impl ToString,
        lifetime: Duration,
    ) -> Result<Self, JwtError> {
        Self::new(subject, role, Utc::now(), lifetime)
    }

    /// Check if token is expired.
    ///
    /// A token is still valid at exactly its expiration second.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp > self.exp
    }
}
