use std::fmt;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;

use super::errors::JwtError;

/// Token signing configuration, loaded once at startup.
///
/// Deserializable so services can embed it directly in their own
/// configuration tree.
#[derive(Clone, Deserialize)]
pub struct JwtConfig {
    /// Symmetric HMAC secret
    pub secret: String,
    /// Token lifetime in hours
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// Longest accepted token lifetime: one year.
    pub const MAX_EXPIRATION_HOURS: i64 = 24 * 365;

    /// Check the startup preconditions for token signing.
    ///
    /// # Errors
    /// * `InvalidConfig` - Secret is blank, or expiration is not a positive
    ///   number of hours up to `MAX_EXPIRATION_HOURS`
    pub fn validate(&self) -> Result<(), JwtError> {
        if self.secret.trim().is_empty() {
            return Err(JwtError::InvalidConfig("secret must not be empty".to_string()));
        }

        if self.expiration_hours <= 0 {
            return Err(JwtError::InvalidConfig(format!(
                "expiration_hours must be positive, got {}",
                self.expiration_hours
            )));
        }

        if self.expiration_hours > Self::MAX_EXPIRATION_HOURS {
            return Err(JwtError::InvalidConfig(format!(
                "expiration_hours must be at most {}, got {}",
                Self::MAX_EXPIRATION_HOURS,
                self.expiration_hours
            )));
        }

        Duration::try_hours(self.expiration_hours)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .map(|_| ())
            .ok_or_else(|| {
                JwtError::InvalidConfig(format!(
                    "expiration_hours out of range: {}",
                    self.expiration_hours
                ))
            })
    }

    /// Token lifetime as a duration.
    pub fn expiration(&self) -> Duration {
        Duration::try_hours(self.expiration_hours).unwrap_or_else(Duration::zero)
    }
}

// Keep the secret out of logs.
impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}
