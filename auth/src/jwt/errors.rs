use thiserror::Error;

/// Error type for JWT operations.
///
/// Every verification failure (bad signature, unexpected algorithm, expiry,
/// malformed input) collapses into `InvalidToken` so callers cannot leak
/// which check failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Invalid JWT configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token")]
    InvalidToken,
}
