use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::config::JwtConfig;
use super::errors::JwtError;

/// JWT token handler for issuing and verifying session tokens.
///
/// Signs with HS256 (HMAC with SHA-256) and accepts nothing else on the way
/// back in.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration: Duration,
}

impl JwtHandler {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a new JWT handler from startup configuration.
    ///
    /// # Arguments
    /// * `config` - Signing secret and token lifetime
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Errors
    /// * `InvalidConfig` - Secret is blank or lifetime is not positive
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(config: &JwtConfig) -> Result<Self, JwtError> {
        config.validate()?;

        let secret = config.secret.as_bytes();

        let mut validation = Validation::new(Self::ALGORITHM);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            expiration: config.expiration(),
        })
    }

    /// Configured token lifetime.
    pub fn expiration(&self) -> Duration {
        self.expiration
    }

    /// Issue a token for an identity.
    ///
    /// # Arguments
    /// * `subject` - Identity identifier
    /// * `role` - Role name carried in the token
    ///
    /// # Returns
    /// Signed JWT string, valid for the configured lifetime
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiration out of range or token encoding failed
    pub fn issue(&self, subject: &str, role: &str) -> Result<String, JwtError> {
        let claims = Claims::issued_now(subject, role, self.expiration)?;
        self.encode(&claims)
    }

    /// Sign pre-built claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Self::ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `InvalidToken` - Any failure: malformed, wrong algorithm, bad signature, expired
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                JwtError::InvalidToken
            })?;

        let claims = token_data.claims;
        if claims.is_expired(Utc::now().timestamp()) {
            tracing::debug!(exp = claims.exp, "token rejected: expired");
            return Err(JwtError::InvalidToken);
        }

        Ok(claims)
    }
}
