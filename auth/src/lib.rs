//! Authentication utilities library
//!
//! Credential and session primitives for the identity service:
//! - Password hashing (Argon2id, self-describing PHC strings)
//! - Session token issuing and verification (HS256 JWT with expiry)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{JwtConfig, JwtHandler};
//!
//! let config = JwtConfig {
//!     secret: "secret_key_at_least_32_bytes_long!".to_string(),
//!     expiration_hours: 24,
//! };
//! let handler = JwtHandler::new(&config).unwrap();
//! let token = handler.issue("user123", "user").unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.role, "user");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, JwtConfig};
//!
//! let config = JwtConfig {
//!     secret: "secret_key_at_least_32_bytes_long!".to_string(),
//!     expiration_hours: 24,
//! };
//! let auth = Authenticator::new(&config).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "user123", "user").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtConfig;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
