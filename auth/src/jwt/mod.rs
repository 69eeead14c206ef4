//! Signed, expiring session tokens (HS256 JWT).

pub mod claims;
pub mod config;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use config::JwtConfig;
pub use errors::JwtError;
pub use handler::JwtHandler;
