use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;
use auth::PasswordError;
use tokio::task::JoinError;

use crate::domain::identity::models::AuthToken;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::PasswordHash;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::DEFAULT_ROLE;
use crate::identity::errors::AuthError;
use crate::identity::errors::IdentityError;
use crate::identity::ports::AuthServicePort;
use crate::identity::ports::IdentityRepository;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    authenticator: Arc<Authenticator>,
}

impl<IR> AuthService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity store implementation
    /// * `authenticator` - Password hasher and token codec
    pub fn new(repository: Arc<IR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Argon2 is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: Password) -> Result<PasswordHash, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.as_str()))
            .await
            .map_err(classify_join_error)?
            .map(PasswordHash::new)
            .map_err(classify_password_error)
    }
}

#[async_trait]
impl<IR> AuthServicePort for AuthService<IR>
where
    IR: IdentityRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthToken, AuthError> {
        let RegisterCommand {
            username,
            email,
            password,
        } = command;

        if self
            .repository
            .find_by_username(&username)
            .await
            .map_err(classify_store_error)?
            .is_some()
        {
            tracing::info!("Registration rejected: username already registered");
            return Err(AuthError::AlreadyRegistered);
        }

        if self
            .repository
            .find_by_email(email.as_str())
            .await
            .map_err(classify_store_error)?
            .is_some()
        {
            tracing::info!("Registration rejected: email already registered");
            return Err(AuthError::AlreadyRegistered);
        }

        let password_hash = self.hash_password(password).await?;

        let role = self
            .repository
            .find_role_by_name(DEFAULT_ROLE)
            .await
            .map_err(classify_store_error)?
            .ok_or_else(|| {
                tracing::error!(role = DEFAULT_ROLE, "Default role is missing from the store");
                AuthError::Configuration(format!("default role '{}' is missing", DEFAULT_ROLE))
            })?;

        let identity = Identity::new(username, email, password_hash, role);

        // Signed before the insert so a token failure leaves nothing behind.
        let token = self
            .authenticator
            .issue_token(&identity.id.to_string(), identity.role_name())
            .map_err(classify_token_error)?;

        let created = self
            .repository
            .create(identity)
            .await
            .map_err(|e| match e {
                IdentityError::UsernameAlreadyExists(_) | IdentityError::EmailAlreadyExists(_) => {
                    tracing::info!("Registration rejected: unique constraint violated");
                    AuthError::AlreadyRegistered
                }
                other => classify_store_error(other),
            })?;

        tracing::info!(identity_id = %created.id, role = created.role_name(), "Identity registered");

        Ok(AuthToken { token })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthToken, AuthError> {
        let LoginCommand { email, password } = command;

        let Some(identity) = self
            .repository
            .find_by_email(&email)
            .await
            .map_err(classify_store_error)?
        else {
            // One Argon2 verification, same as a wrong password.
            let authenticator = Arc::clone(&self.authenticator);
            tokio::task::spawn_blocking(move || authenticator.reject_unknown(&password))
                .await
                .map_err(classify_join_error)?;

            tracing::warn!("Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        // Every identity is created with a role, so a missing relation points
        // at broken data. The token still goes out with an empty role.
        if identity.role.is_none() {
            tracing::warn!(
                identity_id = %identity.id,
                role_id = %identity.role_id,
                "Identity has no role relation; issuing token with empty role"
            );
        }

        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = identity.password_hash.as_str().to_string();
        let subject = identity.id.to_string();
        let role = identity.role_name().to_string();

        let outcome = tokio::task::spawn_blocking(move || {
            authenticator
                .authenticate(&password, &stored_hash, &subject, &role)
                .map(|result| result.access_token)
        })
        .await
        .map_err(classify_join_error)?;

        match outcome {
            Ok(token) => {
                tracing::info!(identity_id = %identity.id, "Login succeeded");
                Ok(AuthToken { token })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!("Login rejected: invalid credentials");
                Err(AuthError::InvalidCredentials)
            }
            Err(AuthenticationError::PasswordError(e)) => {
                tracing::error!(identity_id = %identity.id, "Stored password hash is unusable");
                Err(classify_password_error(e))
            }
            Err(AuthenticationError::JwtError(e)) => Err(classify_token_error(e)),
        }
    }

    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, AuthError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(classify_store_error)?
            .ok_or(AuthError::IdentityNotFound)
    }
}

fn classify_store_error(err: IdentityError) -> AuthError {
    tracing::error!(error = %err, "Identity store failure");
    AuthError::Internal(err.to_string())
}

fn classify_password_error(err: PasswordError) -> AuthError {
    tracing::error!(error = %err, "Password hashing failure");
    AuthError::Internal(err.to_string())
}

fn classify_token_error(err: JwtError) -> AuthError {
    tracing::error!(error = %err, "Token issue failure");
    AuthError::Internal(err.to_string())
}

fn classify_join_error(err: JoinError) -> AuthError {
    tracing::error!(error = %err, "Blocking password task failed");
    AuthError::Internal(err.to_string())
}
