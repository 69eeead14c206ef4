use async_trait::async_trait;

use crate::domain::identity::models::AuthToken;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::Role;
use crate::domain::identity::models::Username;
use crate::identity::errors::AuthError;
use crate::identity::errors::IdentityError;

/// Port for registration and login.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity with the default role and issue a token.
    ///
    /// # Arguments
    /// * `command` - Validated username, email, and password
    ///
    /// # Returns
    /// Session token for the new identity
    ///
    /// # Errors
    /// * `AlreadyRegistered` - Username or email is taken
    /// * `Configuration` - Default role is missing from the store
    /// * `Internal` - Hashing, store, or token failure
    async fn register(&self, command: RegisterCommand) -> Result<AuthToken, AuthError>;

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Session token carrying the identity's role
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Internal` - Corrupt stored hash, store, or token failure
    async fn login(&self, command: LoginCommand) -> Result<AuthToken, AuthError>;

    /// Retrieve an identity by identifier.
    ///
    /// # Errors
    /// * `IdentityNotFound` - No identity with this ID
    /// * `Internal` - Store failure
    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, AuthError>;
}

/// Persistence operations the auth core needs from the identity store.
///
/// Single-row atomicity is assumed; no transactions span calls.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Retrieve a role by its unique name.
    ///
    /// # Returns
    /// Optional role (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, IdentityError>;

    /// Persist a new identity.
    ///
    /// # Returns
    /// Created identity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Database` - Database operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Retrieve an identity by identifier, with its role.
    ///
    /// # Errors
    /// * `CorruptRecord` - Stored row fails value rules
    /// * `Database` - Database operation failed
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve an identity by email address, with its role.
    ///
    /// # Errors
    /// * `CorruptRecord` - Stored row fails value rules
    /// * `Database` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve an identity by username.
    ///
    /// # Errors
    /// * `CorruptRecord` - Stored row fails value rules
    /// * `Database` - Database operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Identity>, IdentityError>;
}
