use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::PasswordHash;
use crate::domain::identity::models::Role;
use crate::domain::identity::models::RoleId;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityRepository;
use crate::identity::errors::IdentityError;

const SELECT_IDENTITY: &str = r#"
    SELECT u.id, u.username, u.email, u.password_hash, u.role_id,
           r.id AS role_ref, r.name AS role_name
    FROM users u
    LEFT JOIN roles r ON r.id = u.role_id
"#;

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        condition: &str,
        value: &str,
    ) -> Result<Option<Identity>, IdentityError> {
        let query = format!("{} WHERE {} = $1", SELECT_IDENTITY, condition);

        sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IdentityError::Database(e.to_string()))?
            .map(|row| identity_from_row(&row))
            .transpose()
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>, IdentityError> {
        let row = sqlx::query(
            r#"
            SELECT id, name
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IdentityError::Database(e.to_string()))?;

        row.map(|r| -> Result<Role, IdentityError> {
            Ok(Role {
                id: RoleId(r.try_get("id").map_err(corrupt)?),
                name: r.try_get("name").map_err(corrupt)?,
            })
        })
        .transpose()
    }

    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, role_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.username.as_str())
        .bind(identity.email.as_str())
        .bind(identity.password_hash.as_str())
        .bind(identity.role_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return IdentityError::UsernameAlreadyExists(
                            identity.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return IdentityError::EmailAlreadyExists(
                            identity.email.as_str().to_string(),
                        );
                    }
                }
            }
            IdentityError::Database(e.to_string())
        })?;

        Ok(identity)
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        let query = format!("{} WHERE u.id = $1", SELECT_IDENTITY);

        sqlx::query(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IdentityError::Database(e.to_string()))?
            .map(|row| identity_from_row(&row))
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        self.find_one("u.email", email).await
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, IdentityError> {
        self.find_one("u.username", username.as_str()).await
    }
}

fn identity_from_row(row: &PgRow) -> Result<Identity, IdentityError> {
    let role_ref: Option<Uuid> = row.try_get("role_ref").map_err(corrupt)?;
    let role_name: Option<String> = row.try_get("role_name").map_err(corrupt)?;

    let role = match (role_ref, role_name) {
        (Some(id), Some(name)) => Some(Role {
            id: RoleId(id),
            name,
        }),
        _ => None,
    };

    Ok(Identity {
        id: IdentityId(row.try_get("id").map_err(corrupt)?),
        username: Username::new(row.try_get("username").map_err(corrupt)?)
            .map_err(|e| IdentityError::CorruptRecord(e.to_string()))?,
        email: EmailAddress::new(row.try_get("email").map_err(corrupt)?)
            .map_err(|e| IdentityError::CorruptRecord(e.to_string()))?,
        password_hash: PasswordHash::new(row.try_get("password_hash").map_err(corrupt)?),
        role_id: RoleId(row.try_get("role_id").map_err(corrupt)?),
        role,
    })
}

fn corrupt(err: sqlx::Error) -> IdentityError {
    IdentityError::CorruptRecord(err.to_string())
}
