mod common;

use common::TestApp;
use common::TestDb;
use identity_service::domain::identity::models::EmailAddress;
use identity_service::domain::identity::models::Identity;
use identity_service::domain::identity::models::IdentityId;
use identity_service::domain::identity::models::PasswordHash;
use identity_service::domain::identity::models::Role;
use identity_service::domain::identity::models::Username;
use identity_service::domain::identity::models::DEFAULT_ROLE;
use identity_service::domain::identity::ports::IdentityRepository;
use identity_service::identity::errors::IdentityError;
use identity_service::outbound::repositories::PostgresIdentityRepository;
use reqwest::StatusCode;
use serde_json::json;

async fn default_role(repository: &PostgresIdentityRepository) -> Role {
    repository
        .find_role_by_name(DEFAULT_ROLE)
        .await
        .expect("Failed to query roles")
        .expect("Default role is not seeded")
}

fn identity(username: &str, email: &str, role: Role) -> Identity {
    Identity::new(
        Username::new(username.to_string()).unwrap(),
        EmailAddress::new(email.to_string()).unwrap(),
        PasswordHash::new("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNo".to_string()),
        role,
    )
}

#[tokio::test]
async fn test_migrations_seed_roles() {
    let db = TestDb::new().await;
    let repository = PostgresIdentityRepository::new(db.pool.clone());

    let user = default_role(&repository).await;
    assert_eq!(user.name, "user");

    let admin = repository.find_role_by_name("admin").await.unwrap();
    assert_eq!(admin.map(|role| role.name), Some("admin".to_string()));

    assert!(repository
        .find_role_by_name("superuser")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_create_and_find_with_role() {
    let db = TestDb::new().await;
    let repository = PostgresIdentityRepository::new(db.pool.clone());
    let role = default_role(&repository).await;

    let created = repository
        .create(identity("alice", "alice@x.com", role.clone()))
        .await
        .expect("Failed to create identity");

    let by_id = repository
        .find_by_id(&created.id)
        .await
        .unwrap()
        .expect("Identity not found by id");
    assert_eq!(by_id.id, created.id);
    assert_eq!(by_id.username.as_str(), "alice");
    assert_eq!(by_id.email.as_str(), "alice@x.com");
    assert_eq!(by_id.password_hash, created.password_hash);
    assert_eq!(by_id.role_id, role.id);
    assert_eq!(by_id.role, Some(role.clone()));

    let by_email = repository
        .find_by_email("alice@x.com")
        .await
        .unwrap()
        .expect("Identity not found by email");
    assert_eq!(by_email.id, created.id);
    assert_eq!(by_email.role_name(), "user");

    let by_username = repository
        .find_by_username(&Username::new("alice".to_string()).unwrap())
        .await
        .unwrap()
        .expect("Identity not found by username");
    assert_eq!(by_username.id, created.id);
}

#[tokio::test]
async fn test_lookups_miss_return_none() {
    let db = TestDb::new().await;
    let repository = PostgresIdentityRepository::new(db.pool.clone());

    assert!(repository
        .find_by_id(&IdentityId::new())
        .await
        .unwrap()
        .is_none());
    assert!(repository
        .find_by_email("nobody@x.com")
        .await
        .unwrap()
        .is_none());
    assert!(repository
        .find_by_username(&Username::new("nobody".to_string()).unwrap())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_create_duplicate_username() {
    let db = TestDb::new().await;
    let repository = PostgresIdentityRepository::new(db.pool.clone());
    let role = default_role(&repository).await;

    repository
        .create(identity("alice", "alice@x.com", role.clone()))
        .await
        .unwrap();

    let result = repository
        .create(identity("alice", "other@x.com", role))
        .await;

    match result {
        Err(IdentityError::UsernameAlreadyExists(username)) => assert_eq!(username, "alice"),
        other => panic!("expected UsernameAlreadyExists, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_duplicate_email() {
    let db = TestDb::new().await;
    let repository = PostgresIdentityRepository::new(db.pool.clone());
    let role = default_role(&repository).await;

    repository
        .create(identity("alice", "alice@x.com", role.clone()))
        .await
        .unwrap();

    let result = repository
        .create(identity("alice2", "alice@x.com", role))
        .await;

    match result {
        Err(IdentityError::EmailAlreadyExists(email)) => assert_eq!(email, "alice@x.com"),
        other => panic!("expected EmailAlreadyExists, got {:?}", other),
    }

    let stored = repository.find_by_email("alice@x.com").await.unwrap().unwrap();
    assert_eq!(stored.username.as_str(), "alice");
}

#[tokio::test]
async fn test_row_breaking_value_rules_is_corrupt() {
    let db = TestDb::new().await;
    let repository = PostgresIdentityRepository::new(db.pool.clone());
    let role = default_role(&repository).await;
    let id = IdentityId::new();

    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, role_id)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id.0)
    .bind("not a username")
    .bind("mallory@x.com")
    .bind("hash")
    .bind(role.id.0)
    .execute(&db.pool)
    .await
    .expect("Failed to insert raw row");

    let result = repository.find_by_id(&id).await;
    assert!(matches!(result, Err(IdentityError::CorruptRecord(_))));
}

#[tokio::test]
async fn test_register_login_and_profile_on_postgres() {
    let db = TestDb::new().await;
    let app = TestApp::spawn_with_postgres(&db).await;

    let token = app.register("alice", "alice@x.com", "secret1").await;

    let duplicate = app
        .post("/api/v1/auth/register")
        .json(&json!({
            "username": "alice2",
            "email": "alice@x.com",
            "password": "secret2"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let login = app
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": "alice@x.com",
            "password": "secret1"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(login.status(), StatusCode::OK);

    let profile = app
        .get_authenticated("/api/v1/profile", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(profile.status(), StatusCode::OK);

    let body: serde_json::Value = profile.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["email"], "alice@x.com");
    assert_eq!(body["data"]["role"], "user");
}
