//! Integration tests for the Tenant and User repositories.

use bizdesk_core::error::BizdeskError;
use bizdesk_core::models::tenant::CreateTenant;
use bizdesk_core::models::user::{CreateUser, UpdateUser, UserStatus};
use bizdesk_core::repository::{TenantRepository, UserRepository};
use bizdesk_db::repository::{SurrealTenantRepository, SurrealUserRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> (Surreal<Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    bizdesk_db::run_migrations(&db).await.unwrap();

    let tenant = SurrealTenantRepository::new(db.clone())
        .create(CreateTenant {
            name: "Acme Trading".into(),
            slug: "acme".into(),
        })
        .await
        .unwrap();

    (db, tenant.id)
}

fn alice(tenant_id: Uuid) -> CreateUser {
    CreateUser {
        tenant_id,
        name: "Alice".into(),
        email: "Alice@Example.com".into(),
        password: "correct horse".into(),
    }
}

#[tokio::test]
async fn tenant_lookup_by_id_and_slug() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let by_id = repo.get_by_id(tenant_id).await.unwrap();
    let by_slug = repo.get_by_slug("acme").await.unwrap();
    assert_eq!(by_id.id, by_slug.id);
    assert_eq!(by_id.name, "Acme Trading");
}

#[tokio::test]
async fn duplicate_tenant_slug_conflicts() {
    let (db, _) = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let err = repo
        .create(CreateTenant {
            name: "Other".into(),
            slug: "acme".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BizdeskError::AlreadyExists { .. }));
}

#[tokio::test]
async fn created_user_is_active_with_hashed_password() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo.create(alice(tenant_id)).await.unwrap();
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.status, UserStatus::Active);
    assert!(user.password_hash.starts_with("$argon2id$"));
    assert_ne!(user.password_hash, "correct horse");
}

#[tokio::test]
async fn email_lookup_ignores_case() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealUserRepository::new(db);
    let user = repo.create(alice(tenant_id)).await.unwrap();

    let found = repo.get_by_email("  ALICE@example.COM ").await.unwrap();
    assert_eq!(found.id, user.id);
}

#[tokio::test]
async fn user_is_invisible_from_other_tenant() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealUserRepository::new(db);
    let user = repo.create(alice(tenant_id)).await.unwrap();

    let err = repo.get_by_id(Uuid::new_v4(), user.id).await.unwrap_err();
    assert!(matches!(err, BizdeskError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealUserRepository::new(db);
    repo.create(alice(tenant_id)).await.unwrap();

    let err = repo.create(alice(tenant_id)).await.unwrap_err();
    assert!(matches!(err, BizdeskError::AlreadyExists { .. }));
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealUserRepository::new(db);
    let user = repo.create(alice(tenant_id)).await.unwrap();

    let updated = repo
        .update(
            tenant_id,
            user.id,
            UpdateUser {
                status: Some(UserStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, UserStatus::Inactive);
    assert_eq!(updated.name, "Alice");
    assert!(updated.updated_at >= user.updated_at);
}
