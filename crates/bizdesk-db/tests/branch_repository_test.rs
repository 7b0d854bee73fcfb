//! Integration tests for the Branch repository.

use bizdesk_core::error::BizdeskError;
use bizdesk_core::models::branch::{CreateBranch, UpdateBranch};
use bizdesk_core::models::tenant::CreateTenant;
use bizdesk_core::repository::{BranchRepository, Pagination, TenantRepository};
use bizdesk_db::repository::{SurrealBranchRepository, SurrealTenantRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> (SurrealBranchRepository<surrealdb::engine::local::Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    bizdesk_db::run_migrations(&db).await.unwrap();

    let tenant = SurrealTenantRepository::new(db.clone())
        .create(CreateTenant {
            name: "Acme".into(),
            slug: "acme".into(),
        })
        .await
        .unwrap();

    (SurrealBranchRepository::new(db), tenant.id)
}

fn branch(tenant_id: Uuid, name: &str) -> CreateBranch {
    CreateBranch {
        tenant_id,
        name: name.into(),
        phone: Some("+966 11 555 0100".into()),
        email: None,
        address: Some("King Fahd Rd".into()),
    }
}

#[tokio::test]
async fn create_and_fetch_branch() {
    let (repo, tenant_id) = setup().await;

    let created = repo.create(branch(tenant_id, "Riyadh")).await.unwrap();
    assert_eq!(created.tenant_id, tenant_id);
    assert_eq!(created.email, None);

    let fetched = repo.get_by_id(tenant_id, created.id).await.unwrap();
    assert_eq!(fetched.name, "Riyadh");
    assert_eq!(fetched.phone.as_deref(), Some("+966 11 555 0100"));

    let by_name = repo.get_by_name(tenant_id, "Riyadh").await.unwrap();
    assert_eq!(by_name.id, created.id);
}

#[tokio::test]
async fn branch_name_is_unique_per_tenant() {
    let (repo, tenant_id) = setup().await;
    repo.create(branch(tenant_id, "Riyadh")).await.unwrap();

    let err = repo.create(branch(tenant_id, "Riyadh")).await.unwrap_err();
    assert!(matches!(err, BizdeskError::AlreadyExists { .. }));

    repo.create(branch(Uuid::new_v4(), "Riyadh")).await.unwrap();
}

#[tokio::test]
async fn update_sets_and_clears_optional_fields() {
    let (repo, tenant_id) = setup().await;
    let created = repo.create(branch(tenant_id, "Riyadh")).await.unwrap();

    let updated = repo
        .update(
            tenant_id,
            created.id,
            UpdateBranch {
                name: Some("Riyadh Central".into()),
                phone: Some(None),
                email: Some(Some("riyadh@acme.test".into())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Riyadh Central");
    assert_eq!(updated.phone, None);
    assert_eq!(updated.email.as_deref(), Some("riyadh@acme.test"));
    assert_eq!(updated.address.as_deref(), Some("King Fahd Rd"));
}

#[tokio::test]
async fn update_in_wrong_tenant_is_not_found() {
    let (repo, tenant_id) = setup().await;
    let created = repo.create(branch(tenant_id, "Riyadh")).await.unwrap();

    let err = repo
        .update(Uuid::new_v4(), created.id, UpdateBranch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, BizdeskError::NotFound { .. }));
}

#[tokio::test]
async fn delete_removes_branch() {
    let (repo, tenant_id) = setup().await;
    let created = repo.create(branch(tenant_id, "Riyadh")).await.unwrap();

    repo.delete(tenant_id, created.id).await.unwrap();
    assert!(matches!(
        repo.get_by_id(tenant_id, created.id).await,
        Err(BizdeskError::NotFound { .. })
    ));
    assert!(matches!(
        repo.delete(tenant_id, created.id).await,
        Err(BizdeskError::NotFound { .. })
    ));
}

#[tokio::test]
async fn list_paginates_in_name_order() {
    let (repo, tenant_id) = setup().await;
    for name in ["Dammam", "Abha", "Jeddah", "Riyadh"] {
        repo.create(branch(tenant_id, name)).await.unwrap();
    }
    repo.create(branch(Uuid::new_v4(), "Elsewhere")).await.unwrap();

    let page = repo
        .list(tenant_id, Pagination { offset: 1, limit: 2 })
        .await
        .unwrap();

    assert_eq!(page.total, 4);
    let names: Vec<_> = page.items.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Dammam", "Jeddah"]);
}
