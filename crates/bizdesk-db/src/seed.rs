//! Built-in permission catalog.

use bizdesk_core::error::{BizdeskError, BizdeskResult};
use bizdesk_core::models::permission::{CreatePermission, Permission, codes};
use bizdesk_core::repository::PermissionRepository;
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::repository::SurrealPermissionRepository;

/// Every capability code the HTTP surface checks, with a description.
pub const PERMISSION_CATALOG: &[(&str, &str)] = &[
    (codes::VIEW_BRANCHES, "List a tenant's branches"),
    (codes::CREATE_BRANCH, "Create branches"),
    (codes::UPDATE_BRANCH, "Edit branch details"),
    (codes::DELETE_BRANCH, "Remove branches"),
];

/// Ensure every catalog code exists. Safe to run on every start.
///
/// Returns the catalog permissions in catalog order.
pub async fn seed_permissions<C: Connection>(db: &Surreal<C>) -> BizdeskResult<Vec<Permission>> {
    let repo = SurrealPermissionRepository::new(db.clone());
    let mut seeded = Vec::with_capacity(PERMISSION_CATALOG.len());

    for (code, description) in PERMISSION_CATALOG {
        let permission = match repo.get_by_code(code).await {
            Ok(existing) => existing,
            Err(BizdeskError::NotFound { .. }) => {
                info!(code, "seeding permission");
                repo.create(CreatePermission {
                    code: (*code).to_owned(),
                    description: (*description).to_owned(),
                })
                .await?
            }
            Err(e) => return Err(e),
        };
        seeded.push(permission);
    }

    Ok(seeded)
}
