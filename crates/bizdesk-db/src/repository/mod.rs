//! SurrealDB repository implementations.

mod branch;
mod permission;
mod role;
mod tenant;
mod user;

pub use branch::SurrealBranchRepository;
pub use permission::SurrealPermissionRepository;
pub use role::SurrealRoleRepository;
pub use tenant::SurrealTenantRepository;
pub use user::SurrealUserRepository;

use surrealdb_types::SurrealValue;

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
pub(crate) struct CountRow {
    pub(crate) total: u64,
}
