//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Tenant-scoped repositories
//! require a `tenant_id` parameter to enforce data isolation.

use uuid::Uuid;

use crate::error::BizdeskResult;
use crate::models::{
    branch::{Branch, CreateBranch, UpdateBranch},
    permission::{CreatePermission, Permission},
    role::{CreateRole, Role},
    tenant::{CreateTenant, Tenant},
    user::{CreateUser, UpdateUser, User},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Global scope
// ---------------------------------------------------------------------------

pub trait TenantRepository: Send + Sync {
    fn create(&self, input: CreateTenant) -> impl Future<Output = BizdeskResult<Tenant>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = BizdeskResult<Tenant>> + Send;
    fn get_by_slug(&self, slug: &str) -> impl Future<Output = BizdeskResult<Tenant>> + Send;
}

pub trait PermissionRepository: Send + Sync {
    fn create(
        &self,
        input: CreatePermission,
    ) -> impl Future<Output = BizdeskResult<Permission>> + Send;
    fn get_by_code(&self, code: &str) -> impl Future<Output = BizdeskResult<Permission>> + Send;
    fn list(&self) -> impl Future<Output = BizdeskResult<Vec<Permission>>> + Send;

    /// Grant a permission to a role (creates a `grants` edge).
    fn grant_to_role(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> impl Future<Output = BizdeskResult<()>> + Send;

    /// Revoke a permission from a role.
    fn revoke_from_role(
        &self,
        role_id: Uuid,
        permission_id: Uuid,
    ) -> impl Future<Output = BizdeskResult<()>> + Send;

    /// Get all permissions granted to a role.
    fn get_role_permissions(
        &self,
        role_id: Uuid,
    ) -> impl Future<Output = BizdeskResult<Vec<Permission>>> + Send;
}

// ---------------------------------------------------------------------------
// Tenant-scoped repositories
// ---------------------------------------------------------------------------

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = BizdeskResult<User>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = BizdeskResult<User>> + Send;
    /// Email is the login identifier and unique across tenants.
    fn get_by_email(&self, email: &str) -> impl Future<Output = BizdeskResult<User>> + Send;
    fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = BizdeskResult<User>> + Send;
}

pub trait RoleRepository: Send + Sync {
    fn create(&self, input: CreateRole) -> impl Future<Output = BizdeskResult<Role>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = BizdeskResult<Role>> + Send;

    /// Assign a role to a user (creates a `has_role` edge).
    fn assign_to_user(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
    ) -> impl Future<Output = BizdeskResult<()>> + Send;

    /// Remove a role assignment from a user.
    fn unassign_from_user(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        role_id: Uuid,
    ) -> impl Future<Output = BizdeskResult<()>> + Send;

    /// Get all roles assigned to a user.
    fn get_user_roles(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = BizdeskResult<Vec<Role>>> + Send;
}

pub trait BranchRepository: Send + Sync {
    fn create(&self, input: CreateBranch) -> impl Future<Output = BizdeskResult<Branch>> + Send;
    fn get_by_id(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = BizdeskResult<Branch>> + Send;
    /// Exact-name lookup used for uniqueness checks.
    fn get_by_name(
        &self,
        tenant_id: Uuid,
        name: &str,
    ) -> impl Future<Output = BizdeskResult<Branch>> + Send;
    fn update(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateBranch,
    ) -> impl Future<Output = BizdeskResult<Branch>> + Send;
    fn delete(&self, tenant_id: Uuid, id: Uuid) -> impl Future<Output = BizdeskResult<()>> + Send;
    fn list(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = BizdeskResult<PaginatedResult<Branch>>> + Send;
}
