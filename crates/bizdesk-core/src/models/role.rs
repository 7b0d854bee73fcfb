//! Role domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Slug of the role whose holders may act across tenant boundaries.
pub const SUPER_ADMIN_ROLE: &str = "super_admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Machine name (e.g., `branch_manager`), unique within a tenant.
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    pub tenant_id: Uuid,
    pub slug: String,
    pub name: String,
}
