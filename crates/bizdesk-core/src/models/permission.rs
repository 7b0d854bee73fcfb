//! Permission domain model.
//!
//! Permissions form a global catalog of capability codes. Roles are
//! granted permissions; users receive the union of their roles' codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Capability codes checked by the HTTP handlers.
pub mod codes {
    pub const VIEW_BRANCHES: &str = "view_branches";
    pub const CREATE_BRANCH: &str = "create_branch";
    pub const UPDATE_BRANCH: &str = "update_branch";
    pub const DELETE_BRANCH: &str = "delete_branch";
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    pub id: Uuid,
    /// The capability this permission represents (e.g., `create_branch`).
    pub code: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePermission {
    pub code: String,
    pub description: String,
}
