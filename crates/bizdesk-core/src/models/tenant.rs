//! Tenant domain model.
//!
//! A tenant is one business (organization) using the system. Branches,
//! users, roles and every other business record are scoped to a tenant
//! and never visible to another one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    /// Human-readable business name.
    pub name: String,
    /// URL-safe unique identifier (e.g., `acme-trading`).
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTenant {
    pub name: String,
    pub slug: String,
}
