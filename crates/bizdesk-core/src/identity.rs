//! Authenticated identity.
//!
//! An [`Identity`] is the fully resolved actor behind a request: who
//! they are, which tenant they belong to, and what they may do. It is
//! built once per request by the identity loader and then only read.

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::models::role::SUPER_ADMIN_ROLE;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    /// Home tenant of the identity.
    pub tenant_id: Uuid,
    /// Role slugs.
    pub roles: HashSet<String>,
    /// Permission codes from all roles.
    pub permissions: HashSet<String>,
}

impl Identity {
    pub fn new(user_id: Uuid, tenant_id: Uuid) -> Self {
        Self {
            user_id,
            tenant_id,
            roles: HashSet::new(),
            permissions: HashSet::new(),
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn has_role(&self, slug: &str) -> bool {
        self.roles.contains(slug)
    }

    pub fn is_super_admin(&self) -> bool {
        self.has_role(SUPER_ADMIN_ROLE)
    }
}
