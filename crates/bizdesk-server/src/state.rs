//! Shared application state.

use std::sync::Arc;

use bizdesk_auth::{AuthConfig, AuthService, IdentityLoader};
use bizdesk_core::EnforcementPolicy;
use bizdesk_db::repository::{
    SurrealBranchRepository, SurrealPermissionRepository, SurrealRoleRepository,
    SurrealUserRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

pub type Identities = IdentityLoader<
    SurrealUserRepository<Any>,
    SurrealRoleRepository<Any>,
    SurrealPermissionRepository<Any>,
>;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub branches: SurrealBranchRepository<Any>,
    pub identities: Arc<Identities>,
    pub auth: Arc<AuthService<SurrealUserRepository<Any>>>,
    pub policy: EnforcementPolicy,
}

impl AppState {
    pub fn new(db: Surreal<Any>, auth: AuthConfig, policy: EnforcementPolicy) -> Self {
        let users = match auth.pepper.clone() {
            Some(pepper) => SurrealUserRepository::with_pepper(db.clone(), pepper),
            None => SurrealUserRepository::new(db.clone()),
        };

        let identities = IdentityLoader::new(
            users.clone(),
            SurrealRoleRepository::new(db.clone()),
            SurrealPermissionRepository::new(db.clone()),
        );

        Self {
            branches: SurrealBranchRepository::new(db),
            identities: Arc::new(identities),
            auth: Arc::new(AuthService::new(users, auth)),
            policy,
        }
    }

    pub fn auth_config(&self) -> &AuthConfig {
        self.auth.config()
    }
}
