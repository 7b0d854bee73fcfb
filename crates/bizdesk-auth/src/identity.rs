//! Identity loading.
//!
//! Turns a verified token into a fully resolved [`Identity`]: the user
//! record, their role slugs, and the union of the permission codes
//! granted to those roles. All I/O needed by the access guard happens
//! here, so the guard itself stays pure.

use bizdesk_core::error::{BizdeskError, BizdeskResult};
use bizdesk_core::identity::Identity;
use bizdesk_core::models::user::UserStatus;
use bizdesk_core::repository::{PermissionRepository, RoleRepository, UserRepository};
use tracing::debug;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token;

/// Loads identities from the user, role and permission repositories.
#[derive(Clone)]
pub struct IdentityLoader<U: UserRepository, R: RoleRepository, P: PermissionRepository> {
    users: U,
    roles: R,
    permissions: P,
}

impl<U, R, P> IdentityLoader<U, R, P>
where
    U: UserRepository,
    R: RoleRepository,
    P: PermissionRepository,
{
    pub fn new(users: U, roles: R, permissions: P) -> Self {
        Self {
            users,
            roles,
            permissions,
        }
    }

    /// Load the identity of `user_id` within its home tenant.
    ///
    /// Unknown and inactive users fail authentication.
    pub async fn load(&self, tenant_id: Uuid, user_id: Uuid) -> BizdeskResult<Identity> {
        let user = self
            .users
            .get_by_id(tenant_id, user_id)
            .await
            .map_err(|e| match e {
                BizdeskError::NotFound { .. } => {
                    AuthError::TokenInvalid("subject no longer exists".into()).into()
                }
                other => other,
            })?;

        if user.status != UserStatus::Active {
            return Err(AuthError::AccountInactive.into());
        }

        let mut identity = Identity::new(user.id, user.tenant_id);
        for role in self.roles.get_user_roles(tenant_id, user_id).await? {
            let granted = self.permissions.get_role_permissions(role.id).await?;
            identity
                .permissions
                .extend(granted.into_iter().map(|p| p.code));
            identity.roles.insert(role.slug);
        }

        debug!(
            user_id = %identity.user_id,
            tenant_id = %identity.tenant_id,
            roles = identity.roles.len(),
            permissions = identity.permissions.len(),
            "Identity loaded"
        );

        Ok(identity)
    }

    /// Validate a bearer token and load the identity it names.
    pub async fn from_token(&self, bearer: &str, config: &AuthConfig) -> BizdeskResult<Identity> {
        let claims = token::validate_access_token(bearer, config)?;
        self.load(claims.tenant_id, claims.user_id).await
    }
}
