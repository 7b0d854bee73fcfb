//! Permission and tenant-scope decisions.
//!
//! Everything here is a pure function over an already-loaded
//! [`Identity`]. Loading the identity (and its permission set) is the
//! job of the auth crate; deciding what it may do happens here.
//!
//! Callers check the permission first and the tenant second, so that
//! the coarser denial is reported before the finer one. [`authorize`]
//! encodes that order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::identity::Identity;
use crate::messages::Message;

/// `true` if `identity` holds the capability `code`. A missing identity
/// holds nothing.
pub fn has_permission(identity: Option<&Identity>, code: &str) -> bool {
    identity.is_some_and(|id| id.permissions.contains(code))
}

/// `true` if `identity` may act on data owned by `tenant_id`.
///
/// Access is granted for the identity's home tenant, or for any tenant
/// when the identity is a super admin. A missing identity or tenant id
/// is denied.
pub fn has_tenant_access(identity: Option<&Identity>, tenant_id: Option<Uuid>) -> bool {
    match (identity, tenant_id) {
        (Some(id), Some(tenant_id)) => id.tenant_id == tenant_id || id.is_super_admin(),
        _ => false,
    }
}

/// Normalize a raw `tenant_id` request value.
///
/// Only UUID strings are accepted; numbers, blanks and anything else
/// yield `None`, which [`has_tenant_access`] denies.
pub fn tenant_id_from_value(value: Option<&Value>) -> Option<Uuid> {
    value
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
}

/// Why a request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// No identity. The HTTP layer also reports missing or rejected
    /// bearer tokens with this variant.
    Unauthenticated,
    MissingPermission(String),
    TenantMismatch,
}

impl Denial {
    pub fn message(&self) -> Message<'static> {
        match self {
            Denial::Unauthenticated => Message::Unauthenticated,
            Denial::MissingPermission(_) => Message::PermissionDenied,
            Denial::TenantMismatch => Message::TenantDenied,
        }
    }
}

/// Permission check, then tenant check.
pub fn authorize(
    identity: Option<&Identity>,
    code: &str,
    tenant_id: Option<Uuid>,
) -> Result<(), Denial> {
    let Some(identity) = identity else {
        return Err(Denial::Unauthenticated);
    };
    if !has_permission(Some(identity), code) {
        return Err(Denial::MissingPermission(code.to_owned()));
    }
    if !has_tenant_access(Some(identity), tenant_id) {
        return Err(Denial::TenantMismatch);
    }
    Ok(())
}

/// Whether guard denials reject a request.
///
/// The decision functions always run; the policy only decides what the
/// caller does with a denial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementPolicy {
    /// Denials reject the request.
    #[default]
    Enforce,
    /// Denials are reported but the request proceeds.
    Permissive,
}

impl EnforcementPolicy {
    /// `Enforce` for a production environment name, `Permissive`
    /// otherwise.
    pub fn for_environment(env: &str) -> Self {
        if env.trim().eq_ignore_ascii_case("production") {
            EnforcementPolicy::Enforce
        } else {
            EnforcementPolicy::Permissive
        }
    }

    pub fn is_enforced(self) -> bool {
        self == EnforcementPolicy::Enforce
    }

    /// Apply the policy to a decision. Under `Permissive` the denial is
    /// handed back as `Ok(Some(_))` so the caller can log it.
    pub fn apply(self, decision: Result<(), Denial>) -> Result<Option<Denial>, Denial> {
        match (decision, self) {
            (Ok(()), _) => Ok(None),
            (Err(denial), EnforcementPolicy::Enforce) => Err(denial),
            (Err(denial), EnforcementPolicy::Permissive) => Ok(Some(denial)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::role::SUPER_ADMIN_ROLE;

    fn identity(tenant_id: Uuid) -> Identity {
        Identity::new(Uuid::new_v4(), tenant_id).with_permissions(["a", "b"])
    }

    #[test]
    fn permission_is_set_membership() {
        let id = identity(Uuid::new_v4());
        assert!(has_permission(Some(&id), "a"));
        assert!(has_permission(Some(&id), "b"));
        assert!(!has_permission(Some(&id), "c"));
        assert!(!has_permission(None, "a"));
    }

    #[test]
    fn home_tenant_is_granted() {
        let home = Uuid::new_v4();
        let id = identity(home);
        assert!(has_tenant_access(Some(&id), Some(home)));
        assert!(!has_tenant_access(Some(&id), Some(Uuid::new_v4())));
    }

    #[test]
    fn super_admin_crosses_tenants() {
        let id = identity(Uuid::new_v4()).with_roles([SUPER_ADMIN_ROLE]);
        assert!(has_tenant_access(Some(&id), Some(Uuid::new_v4())));
    }

    #[test]
    fn missing_inputs_are_denied() {
        let id = identity(Uuid::new_v4()).with_roles([SUPER_ADMIN_ROLE]);
        assert!(!has_tenant_access(Some(&id), None));
        assert!(!has_tenant_access(None, Some(Uuid::new_v4())));
        assert!(!has_tenant_access(None, None));
    }

    #[test]
    fn tenant_values_normalize_fail_closed() {
        let tenant = Uuid::new_v4();
        assert_eq!(
            tenant_id_from_value(Some(&json!(tenant.to_string()))),
            Some(tenant)
        );
        assert_eq!(tenant_id_from_value(Some(&json!(5))), None);
        assert_eq!(tenant_id_from_value(Some(&json!("5"))), None);
        assert_eq!(tenant_id_from_value(Some(&json!(null))), None);
        assert_eq!(tenant_id_from_value(None), None);
    }

    #[test]
    fn authorize_checks_permission_before_tenant() {
        let home = Uuid::new_v4();
        let id = identity(home);

        assert_eq!(authorize(Some(&id), "a", Some(home)), Ok(()));
        assert_eq!(
            authorize(Some(&id), "c", Some(Uuid::new_v4())),
            Err(Denial::MissingPermission("c".into()))
        );
        assert_eq!(
            authorize(Some(&id), "a", Some(Uuid::new_v4())),
            Err(Denial::TenantMismatch)
        );
        assert_eq!(authorize(None, "a", Some(home)), Err(Denial::Unauthenticated));
    }

    #[test]
    fn policy_from_environment() {
        assert_eq!(
            EnforcementPolicy::for_environment("production"),
            EnforcementPolicy::Enforce
        );
        assert_eq!(
            EnforcementPolicy::for_environment("development"),
            EnforcementPolicy::Permissive
        );
        assert!(EnforcementPolicy::default().is_enforced());
    }

    #[test]
    fn permissive_policy_passes_denials_through() {
        let denied = Err(Denial::TenantMismatch);
        assert_eq!(
            EnforcementPolicy::Enforce.apply(denied.clone()),
            Err(Denial::TenantMismatch)
        );
        assert_eq!(
            EnforcementPolicy::Permissive.apply(denied),
            Ok(Some(Denial::TenantMismatch))
        );
        assert_eq!(EnforcementPolicy::Permissive.apply(Ok(())), Ok(None));
    }
}
