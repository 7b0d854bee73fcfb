//! bizdesk core: domain models, repository traits, and the request
//! guard shared by every route: identity, permission and tenant checks,
//! declarative field validation, and localized messages.

pub mod access;
pub mod error;
pub mod identity;
pub mod language;
pub mod messages;
pub mod models;
pub mod repository;
pub mod validation;

pub use access::{Denial, EnforcementPolicy, authorize, has_permission, has_tenant_access};
pub use error::{BizdeskError, BizdeskResult};
pub use identity::Identity;
pub use language::Language;
pub use validation::{FieldRules, Rule, RuleSet, ValidationResult, validate_fields};
