//! Domain error type shared by every bizdesk crate.
//!
//! Access denials and field validation failures are ordinary return
//! values ([`Denial`](crate::access::Denial),
//! [`ValidationResult`](crate::validation::ValidationResult)), not
//! errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BizdeskError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    #[error("{entity} already exists")]
    AlreadyExists { entity: String },

    /// Bad credentials, an invalid token, or an inactive account.
    #[error("authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("database error: {0}")]
    Database(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

pub type BizdeskResult<T> = Result<T, BizdeskError>;
