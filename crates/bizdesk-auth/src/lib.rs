//! bizdesk auth: password verification, JWT access tokens, and
//! loading the [`Identity`](bizdesk_core::Identity) behind a request.

pub mod config;
pub mod error;
pub mod identity;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use identity::IdentityLoader;
pub use service::{AuthService, LoginInput, LoginOutput};
pub use token::{AccessTokenClaims, ValidatedClaims};
