//! Authentication service: credential login.

use bizdesk_core::error::{BizdeskError, BizdeskResult};
use bizdesk_core::models::user::UserStatus;
use bizdesk_core::repository::UserRepository;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug, serde::Serialize)]
pub struct LoginOutput {
    /// Signed JWT access token.
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    pub user_id: Uuid,
    pub tenant_id: Uuid,
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
#[derive(Clone)]
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authenticate with email + password and issue an access token.
    ///
    /// Unknown emails and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn login(&self, input: LoginInput) -> BizdeskResult<LoginOutput> {
        let email = input.email.trim().to_lowercase();
        let user = match self.user_repo.get_by_email(&email).await {
            Ok(u) => u,
            Err(BizdeskError::NotFound { .. }) => {
                warn!("Login rejected: unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        if user.status != UserStatus::Active {
            warn!(user_id = %user.id, "Login rejected: account inactive");
            return Err(AuthError::AccountInactive.into());
        }

        let access_token = token::issue_access_token(user.id, user.tenant_id, &self.config)?;
        info!(user_id = %user.id, tenant_id = %user.tenant_id, "User logged in");

        Ok(LoginOutput {
            access_token,
            expires_in: self.config.access_token_lifetime_secs,
            user_id: user.id,
            tenant_id: user.tenant_id,
        })
    }
}
