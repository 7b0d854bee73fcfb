//! Server configuration.
//!
//! Every setting has a default suitable for local development; the
//! `BIZDESK_*` environment variables override them.

use std::net::SocketAddr;

use bizdesk_auth::AuthConfig;
use bizdesk_core::EnforcementPolicy;
use bizdesk_db::DbConfig;

/// Failure while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("cannot read {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level configuration for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub db: DbConfig,
    pub auth: AuthConfig,
    /// Whether guard denials reject requests.
    pub policy: EnforcementPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            db: DbConfig::default(),
            auth: AuthConfig::default(),
            policy: EnforcementPolicy::for_environment("development"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name
    /// to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIZDESK_BIND_ADDR") {
            config.bind_addr = addr.parse().map_err(|e| ConfigError::Invalid {
                var: "BIZDESK_BIND_ADDR",
                reason: format!("{e}"),
            })?;
        }

        if let Some(url) = lookup("BIZDESK_DB_URL") {
            config.db.url = url;
        }
        if let Some(ns) = lookup("BIZDESK_DB_NS") {
            config.db.namespace = ns;
        }
        if let Some(name) = lookup("BIZDESK_DB_NAME") {
            config.db.database = name;
        }
        if let Some(user) = lookup("BIZDESK_DB_USER") {
            config.db.username = user;
        }
        if let Some(pass) = lookup("BIZDESK_DB_PASS") {
            config.db.password = pass;
        }

        if let Some(path) = lookup("BIZDESK_JWT_PRIVATE_KEY_PATH") {
            config.auth.jwt_private_key_pem = read_key(path)?;
        }
        if let Some(path) = lookup("BIZDESK_JWT_PUBLIC_KEY_PATH") {
            config.auth.jwt_public_key_pem = read_key(path)?;
        }
        if let Some(issuer) = lookup("BIZDESK_JWT_ISSUER") {
            config.auth.jwt_issuer = issuer;
        }
        if let Some(secs) = lookup("BIZDESK_TOKEN_LIFETIME_SECS") {
            config.auth.access_token_lifetime_secs =
                secs.parse().map_err(|e| ConfigError::Invalid {
                    var: "BIZDESK_TOKEN_LIFETIME_SECS",
                    reason: format!("{e}"),
                })?;
        }
        config.auth.pepper = lookup("BIZDESK_PASSWORD_PEPPER");

        if let Some(env) = lookup("BIZDESK_ENV") {
            config.policy = EnforcementPolicy::for_environment(&env);
        }

        Ok(config)
    }
}

fn read_key(path: String) -> Result<String, ConfigError> {
    std::fs::read_to_string(&path).map_err(|source| ConfigError::KeyFile { path, source })
}
