//! bizdesk HTTP server: configuration, shared state, and the axum
//! routes over the branch and auth endpoints.

pub mod api;
pub mod config;
pub mod server;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use server::{ServerError, app, bootstrap, run};
pub use state::AppState;
