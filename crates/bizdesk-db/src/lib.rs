//! bizdesk database: SurrealDB connection management, schema
//! migrations, and repository implementations of the `bizdesk-core`
//! traits.

mod connection;
mod error;
pub mod repository;
mod schema;
mod seed;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
pub use seed::{PERMISSION_CATALOG, seed_permissions};
