//! Database-specific error types and conversions.

use bizdesk_core::error::BizdeskError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Corrupt row: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    Conflict { entity: String },
}

impl DbError {
    pub(crate) fn not_found(entity: &str, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<DbError> for BizdeskError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => BizdeskError::NotFound { entity, id },
            DbError::Conflict { entity } => BizdeskError::AlreadyExists { entity },
            other => BizdeskError::Database(other.to_string()),
        }
    }
}

/// Parse a UUID stored as a string column.
pub(crate) fn parse_uuid(column: &str, raw: &str) -> Result<uuid::Uuid, DbError> {
    uuid::Uuid::parse_str(raw).map_err(|e| DbError::Decode(format!("invalid {column} UUID: {e}")))
}

/// Map a failed write. Unique-index violations become `Conflict`.
pub(crate) fn classify_write(entity: &str, err: surrealdb::Error) -> DbError {
    if err.to_string().contains("already contains") {
        DbError::Conflict {
            entity: entity.into(),
        }
    } else {
        DbError::Surreal(err)
    }
}
