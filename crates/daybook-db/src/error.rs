//! Database-specific error types and conversions.

use daybook_core::error::DaybookError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Malformed record: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for DaybookError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => DaybookError::NotFound { entity, id },
            other => DaybookError::Database(other.to_string()),
        }
    }
}
