//! Storage-specific errors
use thiserror::Error;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Seeding error
    #[error("Seed error: {0}")]
    Seed(String),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Error raised by the domain layer while seeding
    #[error(transparent)]
    Clinic(#[from] clinic_core::ClinicError),
}

impl From<StorageError> for clinic_core::ClinicError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Clinic(inner) => inner,
            other => clinic_core::ClinicError::storage(other.to_string()),
        }
    }
}

/// Whether `err` is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
