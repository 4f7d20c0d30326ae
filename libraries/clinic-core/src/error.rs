//! Core error types for the clinic
use thiserror::Error;

/// Result type alias using `ClinicError`
pub type Result<T> = std::result::Result<T, ClinicError>;

/// Core error type for the clinic
///
/// Every variant is recoverable at the point of the user action; none of them
/// should bring the process down.
#[derive(Error, Debug)]
pub enum ClinicError {
    /// Missing or malformed input field
    #[error("Validation error: {0}")]
    Validation(String),

    /// The doctor already has an active appointment in this slot
    #[error("Slot not available: {doctor} on {date} at {time}")]
    SlotConflict {
        /// Doctor name or id
        doctor: String,
        /// Canonical `YYYY-MM-DD` date
        date: String,
        /// Canonical `HH:MM` time
        time: String,
    },

    /// Referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (`Patient`, `Doctor`, `Appointment`, ...)
        entity: String,
        /// Identifier that failed to resolve
        id: String,
    },

    /// Unknown username or wrong password
    #[error("Invalid username or password")]
    AuthFailure,

    /// Registration with a username that is already taken
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Actor is not allowed to perform the operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Password hashing errors
    #[error("Credential error: {0}")]
    Credentials(#[from] bcrypt::BcryptError),
}

impl ClinicError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Whether this error is a double-booking rejection
    pub fn is_slot_conflict(&self) -> bool {
        matches!(self, Self::SlotConflict { .. })
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for ClinicError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}
