//! Clinic Storage
//!
//! `SQLite` database layer for the clinic appointment system.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each table owns its own queries (`users`,
//!   `specialties`, `doctors`, `appointments`)
//! - **Atomic Booking**: Slot checks and writes happen in one statement, backed
//!   by a partial unique index on active slots
//! - **Explicit Handle**: The pool is created by the caller and passed in;
//!   there is no global connection
//!
//! # Example
//!
//! ```rust,no_run
//! use clinic_storage::{create_pool, run_migrations, seed, LocalClinicStore};
//! use clinic_core::ClinicStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create database connection
//! let pool = create_pool("sqlite://clinic.db").await?;
//! run_migrations(&pool).await?;
//! seed::run(&pool, &seed::SeedOptions::default()).await?;
//!
//! let store = LocalClinicStore::new(pool);
//! let doctors = store.get_doctors().await?;
//! store.close().await;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod appointments;
pub mod doctors;
pub mod specialties;
pub mod users;

// First-run data
pub mod seed;

pub use context::LocalClinicStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))?;

    tracing::debug!("Migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://clinic.db>`)
///
/// # Errors
///
/// Returns an error if the database directory cannot be created or the
/// connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    // Parse the URL into options so we can configure SQLite behavior
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    // SQLite creates the file but not its directory
    if let Some(dir) = options.get_filename().parent() {
        if !dir.as_os_str().is_empty() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| StorageError::Connection(format!("{}: {}", dir.display(), e)))?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::info!("Database pool ready: {}", database_url);

    Ok(pool)
}
