//! User management and credential queries

use crate::error::is_unique_violation;
use clinic_core::{error::Result, types::*, ClinicError};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    last_name: Option<String>,
    email: Option<String>,
    address: Option<String>,
    username: String,
    role: String,
    created_at: i64,
}

impl TryFrom<UserRow> for User {
    type Error = ClinicError;

    fn try_from(row: UserRow) -> Result<Self> {
        let role = Role::from_str(&row.role)
            .ok_or_else(|| ClinicError::storage(format!("Unknown role: {}", row.role)))?;

        Ok(User {
            id: row.id,
            name: row.name,
            last_name: row.last_name,
            email: row.email,
            address: row.address,
            username: row.username,
            role,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    user: UserRow,
    password_hash: String,
}

/// Get a user and their password hash by username
pub async fn find_credentials(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<StoredCredentials>> {
    let row = sqlx::query_as::<_, CredentialsRow>(
        "SELECT id, name, last_name, email, address, username, role, created_at, password_hash
         FROM users
         WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    row.map(|row| {
        Ok(StoredCredentials {
            user: row.user.try_into()?,
            password_hash: row.password_hash,
        })
    })
    .transpose()
}

pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, last_name, email, address, username, role, created_at
         FROM users
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(User::try_from).transpose()
}

/// Check if a username is taken
pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ?")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Insert a user
///
/// A UNIQUE violation on `username` becomes `ClinicError::DuplicateUsername`.
pub async fn create(pool: &SqlitePool, user: NewUser) -> Result<User> {
    let result = sqlx::query(
        "INSERT INTO users (name, last_name, email, address, username, password_hash, role)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&user.name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(&user.address)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(user.role.as_str())
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ClinicError::DuplicateUsername(user.username.clone())
        } else {
            ClinicError::from(e)
        }
    })?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| ClinicError::storage("Failed to retrieve created user"))
}

/// Resolve a patient by display name
///
/// Display names are not unique; the oldest matching patient wins.
pub async fn find_patient_by_name(pool: &SqlitePool, name: &str) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, last_name, email, address, username, role, created_at
         FROM users
         WHERE name = ? AND role = 'patient'
         ORDER BY id
         LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    row.map(User::try_from).transpose()
}

/// Get all patients
pub async fn get_patients(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, last_name, email, address, username, role, created_at
         FROM users
         WHERE role = 'patient'
         ORDER BY name, id",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(User::try_from).collect()
}
