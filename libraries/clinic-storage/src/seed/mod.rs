//! First-run data: admin account, specialties, doctors, sample patient
//!
//! Every step checks before inserting, so `run` is safe on every start-up.

use crate::{doctors, specialties, users, StorageError};
use clinic_core::accounts::{hash_password, DEFAULT_COST};
use clinic_core::types::{NewUser, Role};
use sqlx::SqlitePool;

pub const ADMIN_NAME: &str = "Administrador";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

pub const SAMPLE_PATIENT_NAME: &str = "Paciente Prueba";
pub const SAMPLE_PATIENT_USERNAME: &str = "paciente1";
pub const SAMPLE_PATIENT_PASSWORD: &str = "pass123";

pub const SPECIALTIES: [&str; 4] = ["Cardiología", "Pediatría", "Dermatología", "Oftalmología"];

/// (doctor, specialty)
pub const DOCTORS: [(&str, &str); 4] = [
    ("Dr. García", "Cardiología"),
    ("Dra. Rodríguez", "Cardiología"),
    ("Dr. Martínez", "Pediatría"),
    ("Dra. López", "Dermatología"),
];

/// Seeding options
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Also create the `paciente1` sample account
    pub sample_patient: bool,

    /// bcrypt cost for the seeded passwords
    pub bcrypt_cost: u32,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            sample_patient: true,
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

/// Insert any missing seed rows
pub async fn run(pool: &SqlitePool, options: &SeedOptions) -> Result<(), StorageError> {
    ensure_user(
        pool,
        ADMIN_NAME,
        ADMIN_USERNAME,
        ADMIN_PASSWORD,
        Role::Admin,
        options.bcrypt_cost,
    )
    .await?;

    for name in SPECIALTIES {
        specialties::ensure(pool, name).await?;
    }

    for (name, specialty) in DOCTORS {
        let specialty = specialties::find_by_name(pool, specialty)
            .await?
            .ok_or_else(|| StorageError::Seed(format!("missing specialty {}", specialty)))?;
        doctors::ensure(pool, name, specialty.id).await?;
    }

    if options.sample_patient {
        ensure_user(
            pool,
            SAMPLE_PATIENT_NAME,
            SAMPLE_PATIENT_USERNAME,
            SAMPLE_PATIENT_PASSWORD,
            Role::Patient,
            options.bcrypt_cost,
        )
        .await?;
    }

    tracing::info!(
        "Seed data in place ({} specialties, {} doctors)",
        SPECIALTIES.len(),
        DOCTORS.len()
    );

    Ok(())
}

async fn ensure_user(
    pool: &SqlitePool,
    name: &str,
    username: &str,
    password: &str,
    role: Role,
    bcrypt_cost: u32,
) -> Result<(), StorageError> {
    if users::username_exists(pool, username).await? {
        return Ok(());
    }

    users::create(
        pool,
        NewUser {
            name: name.to_string(),
            last_name: None,
            email: None,
            address: None,
            username: username.to_string(),
            password_hash: hash_password(password, bcrypt_cost)?,
            role,
        },
    )
    .await?;

    tracing::info!("Seeded {} account {}", role, username);
    Ok(())
}
