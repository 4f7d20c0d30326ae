use clinic_core::{error::Result, types::*, ClinicError};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct DoctorRow {
    id: i64,
    name: String,
    specialty_id: i64,
    specialty_name: String,
}

impl From<DoctorRow> for Doctor {
    fn from(row: DoctorRow) -> Self {
        Doctor {
            id: row.id,
            name: row.name,
            specialty_id: row.specialty_id,
            specialty_name: row.specialty_name,
        }
    }
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Doctor>> {
    let rows = sqlx::query_as::<_, DoctorRow>(
        "SELECT d.id, d.name, d.specialty_id, s.name AS specialty_name
         FROM doctors d
         INNER JOIN specialties s ON d.specialty_id = s.id
         ORDER BY d.name",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Doctor::from).collect())
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Doctor>> {
    let row = sqlx::query_as::<_, DoctorRow>(
        "SELECT d.id, d.name, d.specialty_id, s.name AS specialty_name
         FROM doctors d
         INNER JOIN specialties s ON d.specialty_id = s.id
         WHERE d.name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Doctor::from))
}

/// Get all doctors for a specialty, by specialty name
pub async fn get_by_specialty(pool: &SqlitePool, specialty: &str) -> Result<Vec<Doctor>> {
    let rows = sqlx::query_as::<_, DoctorRow>(
        "SELECT d.id, d.name, d.specialty_id, s.name AS specialty_name
         FROM doctors d
         INNER JOIN specialties s ON d.specialty_id = s.id
         WHERE s.name = ?
         ORDER BY d.name",
    )
    .bind(specialty)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Doctor::from).collect())
}

/// Insert a doctor unless one with the same name exists
pub async fn ensure(pool: &SqlitePool, name: &str, specialty_id: SpecialtyId) -> Result<Doctor> {
    sqlx::query("INSERT OR IGNORE INTO doctors (name, specialty_id) VALUES (?, ?)")
        .bind(name)
        .bind(specialty_id)
        .execute(pool)
        .await?;

    find_by_name(pool, name)
        .await?
        .ok_or_else(|| ClinicError::storage(format!("Failed to retrieve doctor {}", name)))
}
