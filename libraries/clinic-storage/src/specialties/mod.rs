use clinic_core::{error::Result, types::*, ClinicError};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct SpecialtyRow {
    id: i64,
    name: String,
}

impl From<SpecialtyRow> for Specialty {
    fn from(row: SpecialtyRow) -> Self {
        Specialty {
            id: row.id,
            name: row.name,
        }
    }
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Specialty>> {
    let rows = sqlx::query_as::<_, SpecialtyRow>("SELECT id, name FROM specialties ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Specialty::from).collect())
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Specialty>> {
    let row = sqlx::query_as::<_, SpecialtyRow>("SELECT id, name FROM specialties WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(Specialty::from))
}

/// Insert a specialty unless one with the same name exists
pub async fn ensure(pool: &SqlitePool, name: &str) -> Result<Specialty> {
    sqlx::query("INSERT OR IGNORE INTO specialties (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    find_by_name(pool, name).await?.ok_or_else(|| {
        ClinicError::storage(format!("Failed to retrieve specialty {}", name))
    })
}
