//! Appointment queries, including the slot availability check
//!
//! Writes that claim a slot are single compare-and-set statements: the
//! `NOT EXISTS` guard and the write run as one statement, so a second writer
//! cannot slip in between check and insert. The partial unique index on
//! `(doctor_id, date, time) WHERE status = 'scheduled'` backs this up.

use crate::error::is_unique_violation;
use clinic_core::{error::Result, types::*, ClinicError};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct AppointmentRow {
    id: i64,
    patient_id: i64,
    doctor_id: i64,
    date: String,
    time: String,
    status: String,
    created_at: i64,
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = ClinicError;

    fn try_from(row: AppointmentRow) -> Result<Self> {
        let slot = Slot::parse(&row.date, &row.time).map_err(|e| {
            ClinicError::storage(format!("Appointment {} has a corrupt slot: {}", row.id, e))
        })?;
        let status = AppointmentStatus::from_str(&row.status).ok_or_else(|| {
            ClinicError::storage(format!("Unknown appointment status: {}", row.status))
        })?;

        Ok(Appointment {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            slot,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DetailsRow {
    #[sqlx(flatten)]
    appointment: AppointmentRow,
    patient_name: String,
    doctor_name: String,
    specialty_name: String,
}

impl TryFrom<DetailsRow> for AppointmentDetails {
    type Error = ClinicError;

    fn try_from(row: DetailsRow) -> Result<Self> {
        Ok(AppointmentDetails {
            appointment: row.appointment.try_into()?,
            patient_name: row.patient_name,
            doctor_name: row.doctor_name,
            specialty_name: row.specialty_name,
        })
    }
}

fn slot_conflict(doctor_id: DoctorId, slot: &Slot) -> ClinicError {
    ClinicError::SlotConflict {
        doctor: doctor_id.to_string(),
        date: slot.date_string(),
        time: slot.time_string(),
    }
}

fn map_write_error(err: sqlx::Error, appointment: &NewAppointment) -> ClinicError {
    if is_unique_violation(&err) {
        slot_conflict(appointment.doctor_id, &appointment.slot)
    } else {
        ClinicError::from(err)
    }
}

/// Count active appointments in a doctor's slot
///
/// `excluding` leaves one appointment out of the count.
pub async fn count_active_in_slot(
    pool: &SqlitePool,
    doctor_id: DoctorId,
    slot: &Slot,
    excluding: Option<AppointmentId>,
) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*)
         FROM appointments
         WHERE doctor_id = ? AND date = ? AND time = ?
           AND status != 'cancelled'
           AND (? IS NULL OR id != ?)",
    )
    .bind(doctor_id)
    .bind(slot.date_string())
    .bind(slot.time_string())
    .bind(excluding)
    .bind(excluding)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

/// Insert a `scheduled` appointment if its slot is free
pub async fn create(pool: &SqlitePool, appointment: NewAppointment) -> Result<Appointment> {
    let date = appointment.slot.date_string();
    let time = appointment.slot.time_string();

    let result = sqlx::query(
        "INSERT INTO appointments (patient_id, doctor_id, date, time, status)
         SELECT ?, ?, ?, ?, 'scheduled'
         WHERE NOT EXISTS (
             SELECT 1 FROM appointments
             WHERE doctor_id = ? AND date = ? AND time = ? AND status != 'cancelled'
         )",
    )
    .bind(appointment.patient_id)
    .bind(appointment.doctor_id)
    .bind(&date)
    .bind(&time)
    .bind(appointment.doctor_id)
    .bind(&date)
    .bind(&time)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, &appointment))?;

    if result.rows_affected() == 0 {
        return Err(slot_conflict(appointment.doctor_id, &appointment.slot));
    }

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| ClinicError::storage("Failed to retrieve created appointment"))
}

/// Overwrite patient, doctor and slot of an appointment if the new slot is free
///
/// Status is left untouched.
pub async fn reschedule(
    pool: &SqlitePool,
    id: AppointmentId,
    appointment: NewAppointment,
) -> Result<Appointment> {
    let date = appointment.slot.date_string();
    let time = appointment.slot.time_string();

    let result = sqlx::query(
        "UPDATE appointments
         SET patient_id = ?, doctor_id = ?, date = ?, time = ?
         WHERE id = ?
           AND NOT EXISTS (
               SELECT 1 FROM appointments
               WHERE doctor_id = ? AND date = ? AND time = ?
                 AND status != 'cancelled' AND id != ?
           )",
    )
    .bind(appointment.patient_id)
    .bind(appointment.doctor_id)
    .bind(&date)
    .bind(&time)
    .bind(id)
    .bind(appointment.doctor_id)
    .bind(&date)
    .bind(&time)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| map_write_error(e, &appointment))?;

    if result.rows_affected() == 0 {
        return match get_by_id(pool, id).await? {
            Some(_) => Err(slot_conflict(appointment.doctor_id, &appointment.slot)),
            None => Err(ClinicError::not_found("Appointment", id.to_string())),
        };
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| ClinicError::not_found("Appointment", id.to_string()))
}

pub async fn get_by_id(pool: &SqlitePool, id: AppointmentId) -> Result<Option<Appointment>> {
    let row = sqlx::query_as::<_, AppointmentRow>(
        "SELECT id, patient_id, doctor_id, date, time, status, created_at
         FROM appointments
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Appointment::try_from).transpose()
}

/// Mark an appointment `cancelled`
///
/// Cancelled rows never count against a slot.
pub async fn cancel(pool: &SqlitePool, id: AppointmentId) -> Result<()> {
    let result = sqlx::query("UPDATE appointments SET status = 'cancelled' WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ClinicError::not_found("Appointment", id.to_string()));
    }

    Ok(())
}

/// List appointments with patient, doctor and specialty names
///
/// Ordered by date, then time, newest first.
pub async fn list(pool: &SqlitePool, filter: &AppointmentFilter) -> Result<Vec<AppointmentDetails>> {
    let date = filter.date.map(|d| d.format("%Y-%m-%d").to_string());

    let rows = sqlx::query_as::<_, DetailsRow>(
        "SELECT a.id, a.patient_id, a.doctor_id, a.date, a.time, a.status, a.created_at,
                u.name AS patient_name, d.name AS doctor_name, s.name AS specialty_name
         FROM appointments a
         INNER JOIN users u ON a.patient_id = u.id
         INNER JOIN doctors d ON a.doctor_id = d.id
         INNER JOIN specialties s ON d.specialty_id = s.id
         WHERE (? IS NULL OR a.patient_id = ?)
           AND (? IS NULL OR a.date = ?)
           AND (? IS NULL OR d.name = ?)
         ORDER BY a.date DESC, a.time DESC, a.id DESC",
    )
    .bind(filter.patient_id)
    .bind(filter.patient_id)
    .bind(&date)
    .bind(&date)
    .bind(&filter.doctor_name)
    .bind(&filter.doctor_name)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(AppointmentDetails::try_from).collect()
}
