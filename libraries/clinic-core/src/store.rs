//! Storage trait for the clinic

use crate::error::Result;
use crate::types::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentId, Doctor, DoctorId,
    NewAppointment, NewUser, Slot, Specialty, StoredCredentials, User,
};
use async_trait::async_trait;

/// Storage context providing access to clinic records
///
/// This trait is the seam between the booking rules in this crate and a
/// concrete store (`SQLite` in `clinic-storage`, an in-memory fake in tests).
#[async_trait]
pub trait ClinicStore: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Look up a user and their password hash by username
    async fn find_credentials(&self, username: &str) -> Result<Option<StoredCredentials>>;

    /// Insert a user
    ///
    /// Fails with `ClinicError::DuplicateUsername` if the username is taken.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Resolve a patient by display name (first match by id)
    async fn find_patient_by_name(&self, name: &str) -> Result<Option<User>>;

    /// Get all patients ordered by name
    async fn get_patients(&self) -> Result<Vec<User>>;

    // ========================================================================
    // Catalogue
    // ========================================================================

    /// Get all specialties ordered by name
    async fn get_specialties(&self) -> Result<Vec<Specialty>>;

    /// Get all doctors ordered by name
    async fn get_doctors(&self) -> Result<Vec<Doctor>>;

    /// Get doctors belonging to the named specialty
    async fn get_doctors_by_specialty(&self, specialty: &str) -> Result<Vec<Doctor>>;

    /// Resolve a doctor by name
    async fn find_doctor_by_name(&self, name: &str) -> Result<Option<Doctor>>;

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Count active appointments in a doctor's slot, optionally ignoring one id
    async fn count_active_in_slot(
        &self,
        doctor_id: DoctorId,
        slot: &Slot,
        excluding: Option<AppointmentId>,
    ) -> Result<i64>;

    /// Insert a `scheduled` appointment if the slot is still free
    ///
    /// The check and the write must be atomic. Fails with
    /// `ClinicError::SlotConflict` when another active appointment holds the slot.
    async fn create_appointment(&self, appointment: NewAppointment) -> Result<Appointment>;

    /// Overwrite patient, doctor and slot of an existing appointment
    ///
    /// Same atomicity as `create_appointment`, ignoring the row's own id.
    async fn reschedule_appointment(
        &self,
        id: AppointmentId,
        appointment: NewAppointment,
    ) -> Result<Appointment>;

    /// Get appointment by ID
    async fn get_appointment(&self, id: AppointmentId) -> Result<Option<Appointment>>;

    /// Mark an appointment `cancelled`
    ///
    /// Fails with `ClinicError::NotFound` for an unknown id.
    async fn cancel_appointment(&self, id: AppointmentId) -> Result<()>;

    /// List appointments with names, newest slot first
    async fn get_appointments(&self, filter: &AppointmentFilter)
        -> Result<Vec<AppointmentDetails>>;
}
