use crate::{appointments, doctors, specialties, users, StorageError};
use async_trait::async_trait;
use clinic_core::{error::Result, store::ClinicStore, types::*};
use sqlx::SqlitePool;

/// Local clinic store using `SQLite`
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Clone)]
pub struct LocalClinicStore {
    pool: SqlitePool,
}

impl LocalClinicStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) and migrate the database at `database_url`
    pub async fn open(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every connection; waits for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl ClinicStore for LocalClinicStore {
    // Users
    async fn find_credentials(&self, username: &str) -> Result<Option<StoredCredentials>> {
        users::find_credentials(&self.pool, username).await
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        users::create(&self.pool, user).await
    }

    async fn find_patient_by_name(&self, name: &str) -> Result<Option<User>> {
        users::find_patient_by_name(&self.pool, name).await
    }

    async fn get_patients(&self) -> Result<Vec<User>> {
        users::get_patients(&self.pool).await
    }

    // Catalogue
    async fn get_specialties(&self) -> Result<Vec<Specialty>> {
        specialties::get_all(&self.pool).await
    }

    async fn get_doctors(&self) -> Result<Vec<Doctor>> {
        doctors::get_all(&self.pool).await
    }

    async fn get_doctors_by_specialty(&self, specialty: &str) -> Result<Vec<Doctor>> {
        doctors::get_by_specialty(&self.pool, specialty).await
    }

    async fn find_doctor_by_name(&self, name: &str) -> Result<Option<Doctor>> {
        doctors::find_by_name(&self.pool, name).await
    }

    // Appointments
    async fn count_active_in_slot(
        &self,
        doctor_id: DoctorId,
        slot: &Slot,
        excluding: Option<AppointmentId>,
    ) -> Result<i64> {
        appointments::count_active_in_slot(&self.pool, doctor_id, slot, excluding).await
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> Result<Appointment> {
        appointments::create(&self.pool, appointment).await
    }

    async fn reschedule_appointment(
        &self,
        id: AppointmentId,
        appointment: NewAppointment,
    ) -> Result<Appointment> {
        appointments::reschedule(&self.pool, id, appointment).await
    }

    async fn get_appointment(&self, id: AppointmentId) -> Result<Option<Appointment>> {
        appointments::get_by_id(&self.pool, id).await
    }

    async fn cancel_appointment(&self, id: AppointmentId) -> Result<()> {
        appointments::cancel(&self.pool, id).await
    }

    async fn get_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<AppointmentDetails>> {
        appointments::list(&self.pool, filter).await
    }
}
