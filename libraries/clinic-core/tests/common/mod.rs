//! In-memory `ClinicStore` used to exercise the booking rules without a database
#![allow(dead_code)]

use async_trait::async_trait;
use clinic_core::accounts::hash_password;
use clinic_core::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentId, AppointmentStatus,
    ClinicError, ClinicStore, Doctor, DoctorId, NewAppointment, NewUser, Result, Role, Slot,
    Specialty, StoredCredentials, User,
};
use std::sync::{Arc, Mutex};

pub const TEST_COST: u32 = 4;

pub const PATIENT_NAME: &str = "Paciente Prueba";
pub const PATIENT_USERNAME: &str = "paciente1";
pub const PATIENT_PASSWORD: &str = "pass123";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

#[derive(Default)]
struct State {
    users: Vec<StoredCredentials>,
    specialties: Vec<Specialty>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    /// Number of slot lookups, to prove validation happens first
    availability_checks: usize,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    /// Store with the clinic's seed data: admin, sample patient, four doctors
    pub fn seeded() -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            for (id, name) in [(1, "Cardiología"), (2, "Pediatría"), (3, "Dermatología")] {
                state.specialties.push(Specialty {
                    id,
                    name: name.to_string(),
                });
            }
            for (id, name, specialty_id) in [
                (1, "Dr. García", 1),
                (2, "Dra. Rodríguez", 1),
                (3, "Dr. Martínez", 2),
                (4, "Dra. López", 3),
            ] {
                let specialty_name = state.specialties[specialty_id as usize - 1].name.clone();
                state.doctors.push(Doctor {
                    id,
                    name: name.to_string(),
                    specialty_id,
                    specialty_name,
                });
            }
        }

        store.insert_user("Administrador", ADMIN_USERNAME, ADMIN_PASSWORD, Role::Admin);
        store.insert_user(PATIENT_NAME, PATIENT_USERNAME, PATIENT_PASSWORD, Role::Patient);
        store
    }

    pub fn insert_user(&self, name: &str, username: &str, password: &str, role: Role) -> User {
        let mut state = self.state.lock().unwrap();
        let user = User {
            id: state.users.len() as i64 + 1,
            name: name.to_string(),
            last_name: None,
            email: None,
            address: None,
            username: username.to_string(),
            role,
            created_at: 0,
        };
        state.users.push(StoredCredentials {
            user: user.clone(),
            password_hash: hash_password(password, TEST_COST).unwrap(),
        });
        user
    }

    pub fn user(&self, username: &str) -> User {
        let state = self.state.lock().unwrap();
        state
            .users
            .iter()
            .find(|c| c.user.username == username)
            .map(|c| c.user.clone())
            .expect("user should exist")
    }

    pub fn admin(&self) -> User {
        self.user(ADMIN_USERNAME)
    }

    pub fn patient(&self) -> User {
        self.user(PATIENT_USERNAME)
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn appointment_count(&self) -> usize {
        self.state.lock().unwrap().appointments.len()
    }

    pub fn availability_checks(&self) -> usize {
        self.state.lock().unwrap().availability_checks
    }
}

fn active_in_slot(
    state: &State,
    doctor_id: DoctorId,
    slot: &Slot,
    excluding: Option<AppointmentId>,
) -> i64 {
    state
        .appointments
        .iter()
        .filter(|a| a.doctor_id == doctor_id && a.slot == *slot && a.status.is_active())
        .filter(|a| Some(a.id) != excluding)
        .count() as i64
}

fn conflict(slot: &Slot, doctor_id: DoctorId) -> ClinicError {
    ClinicError::SlotConflict {
        doctor: doctor_id.to_string(),
        date: slot.date_string(),
        time: slot.time_string(),
    }
}

#[async_trait]
impl ClinicStore for MemoryStore {
    async fn find_credentials(&self, username: &str) -> Result<Option<StoredCredentials>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|c| c.user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|c| c.user.username == user.username) {
            return Err(ClinicError::DuplicateUsername(user.username));
        }
        let created = User {
            id: state.users.len() as i64 + 1,
            name: user.name,
            last_name: user.last_name,
            email: user.email,
            address: user.address,
            username: user.username,
            role: user.role,
            created_at: 0,
        };
        state.users.push(StoredCredentials {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }

    async fn find_patient_by_name(&self, name: &str) -> Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|c| c.user.role == Role::Patient && c.user.name == name)
            .map(|c| c.user.clone()))
    }

    async fn get_patients(&self) -> Result<Vec<User>> {
        let state = self.state.lock().unwrap();
        let mut patients: Vec<User> = state
            .users
            .iter()
            .filter(|c| c.user.role == Role::Patient)
            .map(|c| c.user.clone())
            .collect();
        patients.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(patients)
    }

    async fn get_specialties(&self) -> Result<Vec<Specialty>> {
        Ok(self.state.lock().unwrap().specialties.clone())
    }

    async fn get_doctors(&self) -> Result<Vec<Doctor>> {
        Ok(self.state.lock().unwrap().doctors.clone())
    }

    async fn get_doctors_by_specialty(&self, specialty: &str) -> Result<Vec<Doctor>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .doctors
            .iter()
            .filter(|d| d.specialty_name == specialty)
            .cloned()
            .collect())
    }

    async fn find_doctor_by_name(&self, name: &str) -> Result<Option<Doctor>> {
        let state = self.state.lock().unwrap();
        Ok(state.doctors.iter().find(|d| d.name == name).cloned())
    }

    async fn count_active_in_slot(
        &self,
        doctor_id: DoctorId,
        slot: &Slot,
        excluding: Option<AppointmentId>,
    ) -> Result<i64> {
        let mut state = self.state.lock().unwrap();
        state.availability_checks += 1;
        Ok(active_in_slot(&state, doctor_id, slot, excluding))
    }

    async fn create_appointment(&self, appointment: NewAppointment) -> Result<Appointment> {
        let mut state = self.state.lock().unwrap();
        if active_in_slot(&state, appointment.doctor_id, &appointment.slot, None) > 0 {
            return Err(conflict(&appointment.slot, appointment.doctor_id));
        }
        let created = Appointment {
            id: state.appointments.len() as i64 + 1,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            slot: appointment.slot,
            status: AppointmentStatus::Scheduled,
            created_at: 0,
        };
        state.appointments.push(created.clone());
        Ok(created)
    }

    async fn reschedule_appointment(
        &self,
        id: AppointmentId,
        appointment: NewAppointment,
    ) -> Result<Appointment> {
        let mut state = self.state.lock().unwrap();
        if active_in_slot(&state, appointment.doctor_id, &appointment.slot, Some(id)) > 0 {
            return Err(conflict(&appointment.slot, appointment.doctor_id));
        }
        let row = state
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ClinicError::not_found("Appointment", id.to_string()))?;
        row.patient_id = appointment.patient_id;
        row.doctor_id = appointment.doctor_id;
        row.slot = appointment.slot;
        Ok(row.clone())
    }

    async fn get_appointment(&self, id: AppointmentId) -> Result<Option<Appointment>> {
        let state = self.state.lock().unwrap();
        Ok(state.appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn cancel_appointment(&self, id: AppointmentId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let row = state
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| ClinicError::not_found("Appointment", id.to_string()))?;
        row.status = AppointmentStatus::Cancelled;
        Ok(())
    }

    async fn get_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<AppointmentDetails>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<AppointmentDetails> = state
            .appointments
            .iter()
            .filter(|a| filter.patient_id.map_or(true, |id| a.patient_id == id))
            .filter(|a| filter.date.map_or(true, |date| a.slot.date == date))
            .filter_map(|a| {
                let doctor = state.doctors.iter().find(|d| d.id == a.doctor_id)?;
                let patient = state.users.iter().find(|c| c.user.id == a.patient_id)?;
                Some(AppointmentDetails {
                    appointment: a.clone(),
                    patient_name: patient.user.name.clone(),
                    doctor_name: doctor.name.clone(),
                    specialty_name: doctor.specialty_name.clone(),
                })
            })
            .filter(|d| {
                filter
                    .doctor_name
                    .as_ref()
                    .map_or(true, |name| &d.doctor_name == name)
            })
            .collect();
        rows.sort_by(|a, b| b.appointment.slot.cmp(&a.appointment.slot));
        Ok(rows)
    }
}
