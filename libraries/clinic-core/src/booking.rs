//! Appointment lifecycle: availability, booking, rescheduling, cancellation
//!
//! `AppointmentManager` holds no state of its own. Every rule runs against the
//! `ClinicStore` it wraps, so the same logic drives the `SQLite` store and the
//! in-memory store used in tests.

use crate::error::{ClinicError, Result};
use crate::store::ClinicStore;
use crate::types::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentId, AppointmentStatus,
    BookingRequest, Doctor, DoctorId, NewAppointment, Role, Slot, User,
};

/// Booking request after validation and name resolution
struct ResolvedBooking {
    patient: User,
    doctor: Doctor,
    slot: Slot,
}

impl ResolvedBooking {
    fn new_appointment(&self) -> NewAppointment {
        NewAppointment {
            patient_id: self.patient.id,
            doctor_id: self.doctor.id,
            slot: self.slot,
        }
    }

    fn conflict(&self) -> ClinicError {
        ClinicError::SlotConflict {
            doctor: self.doctor.name.clone(),
            date: self.slot.date_string(),
            time: self.slot.time_string(),
        }
    }
}

/// Creates, reschedules and cancels appointments
pub struct AppointmentManager<S> {
    store: S,
}

impl<S: ClinicStore> AppointmentManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether the doctor has no active appointment in `slot`
    ///
    /// `excluding` ignores one appointment, used when an appointment is saved
    /// back onto its own slot. Pure read.
    pub async fn is_available(
        &self,
        doctor_id: DoctorId,
        slot: &Slot,
        excluding: Option<AppointmentId>,
    ) -> Result<bool> {
        let active = self
            .store
            .count_active_in_slot(doctor_id, slot, excluding)
            .await?;
        Ok(active == 0)
    }

    /// Availability check from raw operator input
    ///
    /// Returns the validated slot along with whether it is free.
    pub async fn check_availability(
        &self,
        doctor: &str,
        date: &str,
        time: &str,
    ) -> Result<(Slot, bool)> {
        let doctor = require("doctor", doctor)?;
        let slot = Slot::parse(date, time)?;
        let doctor = self.resolve_doctor(doctor).await?;
        let available = self.is_available(doctor.id, &slot, None).await?;
        Ok((slot, available))
    }

    /// Book a new appointment in `scheduled` state
    ///
    /// Patients may only book for themselves; admins may book for any patient.
    pub async fn create(&self, actor: &User, request: &BookingRequest) -> Result<Appointment> {
        let booking = self.resolve(actor, request).await?;

        if !self.is_available(booking.doctor.id, &booking.slot, None).await? {
            tracing::info!(
                "Rejected booking for {} at {}: slot taken",
                booking.doctor.name,
                booking.slot
            );
            return Err(booking.conflict());
        }

        // The store re-checks atomically; a concurrent writer can still win here
        let appointment = self
            .store
            .create_appointment(booking.new_appointment())
            .await
            .map_err(|e| if e.is_slot_conflict() { booking.conflict() } else { e })?;

        tracing::info!(
            "Booked appointment {} for {} with {} at {}",
            appointment.id,
            booking.patient.name,
            booking.doctor.name,
            booking.slot
        );

        Ok(appointment)
    }

    /// Overwrite patient, doctor, date and time of an appointment (admin only)
    ///
    /// The appointment's own row does not count against the target slot, so
    /// re-saving an unchanged appointment succeeds.
    pub async fn reschedule(
        &self,
        actor: &User,
        id: AppointmentId,
        request: &BookingRequest,
    ) -> Result<Appointment> {
        if !actor.is_admin() {
            return Err(ClinicError::permission_denied(
                "only administrators can reschedule appointments",
            ));
        }

        let booking = self.resolve(actor, request).await?;

        if self.store.get_appointment(id).await?.is_none() {
            return Err(ClinicError::not_found("Appointment", id.to_string()));
        }

        if !self
            .is_available(booking.doctor.id, &booking.slot, Some(id))
            .await?
        {
            return Err(booking.conflict());
        }

        let appointment = self
            .store
            .reschedule_appointment(id, booking.new_appointment())
            .await
            .map_err(|e| if e.is_slot_conflict() { booking.conflict() } else { e })?;

        tracing::info!(
            "Rescheduled appointment {} to {} with {} at {}",
            id,
            booking.patient.name,
            booking.doctor.name,
            booking.slot
        );

        Ok(appointment)
    }

    /// Cancel an appointment (owning patient or admin)
    ///
    /// Cancelling an already-cancelled appointment is a no-op and returns it
    /// unchanged.
    pub async fn cancel(&self, actor: &User, id: AppointmentId) -> Result<Appointment> {
        let mut appointment = self
            .store
            .get_appointment(id)
            .await?
            .ok_or_else(|| ClinicError::not_found("Appointment", id.to_string()))?;

        if !actor.is_admin() && appointment.patient_id != actor.id {
            return Err(ClinicError::permission_denied(
                "patients can only cancel their own appointments",
            ));
        }

        if appointment.status == AppointmentStatus::Cancelled {
            tracing::debug!("Appointment {} already cancelled", id);
            return Ok(appointment);
        }

        self.store.cancel_appointment(id).await?;
        appointment.status = AppointmentStatus::Cancelled;

        tracing::info!("Cancelled appointment {} (by {})", id, actor.username);

        Ok(appointment)
    }

    /// Appointments visible to `actor`
    ///
    /// Admins see everything that matches `filter`; patients only ever see
    /// their own appointments.
    pub async fn appointments(
        &self,
        actor: &User,
        filter: AppointmentFilter,
    ) -> Result<Vec<AppointmentDetails>> {
        let filter = match actor.role {
            Role::Admin => filter,
            Role::Patient => AppointmentFilter {
                patient_id: Some(actor.id),
                ..filter
            },
        };

        self.store.get_appointments(&filter).await
    }

    /// Validate, resolve names, then check the actor may book for the patient
    async fn resolve(&self, actor: &User, request: &BookingRequest) -> Result<ResolvedBooking> {
        let patient = require("patient", &request.patient)?;
        let doctor = require("doctor", &request.doctor)?;
        let slot = Slot::parse(&request.date, &request.time)?;

        let patient = self.resolve_patient(actor, patient).await?;
        let doctor = self.resolve_doctor(doctor).await?;

        if actor.role == Role::Patient && patient.id != actor.id {
            return Err(ClinicError::permission_denied(
                "patients can only book appointments for themselves",
            ));
        }

        Ok(ResolvedBooking {
            patient,
            doctor,
            slot,
        })
    }

    async fn resolve_patient(&self, actor: &User, name: &str) -> Result<User> {
        // A patient's own display name always means their own account
        if actor.role == Role::Patient && actor.name == name {
            return Ok(actor.clone());
        }

        self.store
            .find_patient_by_name(name)
            .await?
            .ok_or_else(|| ClinicError::not_found("Patient", name))
    }

    async fn resolve_doctor(&self, name: &str) -> Result<Doctor> {
        self.store
            .find_doctor_by_name(name)
            .await?
            .ok_or_else(|| ClinicError::not_found("Doctor", name))
    }
}

/// Trimmed non-empty field value
fn require<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClinicError::validation(format!("{} is required", field)));
    }
    Ok(value)
}
