//! Appointment types

use super::{DoctorId, Slot, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type AppointmentId = i64;

/// Appointment lifecycle state
///
/// The only transition is `Scheduled -> Cancelled`; rows are never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
}

impl AppointmentStatus {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(Self::Scheduled),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether the appointment still occupies its slot
    pub fn is_active(&self) -> bool {
        *self != Self::Cancelled
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A booked appointment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: UserId,
    pub doctor_id: DoctorId,
    pub slot: Slot,
    pub status: AppointmentStatus,
    /// Unix epoch seconds
    pub created_at: i64,
}

/// Appointment joined with the names shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    pub appointment: Appointment,
    pub patient_name: String,
    pub doctor_name: String,
    pub specialty_name: String,
}

/// Resolved data for writing an appointment row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_id: UserId,
    pub doctor_id: DoctorId,
    pub slot: Slot,
}

/// Raw booking input as typed by an operator
///
/// Patient and doctor are referenced by display name; date and time are
/// unvalidated strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub patient: String,
    pub doctor: String,
    pub date: String,
    pub time: String,
}

impl BookingRequest {
    pub fn new(
        patient: impl Into<String>,
        doctor: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            patient: patient.into(),
            doctor: doctor.into(),
            date: date.into(),
            time: time.into(),
        }
    }
}

/// Listing filter
///
/// All fields are optional and combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub patient_id: Option<UserId>,
    pub date: Option<NaiveDate>,
    pub doctor_name: Option<String>,
}

impl AppointmentFilter {
    pub fn for_patient(patient_id: UserId) -> Self {
        Self {
            patient_id: Some(patient_id),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_match_storage_values() {
        assert_eq!(AppointmentStatus::Scheduled.as_str(), "scheduled");
        assert_eq!(
            AppointmentStatus::from_str("cancelled"),
            Some(AppointmentStatus::Cancelled)
        );
        assert_eq!(AppointmentStatus::from_str("programada"), None);
    }

    #[test]
    fn only_cancelled_is_inactive() {
        assert!(AppointmentStatus::Scheduled.is_active());
        assert!(!AppointmentStatus::Cancelled.is_active());
    }
}
