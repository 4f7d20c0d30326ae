//! Clinic Core
//!
//! Storage-agnostic domain types, booking rules, and error handling for the
//! clinic appointment system.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Specialty`, `Doctor`, `Appointment`, `Slot`
//! - **Storage Seam**: the `ClinicStore` trait, implemented by `clinic-storage`
//! - **Lifecycle**: `AppointmentManager` (availability, create, reschedule, cancel)
//! - **Accounts**: `AccountService` (registration and authentication)
//! - **Error Handling**: Unified `ClinicError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use clinic_core::types::{AppointmentStatus, Slot};
//!
//! let slot = Slot::parse("2024-05-01", "9:00").unwrap();
//! assert_eq!(slot.time_string(), "09:00");
//! assert_eq!(AppointmentStatus::Scheduled.as_str(), "scheduled");
//!
//! // Out-of-range values never reach the availability check
//! assert!(Slot::parse("2024-13-40", "09:00").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accounts;
pub mod booking;
pub mod error;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use accounts::AccountService;
pub use booking::AppointmentManager;
pub use error::{ClinicError, Result};
pub use store::ClinicStore;

pub use types::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentId, AppointmentStatus,
    BookingRequest, Doctor, DoctorId, NewAppointment, NewUser, RegisterPatient, Role, Slot,
    Specialty, SpecialtyId, StoredCredentials, User, UserId,
};
