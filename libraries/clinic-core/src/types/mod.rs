mod appointment;
mod doctor;
mod slot;
mod specialty;
mod user;

pub use appointment::{
    Appointment, AppointmentDetails, AppointmentFilter, AppointmentId, AppointmentStatus,
    BookingRequest, NewAppointment,
};
pub use doctor::{Doctor, DoctorId};
pub use slot::{parse_date, parse_time, Slot};
pub use specialty::{Specialty, SpecialtyId};
pub use user::{NewUser, RegisterPatient, Role, StoredCredentials, User, UserId};
