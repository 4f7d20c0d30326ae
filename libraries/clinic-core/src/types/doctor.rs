//! Doctor types

use super::SpecialtyId;
use serde::{Deserialize, Serialize};

pub type DoctorId = i64;

/// A doctor, bound to exactly one specialty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialty_id: SpecialtyId,
    /// Denormalized for listings
    pub specialty_name: String,
}
