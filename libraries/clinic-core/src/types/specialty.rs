//! Specialty types

use serde::{Deserialize, Serialize};

pub type SpecialtyId = i64;

/// A medical specialty offered by the clinic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialty {
    pub id: SpecialtyId,
    pub name: String,
}
