//! User domain types
use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Patient,
}

impl Role {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Patient => "patient",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "patient" => Some(Self::Patient),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User account (patient or administrator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Optional profile fields collected at registration
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,

    /// Unique login name
    pub username: String,

    pub role: Role,

    /// Account creation timestamp (Unix epoch seconds)
    pub created_at: i64,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A user together with the stored password hash
///
/// Only the account service looks at the hash; everything else works with `User`.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Data for inserting a new user row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

/// Patient self-registration form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterPatient {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub username: String,
    pub password: String,
}
