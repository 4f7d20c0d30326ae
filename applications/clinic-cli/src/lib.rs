//! Clinic CLI Library
//!
//! Command-line front end for the clinic appointment system: loads
//! configuration, opens the store and forwards each command to the booking
//! and account services.
//!
//! This library exposes the core components for testing purposes.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::{Cli, Command, Credentials};
pub use commands::{open_store, App};
pub use config::ClinicConfig;
pub use error::{CliError, Result};
