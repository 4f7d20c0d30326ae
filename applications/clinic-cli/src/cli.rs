//! Command-line definitions
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic appointment booking", long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ./clinic.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Login for commands that act on behalf of a user
#[derive(Debug, Clone, Args)]
pub struct Credentials {
    /// Username
    #[arg(short, long)]
    pub username: String,

    /// Password
    #[arg(short, long)]
    pub password: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the database and load seed data
    Init,

    /// Register a new patient account
    Register {
        /// First name, shown as the patient's display name
        #[arg(long)]
        name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        address: String,
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// List specialties
    Specialties,

    /// List doctors
    Doctors {
        /// Only doctors of this specialty
        #[arg(long)]
        specialty: Option<String>,
    },

    /// List patients (admin only)
    Patients {
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Check whether a doctor is free at a date and time
    Availability {
        #[arg(long)]
        doctor: String,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Time as HH:MM
        #[arg(long)]
        time: String,
    },

    /// Book an appointment
    Book {
        #[command(flatten)]
        credentials: Credentials,
        /// Patient name (defaults to the logged-in patient)
        #[arg(long)]
        patient: Option<String>,
        #[arg(long)]
        doctor: String,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Time as HH:MM
        #[arg(long)]
        time: String,
    },

    /// Move an appointment to another patient, doctor or slot (admin only)
    Reschedule {
        #[command(flatten)]
        credentials: Credentials,
        /// Appointment id
        id: i64,
        #[arg(long)]
        patient: String,
        #[arg(long)]
        doctor: String,
        /// Date as YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// Time as HH:MM
        #[arg(long)]
        time: String,
    },

    /// Cancel an appointment
    Cancel {
        #[command(flatten)]
        credentials: Credentials,
        /// Appointment id
        id: i64,
    },

    /// List appointments (patients only see their own)
    Appointments {
        #[command(flatten)]
        credentials: Credentials,
        /// Only appointments on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Only appointments with this doctor
        #[arg(long)]
        doctor: Option<String>,
    },
}
