//! Command execution
//!
//! Every command authenticates first when it acts on behalf of a user, then
//! hands off to `AppointmentManager` or `AccountService`. Output goes to the
//! writer passed in, as plain text lines or JSON.
use crate::cli::{Command, Credentials};
use crate::config::ClinicConfig;
use crate::error::Result;
use clinic_core::types::parse_date;
use clinic_core::{
    AccountService, AppointmentDetails, AppointmentFilter, AppointmentManager, BookingRequest,
    ClinicError, ClinicStore, RegisterPatient, User,
};
use clinic_storage::seed::{self, SeedOptions};
use clinic_storage::LocalClinicStore;
use serde::Serialize;
use std::io::Write;

/// Open the configured database, apply migrations and load seed data
pub async fn open_store(config: &ClinicConfig) -> Result<LocalClinicStore> {
    let store = LocalClinicStore::open(&config.storage.database_url).await?;

    seed::run(
        store.pool(),
        &SeedOptions {
            sample_patient: config.seed.sample_patient,
            bcrypt_cost: config.auth.bcrypt_cost,
        },
    )
    .await?;

    Ok(store)
}

/// Services a single CLI invocation works with
pub struct App<S> {
    accounts: AccountService<S>,
    manager: AppointmentManager<S>,
    json: bool,
}

impl<S: ClinicStore + Clone> App<S> {
    pub fn new(store: S, bcrypt_cost: u32) -> Self {
        Self {
            accounts: AccountService::new(store.clone(), bcrypt_cost),
            manager: AppointmentManager::new(store),
            json: false,
        }
    }

    /// Print results as JSON instead of text lines
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub async fn execute<W: Write>(&self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Init => {
                let specialties = self.store().get_specialties().await?;
                let doctors = self.store().get_doctors().await?;
                writeln!(
                    out,
                    "Database ready: {} specialties, {} doctors",
                    specialties.len(),
                    doctors.len()
                )?;
            }

            Command::Register {
                name,
                last_name,
                email,
                address,
                username,
                password,
            } => {
                let user = self
                    .accounts
                    .register(RegisterPatient {
                        name,
                        last_name,
                        email,
                        address,
                        username,
                        password,
                    })
                    .await?;

                if self.json {
                    write_json(out, &user)?;
                } else {
                    writeln!(out, "Registered patient {} (id {})", user.username, user.id)?;
                }
            }

            Command::Specialties => {
                let specialties = self.store().get_specialties().await?;
                if self.json {
                    write_json(out, &specialties)?;
                } else {
                    for specialty in specialties {
                        writeln!(out, "{}", specialty.name)?;
                    }
                }
            }

            Command::Doctors { specialty } => {
                let doctors = match specialty.as_deref().map(str::trim) {
                    Some(name) if !name.is_empty() => {
                        self.store().get_doctors_by_specialty(name).await?
                    }
                    _ => self.store().get_doctors().await?,
                };

                if self.json {
                    write_json(out, &doctors)?;
                } else {
                    for doctor in doctors {
                        writeln!(out, "{} ({})", doctor.name, doctor.specialty_name)?;
                    }
                }
            }

            Command::Patients { credentials } => {
                let actor = self.login(&credentials).await?;
                if !actor.is_admin() {
                    return Err(
                        ClinicError::permission_denied("only administrators can list patients")
                            .into(),
                    );
                }

                let patients = self.store().get_patients().await?;
                if self.json {
                    write_json(out, &patients)?;
                } else {
                    for patient in patients {
                        writeln!(out, "{}  {} ({})", patient.id, patient.name, patient.username)?;
                    }
                }
            }

            Command::Availability { doctor, date, time } => {
                let (slot, available) = self
                    .manager
                    .check_availability(&doctor, &date, &time)
                    .await?;

                if self.json {
                    write_json(
                        out,
                        &serde_json::json!({
                            "doctor": doctor.trim(),
                            "date": slot.date_string(),
                            "time": slot.time_string(),
                            "available": available,
                        }),
                    )?;
                } else if available {
                    writeln!(out, "{} is available at {}", doctor.trim(), slot)?;
                } else {
                    writeln!(out, "{} is not available at {}", doctor.trim(), slot)?;
                }
            }

            Command::Book {
                credentials,
                patient,
                doctor,
                date,
                time,
            } => {
                let actor = self.login(&credentials).await?;
                let patient = patient.unwrap_or_else(|| actor.name.clone());
                let request = BookingRequest::new(patient, doctor, date, time);

                let appointment = self.manager.create(&actor, &request).await?;

                if self.json {
                    write_json(out, &appointment)?;
                } else {
                    writeln!(
                        out,
                        "Booked appointment {}: {} at {}",
                        appointment.id,
                        request.doctor.trim(),
                        appointment.slot
                    )?;
                }
            }

            Command::Reschedule {
                credentials,
                id,
                patient,
                doctor,
                date,
                time,
            } => {
                let actor = self.login(&credentials).await?;
                let request = BookingRequest::new(patient, doctor, date, time);

                let appointment = self.manager.reschedule(&actor, id, &request).await?;

                if self.json {
                    write_json(out, &appointment)?;
                } else {
                    writeln!(
                        out,
                        "Rescheduled appointment {}: {} at {}",
                        appointment.id,
                        request.doctor.trim(),
                        appointment.slot
                    )?;
                }
            }

            Command::Cancel { credentials, id } => {
                let actor = self.login(&credentials).await?;
                let appointment = self.manager.cancel(&actor, id).await?;

                if self.json {
                    write_json(out, &appointment)?;
                } else {
                    writeln!(out, "Cancelled appointment {}", appointment.id)?;
                }
            }

            Command::Appointments {
                credentials,
                date,
                doctor,
            } => {
                let actor = self.login(&credentials).await?;
                let filter = AppointmentFilter {
                    patient_id: None,
                    date: date.as_deref().map(parse_date).transpose()?,
                    doctor_name: doctor
                        .map(|name| name.trim().to_string())
                        .filter(|name| !name.is_empty()),
                };

                let appointments = self.manager.appointments(&actor, filter).await?;

                if self.json {
                    write_json(out, &appointments)?;
                } else if appointments.is_empty() {
                    writeln!(out, "No appointments")?;
                } else {
                    for details in &appointments {
                        writeln!(out, "{}", appointment_line(details))?;
                    }
                }
            }
        }

        Ok(())
    }

    fn store(&self) -> &S {
        self.manager.store()
    }

    async fn login(&self, credentials: &Credentials) -> Result<User> {
        let user = self
            .accounts
            .authenticate(&credentials.username, &credentials.password)
            .await?;
        tracing::debug!("Authenticated {} as {}", user.username, user.role);
        Ok(user)
    }
}

fn appointment_line(details: &AppointmentDetails) -> String {
    let appointment = &details.appointment;
    format!(
        "{:>4}  {}  {:<9}  {}  {} ({})",
        appointment.id,
        appointment.slot,
        appointment.status.as_str(),
        details.patient_name,
        details.doctor_name,
        details.specialty_name
    )
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
