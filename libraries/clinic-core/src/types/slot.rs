//! Bookable time slot

use crate::error::{ClinicError, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// A calendar date plus a 24-hour time of day
///
/// Slots are always stored in canonical form (`YYYY-MM-DD`, `HH:MM`), so two
/// spellings of the same moment (`9:00` and `09:00`) compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl Slot {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Validate raw date and time input
    ///
    /// Rejects empty values, impossible dates (`2024-13-40`) and impossible
    /// times (`25:99`) with `ClinicError::Validation`.
    pub fn parse(date: &str, time: &str) -> Result<Self> {
        Ok(Self {
            date: parse_date(date)?,
            time: parse_time(time)?,
        })
    }

    /// Canonical `YYYY-MM-DD` representation
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    /// Canonical `HH:MM` representation
    pub fn time_string(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date_string(), self.time_string())
    }
}

/// Parse an ISO calendar date (`YYYY-MM-DD`)
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClinicError::validation("date is required"));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        ClinicError::validation(format!("invalid date '{}', expected YYYY-MM-DD", value))
    })
}

/// Parse a 24-hour time of day (`HH:MM`)
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClinicError::validation("time is required"));
    }

    NaiveTime::parse_from_str(value, TIME_FORMAT).map_err(|_| {
        ClinicError::validation(format!("invalid time '{}', expected HH:MM", value))
    })
}
