use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use shared_storage::StorageError;

/// Allowed appointment lengths, in minutes.
pub const DURATION_OPTIONS: [u32; 4] = [15, 30, 45, 60];

// ==============================================================================
// CORE APPOINTMENT MODEL
// ==============================================================================

/// A scheduled booking of one patient with one doctor.
///
/// `patient_name`, `doctor_name` and `doctor_specialty` are denormalized
/// snapshots taken when the record was created; they are not re-validated
/// against the reference sets afterwards.
///
/// The serialized form is the durable-slot layout:
/// `{id, date, time, duration, patientId, doctorId, patientName, doctorName,
/// doctorSpecialty, notes}` with `date` as `yyyy-MM-dd` and `time` as `HH:mm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub duration: u32,
    pub patient_id: String,
    pub doctor_id: String,
    pub patient_name: String,
    pub doctor_name: String,
    pub doctor_specialty: String,
    pub notes: String,
}

/// Serde adapter for the `HH:mm` start-time format of the durable layout.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Mint a fresh opaque identifier for a new record. Callers pre-generate
/// ids before handing a record to the store.
pub fn fresh_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// The half-hour booking grid offered by the clinic, 08:00 through 17:30.
pub fn time_slot_grid() -> Vec<NaiveTime> {
    let mut slots = Vec::with_capacity(20);
    for hour in 8..=17 {
        for minute in [0, 30] {
            if let Some(t) = NaiveTime::from_hms_opt(hour, minute, 0) {
                slots.push(t);
            }
        }
    }
    slots
}

// ==============================================================================
// CHANGE NOTIFICATION
// ==============================================================================

/// Emitted to subscribers after each successful store mutation, so the
/// presentation layer can react to "data changed" without the store knowing
/// anything about rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created(String),
    Updated(String),
    Deleted(String),
}

impl StoreEvent {
    pub fn appointment_id(&self) -> &str {
        match self {
            StoreEvent::Created(id) | StoreEvent::Updated(id) | StoreEvent::Deleted(id) => id,
        }
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreEvent::Created(id) => write!(f, "created {id}"),
            StoreEvent::Updated(id) => write!(f, "updated {id}"),
            StoreEvent::Deleted(id) => write!(f, "deleted {id}"),
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppointmentError {
    #[error("An appointment already exists at {time} on {date} for doctor {doctor_id}")]
    SchedulingConflict {
        date: NaiveDate,
        time: NaiveTime,
        doctor_id: String,
    },

    #[error("Invalid patient or doctor reference: {0}")]
    InvalidReference(String),

    #[error("Appointment not found: {0}")]
    NotFound(String),

    #[error("Duplicate appointment id: {0}")]
    DuplicateId(String),

    #[error("Invalid appointment duration: {0} minutes")]
    InvalidDuration(u32),

    #[error("Appointment time {0} is not on the half-hour grid")]
    OffGridTime(NaiveTime),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] StorageError),

    #[error("Stored appointments could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
