use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional equality filters applied to a day's appointment list.
///
/// The presentation layer stores "no filter" as an empty string, so the
/// constructors normalize empty input to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayFilter {
    pub doctor: Option<String>,
    pub patient: Option<String>,
}

impl DayFilter {
    /// No filtering at all.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_selection(doctor: &str, patient: &str) -> Self {
        Self {
            doctor: (!doctor.is_empty()).then(|| doctor.to_string()),
            patient: (!patient.is_empty()).then(|| patient.to_string()),
        }
    }

    pub fn for_doctor(doctor: impl Into<String>) -> Self {
        Self {
            doctor: Some(doctor.into()),
            patient: None,
        }
    }

    pub fn for_patient(patient: impl Into<String>) -> Self {
        Self {
            doctor: None,
            patient: Some(patient.into()),
        }
    }
}

/// The cells of one month view: how many blank leading cells the grid
/// starts with (the first day's offset from Sunday) followed by the dates
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days: Vec<NaiveDate>,
}

/// Display theme persisted to the theme slot as `"dark"` / `"light"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    #[error("Month {month} of year {year} is not a valid calendar month")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Persistence failure: {0}")]
    Persistence(#[from] shared_storage::StorageError),

    #[error("Stored preference could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
