use tracing::debug;

use crate::models::{Doctor, DoctorError};

/// Fixed doctor reference set. The roster is established at construction
/// and never changes at runtime.
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        debug!("Doctor directory initialized with {} doctors", doctors.len());
        Self { doctors }
    }

    /// The clinic's default roster.
    pub fn with_default_roster() -> Self {
        Self::new(vec![
            Doctor {
                id: "d1".to_string(),
                name: "Dr. Smith".to_string(),
                specialty: "Cardiology".to_string(),
            },
            Doctor {
                id: "d2".to_string(),
                name: "Dr. Johnson".to_string(),
                specialty: "Pediatrics".to_string(),
            },
            Doctor {
                id: "d3".to_string(),
                name: "Dr. Williams".to_string(),
                specialty: "Orthopedics".to_string(),
            },
            Doctor {
                id: "d4".to_string(),
                name: "Dr. Brown".to_string(),
                specialty: "Neurology".to_string(),
            },
        ])
    }

    pub fn get(&self, id: &str) -> Result<Doctor, DoctorError> {
        self.doctors
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| DoctorError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.doctors.iter().any(|d| d.id == id)
    }

    pub fn list(&self) -> Vec<Doctor> {
        self.doctors.clone()
    }
}
