use std::sync::Mutex;

use tracing::debug;
use uuid::Uuid;

use crate::models::{Patient, PatientError, RegisterPatientRequest};

const MAX_PATIENT_AGE: u32 = 150;

/// Patient reference set. Seeded at construction; grows at runtime through
/// [`PatientRegistry::register_patient`] only.
pub struct PatientRegistry {
    patients: Mutex<Vec<Patient>>,
}

impl PatientRegistry {
    pub fn new(patients: Vec<Patient>) -> Self {
        debug!("Patient registry initialized with {} patients", patients.len());
        Self {
            patients: Mutex::new(patients),
        }
    }

    /// The clinic's seed roster.
    pub fn with_default_roster() -> Self {
        Self::new(vec![
            Patient { id: "p1".to_string(), name: "John Doe".to_string(), age: 35 },
            Patient { id: "p2".to_string(), name: "Jane Smith".to_string(), age: 28 },
            Patient { id: "p3".to_string(), name: "Robert Johnson".to_string(), age: 45 },
            Patient { id: "p4".to_string(), name: "Emily Davis".to_string(), age: 22 },
            Patient { id: "p5".to_string(), name: "Michael Wilson".to_string(), age: 60 },
        ])
    }

    /// Validate and add a new patient, minting a fresh identifier.
    pub fn register_patient(
        &self,
        request: RegisterPatientRequest,
    ) -> Result<Patient, PatientError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(PatientError::ValidationError(
                "Patient name must not be empty".to_string(),
            ));
        }
        if request.age > MAX_PATIENT_AGE {
            return Err(PatientError::ValidationError(format!(
                "Patient age {} is out of range",
                request.age
            )));
        }

        let patient = Patient {
            id: Uuid::new_v4().simple().to_string(),
            name: name.to_string(),
            age: request.age,
        };

        debug!("Registering new patient {} ({})", patient.name, patient.id);
        self.patients.lock().unwrap_or_else(|e| e.into_inner()).push(patient.clone());

        Ok(patient)
    }

    pub fn get(&self, id: &str) -> Result<Patient, PatientError> {
        self.patients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PatientError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.patients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|p| p.id == id)
    }

    pub fn list(&self) -> Vec<Patient> {
        self.patients.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
