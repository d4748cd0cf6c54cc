pub mod models;
pub mod services;

pub use models::{Patient, PatientError, RegisterPatientRequest};
pub use services::registry::PatientRegistry;
