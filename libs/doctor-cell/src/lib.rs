pub mod models;
pub mod services;

pub use models::{Doctor, DoctorError};
pub use services::directory::DoctorDirectory;
