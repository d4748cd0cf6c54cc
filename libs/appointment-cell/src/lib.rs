pub mod models;
pub mod services;

pub use models::{
    Appointment, AppointmentError, StoreEvent, DURATION_OPTIONS, fresh_id, time_slot_grid,
};
pub use services::store::AppointmentStore;
