pub mod conflict;
pub mod store;
