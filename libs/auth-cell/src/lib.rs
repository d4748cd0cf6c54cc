pub mod models;
pub mod services;

pub use models::{AuthError, Session};
pub use services::auth::AuthService;
