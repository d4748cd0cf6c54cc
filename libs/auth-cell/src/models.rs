use serde::{Deserialize, Serialize};

/// The authenticated session persisted to the session slot as
/// `{email, role}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    pub role: String,
}

pub const STAFF_ROLE: &str = "staff";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Persistence failure: {0}")]
    Persistence(#[from] shared_storage::StorageError),

    #[error("Stored session could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
