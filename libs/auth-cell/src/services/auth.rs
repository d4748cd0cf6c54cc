use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_storage::DurableStore;

use crate::models::{AuthError, Session, STAFF_ROLE};

/// Single-credential staff login with a durable session slot.
///
/// The clinic has exactly one staff credential, supplied by configuration.
/// A successful login writes the session to the slot so it survives a
/// restart; logout removes it.
pub struct AuthService {
    staff_email: String,
    staff_password: String,
    session_key: String,
    login_latency: Duration,
    storage: Arc<dyn DurableStore>,
}

impl AuthService {
    pub fn new(config: &AppConfig, storage: Arc<dyn DurableStore>) -> Self {
        Self {
            staff_email: config.staff_email.clone(),
            staff_password: config.staff_password.clone(),
            session_key: config.session_key.clone(),
            login_latency: Duration::from_millis(config.login_latency_ms),
            storage,
        }
    }

    /// Check the (email, password) pair against the staff credential.
    /// On success the session is persisted and returned.
    ///
    /// The configured latency simulates a network round trip; it has no
    /// bearing on data integrity.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        debug!("Login attempt for {email}");
        if !self.login_latency.is_zero() {
            thread::sleep(self.login_latency);
        }

        if email != self.staff_email || password != self.staff_password {
            warn!("Rejected login for {email}");
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session {
            email: email.to_string(),
            role: STAFF_ROLE.to_string(),
        };
        let raw = serde_json::to_string(&session)?;
        self.storage.write(&self.session_key, &raw)?;
        debug!("Session opened for {email}");

        Ok(session)
    }

    /// The session currently stored in the slot, if any.
    pub fn current_session(&self) -> Result<Option<Session>, AuthError> {
        match self.storage.read(&self.session_key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Remove the stored session. Logging out twice is harmless.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.storage.remove(&self.session_key)?;
        debug!("Session closed");
        Ok(())
    }
}
