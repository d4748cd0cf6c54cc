use std::env;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub appointments_key: String,
    pub session_key: String,
    pub theme_key: String,
    pub staff_email: String,
    pub staff_password: String,
    pub login_latency_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            data_dir: env::var("CLINIC_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| {
                    warn!("CLINIC_DATA_DIR not set, using ./clinic-data");
                    PathBuf::from("clinic-data")
                }),
            appointments_key: env::var("CLINIC_APPOINTMENTS_KEY")
                .unwrap_or_else(|_| "appointments".to_string()),
            session_key: env::var("CLINIC_SESSION_KEY")
                .unwrap_or_else(|_| "user".to_string()),
            theme_key: env::var("CLINIC_THEME_KEY")
                .unwrap_or_else(|_| "theme".to_string()),
            staff_email: env::var("CLINIC_STAFF_EMAIL")
                .unwrap_or_else(|_| "staff@clinic.com".to_string()),
            staff_password: env::var("CLINIC_STAFF_PASSWORD")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_STAFF_PASSWORD not set, using built-in default");
                    "123456".to_string()
                }),
            login_latency_ms: env::var("CLINIC_LOGIN_LATENCY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - storage keys must not be empty");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.appointments_key.is_empty()
            && !self.session_key.is_empty()
            && !self.theme_key.is_empty()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("clinic-data"),
            appointments_key: "appointments".to_string(),
            session_key: "user".to_string(),
            theme_key: "theme".to_string(),
            staff_email: "staff@clinic.com".to_string(),
            staff_password: "123456".to_string(),
            login_latency_ms: 0,
        }
    }
}
