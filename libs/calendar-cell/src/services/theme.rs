use std::sync::Arc;

use tracing::debug;

use shared_config::AppConfig;
use shared_storage::DurableStore;

use crate::models::{CalendarError, Theme};

/// Display-theme preference backed by the theme slot. The clinic UI starts
/// dark, so an absent slot reads as [`Theme::Dark`].
pub struct ThemePreference {
    theme_key: String,
    storage: Arc<dyn DurableStore>,
}

impl ThemePreference {
    pub fn new(config: &AppConfig, storage: Arc<dyn DurableStore>) -> Self {
        Self {
            theme_key: config.theme_key.clone(),
            storage,
        }
    }

    pub fn current(&self) -> Result<Theme, CalendarError> {
        match self.storage.read(&self.theme_key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Theme::Dark),
        }
    }

    pub fn set(&self, theme: Theme) -> Result<(), CalendarError> {
        debug!("Setting theme to {theme:?}");
        let raw = serde_json::to_string(&theme)?;
        self.storage.write(&self.theme_key, &raw)?;
        Ok(())
    }

    /// Flip the stored preference and return the new value.
    pub fn toggle(&self) -> Result<Theme, CalendarError> {
        let next = self.current()?.toggled();
        self.set(next)?;
        Ok(next)
    }
}
