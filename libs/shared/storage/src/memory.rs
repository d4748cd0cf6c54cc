use std::collections::HashMap;
use std::sync::Mutex;

use crate::{DurableStore, StorageError};

/// In-memory implementation of the durable slot, for tests and ephemeral
/// runs. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Unavailable("store lock poisoned".into()))?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Unavailable("store lock poisoned".into()))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Unavailable("store lock poisoned".into()))?;
        slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_and_remove() {
        let store = MemoryStore::new();
        assert!(store.read("appointments").unwrap().is_none());
        store.write("appointments", "[]").unwrap();
        assert_eq!(store.read("appointments").unwrap().as_deref(), Some("[]"));
        store.remove("appointments").unwrap();
        assert!(store.read("appointments").unwrap().is_none());
    }
}
