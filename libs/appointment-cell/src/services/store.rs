use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDate, Timelike};
use tracing::{debug, error};

use doctor_cell::DoctorDirectory;
use patient_cell::PatientRegistry;
use shared_config::AppConfig;
use shared_storage::DurableStore;

use crate::models::{Appointment, AppointmentError, StoreEvent, DURATION_OPTIONS};
use crate::services::conflict;

type Listener = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// The appointment collection, held in memory and mirrored to a durable
/// slot after every mutation.
///
/// All collaborators are injected: the durable slot, the doctor directory
/// and the patient registry the store validates references against. The
/// store owns no visual state and knows nothing about rendering; interested
/// parties register a listener via [`AppointmentStore::subscribe`].
pub struct AppointmentStore {
    slot_key: String,
    storage: Arc<dyn DurableStore>,
    doctors: Arc<DoctorDirectory>,
    patients: Arc<PatientRegistry>,
    records: Mutex<Vec<Appointment>>,
    listeners: Mutex<Vec<Listener>>,
}

impl std::fmt::Debug for AppointmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppointmentStore")
            .field("slot_key", &self.slot_key)
            .finish_non_exhaustive()
    }
}

impl AppointmentStore {
    /// Load the collection from the durable slot. An absent slot is an
    /// empty collection; a slot that cannot be read or decoded is an error,
    /// not a silent reset.
    pub fn open(
        config: &AppConfig,
        storage: Arc<dyn DurableStore>,
        doctors: Arc<DoctorDirectory>,
        patients: Arc<PatientRegistry>,
    ) -> Result<Self, AppointmentError> {
        let records: Vec<Appointment> = match storage.read(&config.appointments_key)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        debug!(
            "Loaded {} appointments from slot {}",
            records.len(),
            config.appointments_key
        );

        Ok(Self {
            slot_key: config.appointments_key.clone(),
            storage,
            doctors,
            patients,
            records: Mutex::new(records),
            listeners: Mutex::new(Vec::new()),
        })
    }

    /// Book a new appointment. The caller pre-generates the identifier.
    ///
    /// Fails with `SchedulingConflict` when another record already holds the
    /// (date, time, doctor) triple, and with `InvalidReference` when the
    /// patient or doctor id does not resolve. On either failure the
    /// collection is left untouched.
    pub fn create(&self, appointment: Appointment) -> Result<(), AppointmentError> {
        self.validate(&appointment)?;
        let id = appointment.id.clone();

        let persisted = {
            let mut records = self.lock_records();
            if records.iter().any(|r| r.id == appointment.id) {
                return Err(AppointmentError::DuplicateId(id));
            }
            if conflict::find_conflict(
                &records,
                appointment.date,
                appointment.time,
                &appointment.doctor_id,
                None,
            )
            .is_some()
            {
                return Err(AppointmentError::SchedulingConflict {
                    date: appointment.date,
                    time: appointment.time,
                    doctor_id: appointment.doctor_id,
                });
            }

            debug!(
                "Creating appointment {id} for doctor {} on {} at {}",
                appointment.doctor_id, appointment.date, appointment.time
            );
            records.push(appointment);
            self.persist(&records)
        };

        self.notify(&StoreEvent::Created(id));
        persisted
    }

    /// Replace the record sharing the input's identifier with the new value
    /// (full-record update, no partial-field merge).
    ///
    /// The conflict scan excludes the record being updated, so a record may
    /// keep its own slot. An unknown identifier is a `NotFound` error.
    pub fn update(&self, appointment: Appointment) -> Result<(), AppointmentError> {
        self.validate(&appointment)?;
        let id = appointment.id.clone();

        let persisted = {
            let mut records = self.lock_records();
            let Some(pos) = records.iter().position(|r| r.id == id) else {
                return Err(AppointmentError::NotFound(id));
            };
            if conflict::find_conflict(
                &records,
                appointment.date,
                appointment.time,
                &appointment.doctor_id,
                Some(&id),
            )
            .is_some()
            {
                return Err(AppointmentError::SchedulingConflict {
                    date: appointment.date,
                    time: appointment.time,
                    doctor_id: appointment.doctor_id,
                });
            }

            debug!("Updating appointment {id}");
            records[pos] = appointment;
            self.persist(&records)
        };

        self.notify(&StoreEvent::Updated(id));
        persisted
    }

    /// Remove the record with the given identifier. Deleting an absent id
    /// is a no-op; the slot is rewritten either way.
    pub fn delete(&self, id: &str) -> Result<(), AppointmentError> {
        let (removed, persisted) = {
            let mut records = self.lock_records();
            let before = records.len();
            records.retain(|r| r.id != id);
            let removed = records.len() != before;
            if removed {
                debug!("Deleted appointment {id}");
            }
            (removed, self.persist(&records))
        };

        if removed {
            self.notify(&StoreEvent::Deleted(id.to_string()));
        }
        persisted
    }

    /// All records for the given calendar date, in store order. Filtering
    /// and chronological ordering are the query layer's concern.
    pub fn query_by_date(&self, date: NaiveDate) -> Vec<Appointment> {
        self.lock_records()
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect()
    }

    /// A copy of the full collection, for range views.
    pub fn snapshot(&self) -> Vec<Appointment> {
        self.lock_records().clone()
    }

    pub fn len(&self) -> usize {
        self.lock_records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_records().is_empty()
    }

    /// Register a listener invoked after every successful mutation.
    pub fn subscribe(&self, listener: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(listener));
    }

    fn validate(&self, appointment: &Appointment) -> Result<(), AppointmentError> {
        if !DURATION_OPTIONS.contains(&appointment.duration) {
            return Err(AppointmentError::InvalidDuration(appointment.duration));
        }
        if appointment.time.minute() % 30 != 0 || appointment.time.second() != 0 {
            return Err(AppointmentError::OffGridTime(appointment.time));
        }
        if !self.doctors.contains(&appointment.doctor_id) {
            return Err(AppointmentError::InvalidReference(
                appointment.doctor_id.clone(),
            ));
        }
        if !self.patients.contains(&appointment.patient_id) {
            return Err(AppointmentError::InvalidReference(
                appointment.patient_id.clone(),
            ));
        }
        Ok(())
    }

    /// Serialize the whole collection back to the durable slot. A failed
    /// write leaves the in-memory state in place and is reported to the
    /// caller, so memory and slot never diverge silently.
    fn persist(&self, records: &[Appointment]) -> Result<(), AppointmentError> {
        let raw = serde_json::to_string(records)?;
        if let Err(e) = self.storage.write(&self.slot_key, &raw) {
            error!("Failed to persist {} appointments: {e}", records.len());
            return Err(e.into());
        }
        Ok(())
    }

    fn notify(&self, event: &StoreEvent) {
        let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        debug!("Notifying {} listeners: {event}", listeners.len());
        for listener in listeners.iter() {
            listener(event);
        }
    }

    fn lock_records(&self) -> MutexGuard<'_, Vec<Appointment>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}
