use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::models::Appointment;

/// Scan `records` for a booking that would collide with the given
/// (date, time, doctor) triple. At most one appointment may hold a triple,
/// so the first hit is the only possible hit.
///
/// `exclude_id` skips the record being updated, letting a record keep its
/// own slot.
pub fn find_conflict<'a>(
    records: &'a [Appointment],
    date: NaiveDate,
    time: NaiveTime,
    doctor_id: &str,
    exclude_id: Option<&str>,
) -> Option<&'a Appointment> {
    debug!("Checking conflicts for doctor {doctor_id} at {date} {time}");

    let hit = records.iter().find(|r| {
        if exclude_id == Some(r.id.as_str()) {
            return false;
        }
        r.date == date && r.time == time && r.doctor_id == doctor_id
    });

    if let Some(existing) = hit {
        warn!(
            "Conflict detected for doctor {doctor_id} at {date} {time} with appointment {}",
            existing.id
        );
    }

    hit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(id: &str, date: &str, time: &str, doctor_id: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            date: date.parse().unwrap(),
            time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            duration: 30,
            patient_id: "p1".to_string(),
            doctor_id: doctor_id.to_string(),
            patient_name: "John Doe".to_string(),
            doctor_name: "Dr. Smith".to_string(),
            doctor_specialty: "Cardiology".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn same_triple_collides() {
        let records = vec![appointment("a1", "2024-06-10", "09:00", "d1")];
        let hit = find_conflict(
            &records,
            "2024-06-10".parse().unwrap(),
            NaiveTime::parse_from_str("09:00", "%H:%M").unwrap(),
            "d1",
            None,
        );
        assert_eq!(hit.map(|a| a.id.as_str()), Some("a1"));
    }

    #[test]
    fn different_doctor_or_time_does_not_collide() {
        let records = vec![appointment("a1", "2024-06-10", "09:00", "d1")];
        let date: NaiveDate = "2024-06-10".parse().unwrap();
        let nine_thirty = NaiveTime::parse_from_str("09:30", "%H:%M").unwrap();
        let nine = NaiveTime::parse_from_str("09:00", "%H:%M").unwrap();
        assert!(find_conflict(&records, date, nine_thirty, "d1", None).is_none());
        assert!(find_conflict(&records, date, nine, "d2", None).is_none());
    }

    #[test]
    fn excluded_record_keeps_its_own_slot() {
        let records = vec![appointment("a1", "2024-06-10", "09:00", "d1")];
        let date: NaiveDate = "2024-06-10".parse().unwrap();
        let nine = NaiveTime::parse_from_str("09:00", "%H:%M").unwrap();
        assert!(find_conflict(&records, date, nine, "d1", Some("a1")).is_none());
        assert!(find_conflict(&records, date, nine, "d1", Some("a2")).is_some());
    }
}
