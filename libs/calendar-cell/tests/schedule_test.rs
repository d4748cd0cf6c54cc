use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};

use appointment_cell::{Appointment, AppointmentStore};
use calendar_cell::{DayFilter, ScheduleView};
use doctor_cell::DoctorDirectory;
use patient_cell::PatientRegistry;
use shared_config::AppConfig;
use shared_storage::MemoryStore;

fn view_over(entries: &[(&str, &str, &str, &str, &str)]) -> Result<ScheduleView> {
    let store = AppointmentStore::open(
        &AppConfig::default(),
        Arc::new(MemoryStore::new()),
        Arc::new(DoctorDirectory::with_default_roster()),
        Arc::new(PatientRegistry::with_default_roster()),
    )?;
    for (id, date, time, doctor_id, patient_id) in entries {
        store.create(Appointment {
            id: id.to_string(),
            date: date.parse()?,
            time: NaiveTime::parse_from_str(time, "%H:%M")?,
            duration: 30,
            patient_id: patient_id.to_string(),
            doctor_id: doctor_id.to_string(),
            patient_name: "John Doe".to_string(),
            doctor_name: "Dr. Smith".to_string(),
            doctor_specialty: "Cardiology".to_string(),
            notes: String::new(),
        })?;
    }
    Ok(ScheduleView::new(Arc::new(store)))
}

#[test]
fn day_list_is_sorted_ascending_by_time() -> Result<()> {
    // inserted out of order on purpose
    let view = view_over(&[
        ("a1", "2024-06-10", "14:30", "d1", "p1"),
        ("a2", "2024-06-10", "08:00", "d2", "p2"),
        ("a3", "2024-06-10", "09:30", "d3", "p3"),
    ])?;

    let day: NaiveDate = "2024-06-10".parse()?;
    let listed = view.list_for_day(day, &DayFilter::none());
    let times: Vec<String> = listed
        .iter()
        .map(|a| a.time.format("%H:%M").to_string())
        .collect();
    assert_eq!(times, vec!["08:00", "09:30", "14:30"]);
    Ok(())
}

#[test]
fn unfiltered_day_list_returns_both_records() -> Result<()> {
    let view = view_over(&[
        ("a1", "2024-06-10", "09:00", "d1", "p1"),
        ("a2", "2024-06-10", "09:30", "d1", "p2"),
    ])?;

    let day: NaiveDate = "2024-06-10".parse()?;
    let listed = view.list_for_day(day, &DayFilter::from_selection("", ""));
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, "a1");
    assert_eq!(listed[1].id, "a2");
    Ok(())
}

#[test]
fn doctor_filter_without_matches_yields_empty_list() -> Result<()> {
    let view = view_over(&[
        ("a1", "2024-06-10", "09:00", "d1", "p1"),
        ("a2", "2024-06-10", "09:30", "d1", "p2"),
    ])?;

    let day: NaiveDate = "2024-06-10".parse()?;
    assert!(view
        .list_for_day(day, &DayFilter::for_doctor("d2"))
        .is_empty());
    Ok(())
}

#[test]
fn doctor_and_patient_filters_apply_together() -> Result<()> {
    let view = view_over(&[
        ("a1", "2024-06-10", "09:00", "d1", "p1"),
        ("a2", "2024-06-10", "09:30", "d1", "p2"),
        ("a3", "2024-06-10", "10:00", "d2", "p1"),
    ])?;

    let day: NaiveDate = "2024-06-10".parse()?;

    let by_doctor = view.list_for_day(day, &DayFilter::for_doctor("d1"));
    assert_eq!(by_doctor.len(), 2);

    let by_patient = view.list_for_day(day, &DayFilter::for_patient("p1"));
    assert_eq!(by_patient.len(), 2);

    let both = view.list_for_day(day, &DayFilter::from_selection("d1", "p1"));
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].id, "a1");
    Ok(())
}

#[test]
fn day_list_does_not_leak_other_dates() -> Result<()> {
    let view = view_over(&[
        ("a1", "2024-06-10", "09:00", "d1", "p1"),
        ("a2", "2024-06-11", "09:00", "d1", "p1"),
    ])?;

    let listed = view.list_for_day("2024-06-10".parse()?, &DayFilter::none());
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "a1");
    Ok(())
}

#[test]
fn month_counts_follow_the_active_filter() -> Result<()> {
    let view = view_over(&[
        ("a1", "2024-06-10", "09:00", "d1", "p1"),
        ("a2", "2024-06-10", "09:30", "d2", "p2"),
        ("a3", "2024-06-21", "11:00", "d1", "p3"),
        ("a4", "2024-07-01", "11:00", "d1", "p3"),
    ])?;

    let all = view.day_counts_for_month(2024, 6, &DayFilter::none());
    assert_eq!(all.get(&"2024-06-10".parse::<NaiveDate>()?), Some(&2));
    assert_eq!(all.get(&"2024-06-21".parse::<NaiveDate>()?), Some(&1));
    assert!(!all.contains_key(&"2024-07-01".parse::<NaiveDate>()?));

    let d1_only = view.day_counts_for_month(2024, 6, &DayFilter::for_doctor("d1"));
    assert_eq!(d1_only.get(&"2024-06-10".parse::<NaiveDate>()?), Some(&1));
    Ok(())
}
