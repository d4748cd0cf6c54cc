use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use appointment_cell::{Appointment, AppointmentStore};

use crate::models::{CalendarError, DayFilter, MonthGrid};

/// Read-only view over the appointment store: derives the per-day lists the
/// day view renders and the per-date counts the month view badges with.
/// Never mutates store state.
pub struct ScheduleView {
    store: Arc<AppointmentStore>,
}

impl ScheduleView {
    pub fn new(store: Arc<AppointmentStore>) -> Self {
        Self { store }
    }

    /// The appointments of one calendar day, filtered and ordered by start
    /// time ascending. Returns a fresh vector each call.
    pub fn list_for_day(&self, date: NaiveDate, filter: &DayFilter) -> Vec<Appointment> {
        let mut appointments: Vec<Appointment> = self
            .store
            .query_by_date(date)
            .into_iter()
            .filter(|a| Self::matches(a, filter))
            .collect();
        appointments.sort_by_key(|a| a.time);
        debug!("{} appointments listed for {date}", appointments.len());
        appointments
    }

    /// Appointment counts per date for one month, honoring the same filter
    /// as the day view. Dates without a matching appointment are absent.
    pub fn day_counts_for_month(
        &self,
        year: i32,
        month: u32,
        filter: &DayFilter,
    ) -> BTreeMap<NaiveDate, usize> {
        let mut counts = BTreeMap::new();
        for appointment in self.store.snapshot() {
            if appointment.date.year() == year
                && appointment.date.month() == month
                && Self::matches(&appointment, filter)
            {
                *counts.entry(appointment.date).or_insert(0) += 1;
            }
        }
        counts
    }

    /// The cell layout of one month: leading blanks up to the first day's
    /// weekday (Sunday-based, as the calendar renders weeks) and the dates
    /// of the month in order.
    pub fn month_grid(year: i32, month: u32) -> Result<MonthGrid, CalendarError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(CalendarError::InvalidMonth { year, month })?;

        let mut days = Vec::with_capacity(31);
        let mut day = first;
        while day.month() == month {
            days.push(day);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        Ok(MonthGrid {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }

    fn matches(appointment: &Appointment, filter: &DayFilter) -> bool {
        if let Some(doctor) = &filter.doctor {
            if appointment.doctor_id != *doctor {
                return false;
            }
        }
        if let Some(patient) = &filter.patient {
            if appointment.patient_id != *patient {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn june_2024_grid_starts_on_saturday() {
        let grid = ScheduleView::month_grid(2024, 6).unwrap();
        assert_eq!(grid.leading_blanks, 6);
        assert_eq!(grid.days.len(), 30);
        assert_eq!(grid.days[0], NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(grid.days[29], NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn leap_february_has_29_days() {
        let grid = ScheduleView::month_grid(2024, 2).unwrap();
        assert_eq!(grid.days.len(), 29);
        // 2024-02-01 is a Thursday
        assert_eq!(grid.leading_blanks, 4);
    }

    #[test]
    fn month_13_is_rejected() {
        assert!(matches!(
            ScheduleView::month_grid(2024, 13),
            Err(CalendarError::InvalidMonth { .. })
        ));
    }

    #[test]
    fn december_grid_reaches_year_end() {
        let grid = ScheduleView::month_grid(2024, 12).unwrap();
        assert_eq!(grid.days.len(), 31);
        assert_eq!(
            grid.days[30],
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }
}
