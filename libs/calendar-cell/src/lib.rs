pub mod models;
pub mod services;

pub use models::{CalendarError, DayFilter, MonthGrid, Theme};
pub use services::schedule::ScheduleView;
pub use services::theme::ThemePreference;
