pub mod schedule;
pub mod theme;
