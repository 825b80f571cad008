//! Mess menu parsing and lookup.
//!
//! The menu arrives as a PDF table of four rotating weeks. Text extraction
//! flattens the table, so [`parse_schedule`] recovers weeks, days and the
//! lunch/dinner boundary from markers and dish-name heuristics alone.

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod meal_time;
pub mod normalize;
pub mod schedule;
pub mod segment;
pub mod source;
pub mod split;
pub mod vocab;

pub use error::MenuError;
pub use meal_time::MealPeriod;
pub use schedule::{DayName, DayResult, Schedule, WeekResult, parse_schedule};
pub use split::{MealSplit, NOT_AVAILABLE, split_meals};
