pub mod calendar;
pub mod error;

pub use calendar::{MonthLabel, MAX_YEAR, MIN_YEAR};
pub use error::{AppError, Result};
