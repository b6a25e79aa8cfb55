pub mod obligation;
pub mod simulation;

pub use obligation::{Course, Debtor};
pub use simulation::{MonthRecord, SimulationInput, SimulationResult, SimulationStatus};
