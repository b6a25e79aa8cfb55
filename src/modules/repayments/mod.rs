pub mod controllers;
pub mod error;
pub mod models;
pub mod services;

pub use controllers::{calculate, export_csv};
pub use error::SimulationError;
pub use models::{Course, Debtor, MonthRecord, SimulationInput, SimulationResult, SimulationStatus};
pub use services::{
    simulate, LedgerCsvExporter, RepaymentSimulator, SummaryRenderer, HORIZON_MONTHS, TOLERANCE,
};
