pub mod repayment_controller;

pub use repayment_controller::{calculate, configure, export_csv, CalculateRequest};
