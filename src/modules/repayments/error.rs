use super::models::{SimulationResult, SimulationStatus};

/// Typed failures returned by the repayment simulator
///
/// Every failure is deterministic: re-running the same input reproduces it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Salary does not leave any disposable income
    #[error("monthly salary ({monthly_salary:.2}) must exceed living expense ({living_expense:.2})")]
    InsufficientIncome {
        monthly_salary: f64,
        living_expense: f64,
    },

    /// Salary or living expense is negative or not a number
    #[error("invalid income: {0}")]
    InvalidIncome(String),

    /// Neither debtors nor courses were supplied
    #[error("add at least one debtor or course before calculating")]
    NoObligations,

    /// A debt, fee or term is non-positive, or a ledger key is unusable
    #[error("invalid obligation: {0}")]
    InvalidObligation(String),

    /// Start month outside 1-12
    #[error("start month must be between 1 and 12, got {0}")]
    InvalidStartMonth(u32),

    /// Base year outside the supported calendar range
    #[error("base year must be between {min} and {max}, got {0}", min = crate::core::MIN_YEAR, max = crate::core::MAX_YEAR)]
    InvalidBaseYear(i32),

    /// Obligations were still outstanding when the horizon was reached
    #[error("repayment did not finish within {} months", .partial.total_months)]
    ExceededHorizon { partial: Box<SimulationResult> },
}

impl SimulationError {
    pub fn invalid_obligation(msg: impl Into<String>) -> Self {
        SimulationError::InvalidObligation(msg.into())
    }

    /// Status a caller should report for this failure, when one applies
    pub fn status(&self) -> Option<SimulationStatus> {
        match self {
            SimulationError::InsufficientIncome { .. } => Some(SimulationStatus::InsufficientIncome),
            SimulationError::ExceededHorizon { .. } => Some(SimulationStatus::ExceededHorizon),
            _ => None,
        }
    }

    /// Ledger recorded up to the horizon, if the run got that far
    pub fn partial_result(&self) -> Option<&SimulationResult> {
        match self {
            SimulationError::ExceededHorizon { partial } => Some(partial.as_ref()),
            _ => None,
        }
    }
}
