use serde::{Deserialize, Serialize};

use crate::modules::repayments::{SimulationError, TOLERANCE};

/// A person owed money, repaid proportionally to their current balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debtor {
    /// Unique, non-empty display name; doubles as the ledger key
    pub name: String,
    /// Outstanding balance at the start of the plan
    pub debt: f64,
}

impl Debtor {
    pub fn new(name: impl Into<String>, debt: f64) -> Self {
        Self {
            name: name.into(),
            debt,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.name.trim().is_empty() {
            return Err(SimulationError::invalid_obligation(
                "debtor name must not be empty",
            ));
        }

        if !self.debt.is_finite() || self.debt <= TOLERANCE {
            return Err(SimulationError::invalid_obligation(format!(
                "debt owed to {} must be greater than {}, got {}",
                self.name, TOLERANCE, self.debt
            )));
        }

        Ok(())
    }
}

/// A fixed-term course paid off in equal monthly instalments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Total fee
    pub fee: f64,
    /// Number of monthly instalments
    pub months: u32,
}

impl Course {
    pub fn new(fee: f64, months: u32) -> Self {
        Self { fee, months }
    }

    /// Fixed instalment drawn each month until the fee is settled
    pub fn monthly_amount(&self) -> f64 {
        self.fee / f64::from(self.months)
    }

    /// Positional ledger key, 1-based in input order
    pub fn id_for(position: usize) -> String {
        format!("course_{}", position + 1)
    }

    pub fn validate(&self, position: usize) -> Result<(), SimulationError> {
        if !self.fee.is_finite() || self.fee <= TOLERANCE {
            return Err(SimulationError::invalid_obligation(format!(
                "{} fee must be greater than {}, got {}",
                Self::id_for(position),
                TOLERANCE,
                self.fee
            )));
        }

        if self.months == 0 {
            return Err(SimulationError::invalid_obligation(format!(
                "{} must run for at least one month",
                Self::id_for(position)
            )));
        }

        Ok(())
    }
}
