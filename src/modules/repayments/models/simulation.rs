use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::obligation::{Course, Debtor};
use crate::core::MonthLabel;

/// Validated plan handed to the simulator
///
/// Owned by the caller for the duration of one run; nothing here outlives the
/// call to `simulate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub monthly_salary: f64,
    pub living_expense: f64,
    /// Month the plan is drawn up in (1-12)
    pub start_month: u32,
    /// Calendar year that `start_month` falls in
    pub base_year: i32,
    pub debtors: Vec<Debtor>,
    pub courses: Vec<Course>,
}

impl SimulationInput {
    pub fn disposable_income(&self) -> f64 {
        self.monthly_salary - self.living_expense
    }

    pub fn total_debt(&self) -> f64 {
        self.debtors.iter().map(|d| d.debt).sum()
    }

    pub fn total_course_fees(&self) -> f64 {
        self.courses.iter().map(|c| c.fee).sum()
    }

    /// Sum of every course's instalment, i.e. the draw while all courses run
    pub fn monthly_course_total(&self) -> f64 {
        self.courses.iter().map(Course::monthly_amount).sum()
    }

    pub fn longest_course_term(&self) -> u32 {
        self.courses.iter().map(|c| c.months).max().unwrap_or(0)
    }

    /// Ledger keys for every obligation: debtor names then course ids
    pub fn obligation_ids(&self) -> Vec<String> {
        self.debtors
            .iter()
            .map(|d| d.name.clone())
            .chain((0..self.courses.len()).map(Course::id_for))
            .collect()
    }
}

/// One simulated month; never mutated after it is appended to the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthRecord {
    pub month_index: u32,
    pub calendar_label: MonthLabel,
    pub disposable_income: f64,
    /// Courses that received a positive payment this month
    pub course_payments: BTreeMap<String, f64>,
    /// Debtors that received a positive payment this month
    pub debtor_payments: BTreeMap<String, f64>,
    pub remaining_course_fees: BTreeMap<String, f64>,
    pub remaining_debtor_balances: BTreeMap<String, f64>,
    pub total_paid_this_month: f64,
    pub leftover_income_this_month: f64,
}

impl MonthRecord {
    /// Amount paid to an obligation this month, zero when it received nothing
    pub fn paid_to(&self, id: &str) -> f64 {
        self.debtor_payments
            .get(id)
            .or_else(|| self.course_payments.get(id))
            .copied()
            .unwrap_or(0.0)
    }

    /// Balance left on an obligation after this month's payments
    pub fn remaining_for(&self, id: &str) -> Option<f64> {
        self.remaining_debtor_balances
            .get(id)
            .or_else(|| self.remaining_course_fees.get(id))
            .copied()
    }
}

/// How a simulation run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationStatus {
    /// Every obligation settled within the horizon
    Ok,
    /// Obligations still outstanding after the horizon
    ExceededHorizon,
    /// Salary does not exceed living expense
    InsufficientIncome,
}

impl SimulationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::ExceededHorizon => "exceeded_horizon",
            Self::InsufficientIncome => "insufficient_income",
        }
    }
}

impl fmt::Display for SimulationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Month-by-month ledger plus completion bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub ledger: Vec<MonthRecord>,
    /// Month index each course was settled in; absent if never settled
    pub course_completion_month: BTreeMap<String, u32>,
    /// Month index each debtor was settled in; absent if never settled
    pub debtor_completion_month: BTreeMap<String, u32>,
    pub total_months: u32,
    pub status: SimulationStatus,
}

impl SimulationResult {
    pub fn completion_month(&self, id: &str) -> Option<u32> {
        self.debtor_completion_month
            .get(id)
            .or_else(|| self.course_completion_month.get(id))
            .copied()
    }

    /// Sorted union of every debtor name and course id seen across the run
    pub fn obligation_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = self
            .ledger
            .iter()
            .flat_map(|record| {
                record
                    .remaining_debtor_balances
                    .keys()
                    .chain(record.remaining_course_fees.keys())
            })
            .cloned()
            .collect();
        columns.sort();
        columns.dedup();
        columns
    }
}
