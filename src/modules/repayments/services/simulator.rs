use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, trace, warn};

use crate::core::{MonthLabel, MAX_YEAR, MIN_YEAR};
use crate::modules::repayments::error::SimulationError;
use crate::modules::repayments::models::{
    Course, MonthRecord, SimulationInput, SimulationResult, SimulationStatus,
};

/// Balances at or below this are treated as settled
pub const TOLERANCE: f64 = 0.001;

/// Maximum number of simulated months before a run is declared non-convergent
pub const HORIZON_MONTHS: u32 = 2000;

/// Month-by-month allocation of disposable income across courses and debtors
///
/// Each month courses are served first, in input order, each drawing at most
/// its fixed instalment. Whatever income is left is then split across the
/// debtors still owed money in proportion to their current balances, taken
/// from a snapshot at the start of the debtor pass so list position never
/// favours one debtor over another.
pub struct RepaymentSimulator;

#[derive(Debug)]
struct CourseBalance {
    id: String,
    monthly_amount: f64,
    remaining: f64,
}

#[derive(Debug)]
struct DebtorBalance {
    name: String,
    remaining: f64,
}

impl RepaymentSimulator {
    /// Run the plan to completion or to the horizon
    ///
    /// # Errors
    /// - `InvalidIncome` / `InsufficientIncome` when there is no disposable income
    /// - `InvalidStartMonth` when the start month is outside 1-12
    /// - `InvalidBaseYear` when the base year is outside `MIN_YEAR..=MAX_YEAR`
    /// - `NoObligations` when there is nothing to repay
    /// - `InvalidObligation` for amounts at or below `TOLERANCE`, empty or
    ///   duplicate names
    /// - `ExceededHorizon` when obligations remain after `HORIZON_MONTHS`; the
    ///   partial ledger is carried on the error
    pub fn simulate(input: &SimulationInput) -> Result<SimulationResult, SimulationError> {
        Self::validate(input)?;

        let disposable_income = input.disposable_income();

        let mut courses: Vec<CourseBalance> = input
            .courses
            .iter()
            .enumerate()
            .map(|(position, course)| CourseBalance {
                id: Course::id_for(position),
                monthly_amount: course.monthly_amount(),
                remaining: course.fee,
            })
            .collect();

        let mut debtors: Vec<DebtorBalance> = input
            .debtors
            .iter()
            .map(|debtor| DebtorBalance {
                name: debtor.name.clone(),
                remaining: debtor.debt,
            })
            .collect();

        info!(
            disposable_income,
            debtors = debtors.len(),
            courses = courses.len(),
            start_month = input.start_month,
            base_year = input.base_year,
            "Starting repayment simulation"
        );

        let mut ledger = Vec::new();
        let mut course_completion_month = BTreeMap::new();
        let mut debtor_completion_month = BTreeMap::new();
        let mut month_index = 0u32;

        while !Self::all_settled(&courses, &debtors) {
            if month_index >= HORIZON_MONTHS {
                warn!(
                    months = month_index,
                    outstanding_debt = debtors.iter().map(|d| d.remaining).sum::<f64>(),
                    outstanding_fees = courses.iter().map(|c| c.remaining).sum::<f64>(),
                    "Repayment simulation exceeded horizon"
                );

                return Err(SimulationError::ExceededHorizon {
                    partial: Box::new(SimulationResult {
                        ledger,
                        course_completion_month,
                        debtor_completion_month,
                        total_months: month_index,
                        status: SimulationStatus::ExceededHorizon,
                    }),
                });
            }

            month_index += 1;
            let mut income_left = disposable_income;

            let course_payments = Self::pay_courses(
                &mut courses,
                &mut income_left,
                month_index,
                &mut course_completion_month,
            );

            let debtor_payments = Self::pay_debtors(
                &mut debtors,
                &mut income_left,
                month_index,
                &mut debtor_completion_month,
            );

            let record = MonthRecord {
                month_index,
                calendar_label: MonthLabel::for_month(
                    input.base_year,
                    input.start_month,
                    month_index,
                ),
                disposable_income,
                course_payments,
                debtor_payments,
                remaining_course_fees: courses
                    .iter()
                    .map(|c| (c.id.clone(), c.remaining))
                    .collect(),
                remaining_debtor_balances: debtors
                    .iter()
                    .map(|d| (d.name.clone(), d.remaining))
                    .collect(),
                total_paid_this_month: disposable_income - income_left,
                leftover_income_this_month: income_left,
            };

            trace!(
                month = month_index,
                label = %record.calendar_label,
                paid = record.total_paid_this_month,
                leftover = record.leftover_income_this_month,
                "Simulated month"
            );

            ledger.push(record);
        }

        info!(total_months = month_index, "Repayment simulation completed");

        Ok(SimulationResult {
            ledger,
            course_completion_month,
            debtor_completion_month,
            total_months: month_index,
            status: SimulationStatus::Ok,
        })
    }

    /// Check the preconditions once, before any month is simulated
    fn validate(input: &SimulationInput) -> Result<(), SimulationError> {
        for (label, value) in [
            ("monthly salary", input.monthly_salary),
            ("living expense", input.living_expense),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidIncome(format!(
                    "{} must be a non-negative number, got {}",
                    label, value
                )));
            }
        }

        if input.monthly_salary <= input.living_expense {
            return Err(SimulationError::InsufficientIncome {
                monthly_salary: input.monthly_salary,
                living_expense: input.living_expense,
            });
        }

        if !(1..=12).contains(&input.start_month) {
            return Err(SimulationError::InvalidStartMonth(input.start_month));
        }

        if !(MIN_YEAR..=MAX_YEAR).contains(&input.base_year) {
            return Err(SimulationError::InvalidBaseYear(input.base_year));
        }

        if input.debtors.is_empty() && input.courses.is_empty() {
            return Err(SimulationError::NoObligations);
        }

        let course_ids: HashSet<String> = (0..input.courses.len()).map(Course::id_for).collect();
        let mut names = HashSet::new();

        for debtor in &input.debtors {
            debtor.validate()?;

            if !names.insert(debtor.name.as_str()) {
                return Err(SimulationError::invalid_obligation(format!(
                    "debtor name {} is listed more than once",
                    debtor.name
                )));
            }

            if course_ids.contains(&debtor.name) {
                return Err(SimulationError::invalid_obligation(format!(
                    "debtor name {} clashes with a course identifier",
                    debtor.name
                )));
            }
        }

        for (position, course) in input.courses.iter().enumerate() {
            course.validate(position)?;
        }

        Ok(())
    }

    fn all_settled(courses: &[CourseBalance], debtors: &[DebtorBalance]) -> bool {
        courses.iter().all(|c| c.remaining <= TOLERANCE)
            && debtors.iter().all(|d| d.remaining <= TOLERANCE)
    }

    /// Serve courses in input order; earlier courses win when income is scarce
    fn pay_courses(
        courses: &mut [CourseBalance],
        income_left: &mut f64,
        month_index: u32,
        completion: &mut BTreeMap<String, u32>,
    ) -> BTreeMap<String, f64> {
        let mut payments = BTreeMap::new();

        for course in courses.iter_mut().filter(|c| c.remaining > TOLERANCE) {
            let pay = course.monthly_amount.min(course.remaining).min(*income_left);
            if pay <= 0.0 {
                continue;
            }

            course.remaining = (course.remaining - pay).max(0.0);
            *income_left = (*income_left - pay).max(0.0);
            payments.insert(course.id.clone(), pay);

            if course.remaining <= TOLERANCE {
                course.remaining = 0.0;
                completion.entry(course.id.clone()).or_insert(month_index);
                debug!(course = %course.id, month = month_index, "Course fee settled");
            }
        }

        payments
    }

    /// Split the residual income proportionally to a snapshot of active balances
    fn pay_debtors(
        debtors: &mut [DebtorBalance],
        income_left: &mut f64,
        month_index: u32,
        completion: &mut BTreeMap<String, u32>,
    ) -> BTreeMap<String, f64> {
        let mut payments = BTreeMap::new();

        let snapshot: Vec<(usize, f64)> = debtors
            .iter()
            .enumerate()
            .filter(|(_, d)| d.remaining > TOLERANCE)
            .map(|(i, d)| (i, d.remaining))
            .collect();
        let total_active: f64 = snapshot.iter().map(|(_, balance)| balance).sum();

        // Dust left over after the course pass is not worth distributing
        if total_active <= 0.0 || *income_left <= TOLERANCE {
            return payments;
        }

        let pool = *income_left;
        for (i, balance) in snapshot {
            let pay = (balance / total_active * pool).min(balance);
            if pay <= 0.0 {
                continue;
            }

            let debtor = &mut debtors[i];
            debtor.remaining = (debtor.remaining - pay).max(0.0);
            *income_left -= pay;
            payments.insert(debtor.name.clone(), pay);

            if debtor.remaining <= TOLERANCE {
                debtor.remaining = 0.0;
                completion.entry(debtor.name.clone()).or_insert(month_index);
                debug!(debtor = %debtor.name, month = month_index, "Debt settled");
            }
        }

        // Proportional shares can overshoot the pool by a rounding error
        *income_left = income_left.max(0.0);

        payments
    }
}

/// Convenience wrapper around [`RepaymentSimulator::simulate`]
pub fn simulate(input: &SimulationInput) -> Result<SimulationResult, SimulationError> {
    RepaymentSimulator::simulate(input)
}
