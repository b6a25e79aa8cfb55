use std::fmt;

use crate::modules::repayments::models::{SimulationInput, SimulationResult, SimulationStatus};

const MIN_COLUMN_WIDTH: usize = 10;

/// Renders a simulation as a plain-text report
///
/// The report opens with the plan's totals, follows with one table row per
/// simulated month (amount paid to every obligation) and ends with the month
/// each obligation was settled in.
pub struct SummaryRenderer;

impl SummaryRenderer {
    pub fn render(input: &SimulationInput, result: &SimulationResult) -> String {
        SummaryReport { input, result }.to_string()
    }
}

struct SummaryReport<'a> {
    input: &'a SimulationInput,
    result: &'a SimulationResult,
}

impl SummaryReport<'_> {
    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = self.input;
        writeln!(f, "Monthly salary: {:.2}", input.monthly_salary)?;
        writeln!(f, "Monthly living expense: {:.2}", input.living_expense)?;
        writeln!(f, "Total debt: {:.2}", input.total_debt())?;
        writeln!(f, "Total course fees: {:.2}", input.total_course_fees())?;
        writeln!(f, "Monthly course fees: {:.2}", input.monthly_course_total())?;
        writeln!(f, "Longest course term: {} months", input.longest_course_term())?;
        writeln!(f, "Start month: {} ({})", input.start_month, input.base_year)?;
        writeln!(f, "{}", "-".repeat(50))
    }

    fn write_outcome(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.result.status {
            SimulationStatus::Ok => writeln!(
                f,
                "Completed all repayments and course fees in {} months.",
                self.result.total_months
            ),
            SimulationStatus::ExceededHorizon => writeln!(
                f,
                "Stopped after {} months with obligations still outstanding.",
                self.result.total_months
            ),
            SimulationStatus::InsufficientIncome => {
                writeln!(f, "Salary does not cover living expenses; nothing was repaid.")
            }
        }
    }

    fn write_table(&self, f: &mut fmt::Formatter<'_>, ids: &[String]) -> fmt::Result {
        let widths: Vec<usize> = ids
            .iter()
            .map(|id| MIN_COLUMN_WIDTH.max(id.chars().count() + 2))
            .collect();

        write!(
            f,
            "{:>w$}{:>w$}{:>w$}",
            "Month",
            "Label",
            "Available",
            w = MIN_COLUMN_WIDTH
        )?;
        for (id, width) in ids.iter().zip(&widths) {
            write!(f, "{:>w$}", id, w = *width)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{}",
            "-".repeat(MIN_COLUMN_WIDTH * 3 + widths.iter().sum::<usize>())
        )?;

        for record in &self.result.ledger {
            write!(
                f,
                "{:>w$}{:>w$}{:>w$.2}",
                record.month_index,
                record.calendar_label.to_string(),
                record.disposable_income,
                w = MIN_COLUMN_WIDTH
            )?;
            for (id, width) in ids.iter().zip(&widths) {
                write!(f, "{:>w$.2}", record.paid_to(id), w = *width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }

    fn write_completions(&self, f: &mut fmt::Formatter<'_>, ids: &[String]) -> fmt::Result {
        writeln!(f, "Settled in:")?;
        for id in ids {
            match self.result.completion_month(id) {
                Some(month) => writeln!(f, "{} -> month {}", id, month)?,
                None => writeln!(f, "{} -> not settled", id)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids = self.input.obligation_ids();

        self.write_header(f)?;
        self.write_outcome(f)?;
        writeln!(f)?;
        self.write_table(f, &ids)?;
        writeln!(f)?;
        self.write_completions(f, &ids)
    }
}
