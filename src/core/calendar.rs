use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest base year a plan may be labelled from
pub const MIN_YEAR: i32 = 1;

/// Latest base year a plan may be labelled from
pub const MAX_YEAR: i32 = 9999;

/// Year/month pair used to label simulated months
///
/// Pure integer arithmetic: there are no day-of-month or leap-year semantics,
/// only the month rollover into the next year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MonthLabel {
    pub year: i32,
    pub month: u32,
}

impl MonthLabel {
    /// Label for the `month_index`-th simulated month (1-based)
    ///
    /// `start_month` is the month the plan is drawn up in, so month 1 of the
    /// ledger lands in the calendar month that follows it. Callers keep
    /// `base_year` within `MIN_YEAR..=MAX_YEAR`.
    pub fn for_month(base_year: i32, start_month: u32, month_index: u32) -> Self {
        debug_assert!((MIN_YEAR..=MAX_YEAR).contains(&base_year));
        let offset = start_month + month_index - 1;
        Self {
            year: base_year + (offset / 12) as i32,
            month: offset % 12 + 1,
        }
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:02}", self.year, self.month)
    }
}

impl From<MonthLabel> for String {
    fn from(label: MonthLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for MonthLabel {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        let (year, month) = value
            .split_once('/')
            .ok_or_else(|| format!("Invalid month label: {}", value))?;
        let year = year
            .parse()
            .map_err(|_| format!("Invalid year in month label: {}", value))?;
        let month = month
            .parse()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| format!("Invalid month in month label: {}", value))?;
        Ok(Self { year, month })
    }
}

/// Current local calendar year, used when a request omits `base_year`
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
