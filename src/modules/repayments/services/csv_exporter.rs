use std::io;

use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::repayments::models::SimulationResult;

/// Byte order mark so spreadsheet tools open the file as UTF-8
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Flattens a ledger into CSV rows keyed by calendar label
///
/// Columns are `month`, `label`, `disposable_income`, then a `paid` /
/// `remaining` pair for every debtor and course (sorted by name), then
/// `leftover`.
#[derive(Debug, Clone, Default)]
pub struct LedgerCsvExporter {
    include_bom: bool,
}

impl LedgerCsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix the output with a UTF-8 byte order mark
    pub fn with_bom(mut self) -> Self {
        self.include_bom = true;
        self
    }

    pub fn header(result: &SimulationResult) -> Vec<String> {
        let mut header = vec![
            "month".to_string(),
            "label".to_string(),
            "disposable_income".to_string(),
        ];
        for id in result.obligation_columns() {
            header.push(format!("{} paid", id));
            header.push(format!("{} remaining", id));
        }
        header.push("leftover".to_string());
        header
    }

    /// Write the ledger to any writer
    pub fn write<W: io::Write>(&self, result: &SimulationResult, mut out: W) -> Result<()> {
        if self.include_bom {
            out.write_all(UTF8_BOM)
                .map_err(|e| AppError::internal(format!("Failed to write CSV: {}", e)))?;
        }

        let columns = result.obligation_columns();
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(Self::header(result))?;

        for record in &result.ledger {
            let mut row = vec![
                record.month_index.to_string(),
                record.calendar_label.to_string(),
                format!("{:.2}", record.disposable_income),
            ];
            for id in &columns {
                row.push(format!("{:.2}", record.paid_to(id)));
                row.push(
                    record
                        .remaining_for(id)
                        .map(|remaining| format!("{:.2}", remaining))
                        .unwrap_or_default(),
                );
            }
            row.push(format!("{:.2}", record.leftover_income_this_month));
            writer.write_record(&row)?;
        }

        writer
            .flush()
            .map_err(|e| AppError::internal(format!("Failed to flush CSV: {}", e)))?;

        debug!(
            rows = result.ledger.len(),
            columns = columns.len() * 2 + 4,
            "Exported ledger as CSV"
        );

        Ok(())
    }

    pub fn to_bytes(&self, result: &SimulationResult) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write(result, &mut buffer)?;
        Ok(buffer)
    }
}
