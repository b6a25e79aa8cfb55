pub mod csv_exporter;
pub mod simulator;
pub mod summary_renderer;

pub use csv_exporter::LedgerCsvExporter;
pub use simulator::{simulate, RepaymentSimulator, HORIZON_MONTHS, TOLERANCE};
pub use summary_renderer::SummaryRenderer;
