// Tests for the CSV ledger export and the text summary

use repayplan::repayments::{
    simulate, Course, Debtor, LedgerCsvExporter, SimulationInput, SummaryRenderer,
};

fn plan() -> SimulationInput {
    SimulationInput {
        monthly_salary: 4000.0,
        living_expense: 1500.0,
        start_month: 11,
        base_year: 2025,
        debtors: vec![Debtor::new("Mum", 3000.0), Debtor::new("Brother", 1000.0)],
        courses: vec![Course::new(1500.0, 3)],
    }
}

fn read_rows(bytes: &[u8]) -> Vec<csv::StringRecord> {
    csv::Reader::from_reader(bytes)
        .records()
        .collect::<Result<Vec<_>, _>>()
        .expect("export must be valid CSV")
}

#[test]
fn test_export_has_one_row_per_month() {
    let result = simulate(&plan()).unwrap();
    let bytes = LedgerCsvExporter::new().to_bytes(&result).unwrap();

    assert_eq!(read_rows(&bytes).len(), result.ledger.len());
}

#[test]
fn test_export_rows_are_keyed_by_calendar_label() {
    let result = simulate(&plan()).unwrap();
    let bytes = LedgerCsvExporter::new().to_bytes(&result).unwrap();
    let rows = read_rows(&bytes);

    let labels: Vec<&str> = rows.iter().map(|r| &r[1]).collect();
    let expected: Vec<String> = result
        .ledger
        .iter()
        .map(|r| r.calendar_label.to_string())
        .collect();
    assert_eq!(labels, expected);
    // Plan drawn up in November: first instalment lands in December, then rolls over
    assert_eq!(labels[0], "2025/12");
    assert_eq!(labels[1], "2026/01");
}

#[test]
fn test_export_columns_pair_paid_and_remaining() {
    let result = simulate(&plan()).unwrap();
    let bytes = LedgerCsvExporter::new().to_bytes(&result).unwrap();

    let mut reader = csv::Reader::from_reader(bytes.as_slice());
    let headers: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(str::to_string)
        .collect();

    assert_eq!(
        headers,
        vec![
            "month",
            "label",
            "disposable_income",
            "Brother paid",
            "Brother remaining",
            "Mum paid",
            "Mum remaining",
            "course_1 paid",
            "course_1 remaining",
            "leftover",
        ]
    );

    let first = reader.records().next().unwrap().unwrap();
    // 2500 disposable, course takes 500, 2000 split 3:1
    assert_eq!(&first[3], "500.00");
    assert_eq!(&first[4], "500.00");
    assert_eq!(&first[5], "1500.00");
    assert_eq!(&first[6], "1500.00");
    assert_eq!(&first[7], "500.00");
    assert_eq!(&first[8], "1000.00");
    assert_eq!(&first[9], "0.00");
}

#[test]
fn test_summary_lists_every_obligation() {
    let input = plan();
    let result = simulate(&input).unwrap();
    let summary = SummaryRenderer::render(&input, &result);

    assert!(summary.contains("Mum -> month"));
    assert!(summary.contains("Brother -> month"));
    assert!(summary.contains("course_1 -> month 3"));
    assert!(summary.contains(&format!(
        "Completed all repayments and course fees in {} months.",
        result.total_months
    )));
}
