//! End-to-end expense pipeline.
//!
//! Validates, cleans and aggregates one uploaded table, returning a
//! [`PipelineOutput`] ready for the UI layer.  Every entry point is a pure
//! function of its input.

use expense_core::error::PipelineError;
use expense_core::models::{
    CleaningReport, ExpenseTable, PipelineOptions, PipelineOutput, RawTable,
};
use tracing::debug;

use crate::aggregator::ExpenseAggregator;
use crate::cleaner::clean;
use crate::reader::parse_csv;

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the pipeline with default options (top 10).
pub fn run(raw: &RawTable) -> Result<PipelineOutput, PipelineError> {
    run_with(raw, &PipelineOptions::default())
}

/// Run the full pipeline.
///
/// 1. Validate the schema.
/// 2. Coerce `Date` and `Amount` per cell.
/// 3. Drop rows with a missing date or amount.
/// 4. Compute KPIs, the monthly breakdown and the top-N table.
pub fn run_with(
    raw: &RawTable,
    options: &PipelineOptions,
) -> Result<PipelineOutput, PipelineError> {
    // ── Steps 1-3: Schema, coercion, filtering ───────────────────────────────
    let (table, report) = clean(raw)?;

    // ── Step 4: Aggregates ───────────────────────────────────────────────────
    summarize(&table, report, options)
}

/// Parse CSV bytes and run the pipeline on the result.
pub fn run_csv(bytes: &[u8], options: &PipelineOptions) -> Result<PipelineOutput, PipelineError> {
    let raw = parse_csv(bytes)?;
    run_with(&raw, options)
}

/// Aggregate an already-cleaned table.
///
/// Fails with [`PipelineError::EmptyDataset`] when `table` has no records.
pub fn summarize(
    table: &ExpenseTable,
    report: CleaningReport,
    options: &PipelineOptions,
) -> Result<PipelineOutput, PipelineError> {
    if table.is_empty() {
        debug!(rows_read = report.rows_read, "No rows survived cleaning");
        return Err(PipelineError::EmptyDataset);
    }

    let kpis = ExpenseAggregator::compute_kpis(table)?;
    let monthly = ExpenseAggregator::monthly_aggregation(table)?;
    let top_n = ExpenseAggregator::top_n(table, options.top_n);

    debug!(
        total_spent = kpis.total_spent,
        top_category = %kpis.top_category,
        months = monthly.months.len(),
        categories = monthly.categories.len(),
        "Aggregated expenses"
    );

    Ok(PipelineOutput {
        kpis,
        monthly,
        top_n,
        report,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_A: &str = "Date,Category,Amount\n\
        2024-01-05,Food,50\n\
        2024-01-10,Rent,1200\n\
        2024-02-01,Food,30\n";

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_scenario_a() {
        let output = run_csv(SCENARIO_A.as_bytes(), &PipelineOptions::default()).unwrap();

        assert_eq!(output.kpis.total_spent, 1280.0);
        assert_eq!(output.kpis.top_category, "Rent");
        assert_eq!(output.kpis.top_category_value, 1200.0);

        assert_eq!(output.monthly.months, vec!["Jan", "Feb"]);
        assert_eq!(output.monthly.get("Jan", "Food"), Some(50.0));
        assert_eq!(output.monthly.get("Jan", "Rent"), Some(1200.0));
        assert_eq!(output.monthly.get("Feb", "Food"), Some(30.0));
        assert_eq!(output.monthly.get("Feb", "Rent"), Some(0.0));

        assert_eq!(output.top_n.records.len(), 3);
        assert_eq!(output.report.rows_kept, 3);
    }

    #[test]
    fn test_scenario_b_drops_unparsable_rows() {
        let csv = "Date,Category,Amount\n\
            2024-01-05,Food,50\n\
            2024-01-06,Food,abc\n\
            not-a-date,Rent,999\n\
            2024-01-10,Rent,1200\n";
        let output = run_csv(csv.as_bytes(), &PipelineOptions::default()).unwrap();

        assert_eq!(output.kpis.total_spent, 1250.0);
        assert_eq!(output.top_n.records.len(), 2);
        assert!(output.top_n.records.iter().all(|r| r.amount != 999.0));
        assert_eq!(output.report.rows_dropped(), 2);
    }

    #[test]
    fn test_scenario_c_header_only_is_empty_dataset() {
        let err = run_csv(b"Date,Category,Amount\n", &PipelineOptions::default()).unwrap_err();
        assert_eq!(err, PipelineError::EmptyDataset);
    }

    #[test]
    fn test_scenario_d_missing_category_is_schema_error() {
        let csv = b"Date,Amount\n2024-01-05,50\n";
        match run_csv(csv, &PipelineOptions::default()).unwrap_err() {
            PipelineError::Schema { missing, .. } => assert_eq!(missing, vec!["Category"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_all_rows_invalid_is_empty_dataset() {
        let raw = RawTable::from_strings(
            &["Date", "Category", "Amount"],
            &[&["bad", "Food", "1"], &["2024-01-01", "Food", "x"]],
        );
        assert_eq!(run(&raw).unwrap_err(), PipelineError::EmptyDataset);
    }

    #[test]
    fn test_parse_error_passes_through() {
        let err = run_csv(b"", &PipelineOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }

    #[test]
    fn test_custom_top_n() {
        let options = PipelineOptions { top_n: 1 };
        let output = run_csv(SCENARIO_A.as_bytes(), &options).unwrap();
        assert_eq!(output.top_n.limit, 1);
        assert_eq!(output.top_n.records[0].category, "Rent");
    }

    #[test]
    fn test_idempotent() {
        let first = run_csv(SCENARIO_A.as_bytes(), &PipelineOptions::default()).unwrap();
        let second = run_csv(SCENARIO_A.as_bytes(), &PipelineOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_sum_invariant() {
        let csv = "Date,Category,Amount\n\
            2024-01-05,Food,50.25\n\
            2024-03-10,Rent,1200\n\
            2023-03-11,,7.5\n\
            2024-02-01,Food,-30\n\
            2024-12-24,Gifts,199.99\n";
        let output = run_csv(csv.as_bytes(), &PipelineOptions::default()).unwrap();

        let by_category: f64 = output.kpis.category_totals.iter().map(|c| c.total).sum();
        assert!(approx(output.kpis.total_spent, by_category));
        assert!(approx(output.kpis.total_spent, output.monthly.grand_total()));
    }

    #[test]
    fn test_top_n_invariant() {
        let rows: String = (1..=25)
            .map(|i| format!("2024-06-{:02},C{},{}\n", i, i % 4, (i * 37) % 101))
            .collect();
        let csv = format!("Date,Category,Amount\n{rows}");
        let raw = parse_csv(csv.as_bytes()).unwrap();
        let output = run(&raw).unwrap();

        let (cleaned, _) = clean(&raw).unwrap();
        let included: Vec<usize> = output.top_n.records.iter().map(|r| r.row).collect();
        let min_included = output
            .top_n
            .records
            .iter()
            .map(|r| r.amount)
            .fold(f64::INFINITY, f64::min);

        assert_eq!(included.len(), 10);
        for record in cleaned.records.iter().filter(|r| !included.contains(&r.row)) {
            assert!(record.amount <= min_included);
        }
    }

    #[test]
    fn test_top_n_rows_keep_original_fields() {
        let output = run_csv(SCENARIO_A.as_bytes(), &PipelineOptions::default()).unwrap();
        let top = &output.top_n.records[0];
        assert_eq!(top.date.to_string(), "2024-01-10");
        assert_eq!(top.category, "Rent");
        assert_eq!(top.amount, 1200.0);
        assert_eq!(top.row, 2);
    }

    #[test]
    fn test_summarize_empty_table() {
        let err = summarize(
            &ExpenseTable::default(),
            CleaningReport::default(),
            &PipelineOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err, PipelineError::EmptyDataset);
    }
}
