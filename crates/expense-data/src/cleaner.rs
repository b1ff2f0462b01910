//! Schema validation and per-cell type coercion.
//!
//! Converts a [`RawTable`] into an [`ExpenseTable`], dropping every row whose
//! `Date` or `Amount` cannot be interpreted.  `Category` is carried through
//! untouched and never causes a row to be dropped.

use expense_core::error::{PipelineError, REQUIRED_COLUMNS};
use expense_core::models::{CleaningReport, ExpenseRecord, ExpenseTable, RawTable};
use expense_core::months::parse_date;
use tracing::debug;

// ── Schema ────────────────────────────────────────────────────────────────────

/// Column positions of the three required fields within a [`RawTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaColumns {
    pub date: usize,
    pub category: usize,
    pub amount: usize,
}

/// Check that `Date`, `Category` and `Amount` are all present.
///
/// Matching is exact and case-sensitive.  Extra columns are ignored; when a
/// name repeats, its first occurrence wins.
pub fn validate_schema(table: &RawTable) -> Result<SchemaColumns, PipelineError> {
    let [date, category, amount] = REQUIRED_COLUMNS.map(|name| table.column_index(name));

    match (date, category, amount) {
        (Some(date), Some(category), Some(amount)) => Ok(SchemaColumns {
            date,
            category,
            amount,
        }),
        _ => Err(PipelineError::schema(
            REQUIRED_COLUMNS
                .iter()
                .filter(|name| table.column_index(name).is_none())
                .copied(),
        )),
    }
}

// ── Coercion ──────────────────────────────────────────────────────────────────

/// Parse an amount cell.
///
/// Surrounding whitespace is ignored.  Non-numeric text, NaN and infinities
/// all yield `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Validate the schema, coerce every row and drop the invalid ones.
///
/// The returned table may be empty; deciding what an empty result means is
/// left to the caller.
pub fn clean(table: &RawTable) -> Result<(ExpenseTable, CleaningReport), PipelineError> {
    let columns = validate_schema(table)?;

    let mut report = CleaningReport {
        rows_read: table.rows.len(),
        ..CleaningReport::default()
    };
    let mut records = Vec::with_capacity(table.rows.len());

    for (index, cells) in table.rows.iter().enumerate() {
        let cell = |i: usize| cells.get(i).and_then(|c| c.as_deref());

        let date = cell(columns.date).and_then(parse_date);
        let amount = cell(columns.amount).and_then(parse_amount);

        if date.is_none() {
            report.invalid_dates += 1;
        }
        if amount.is_none() {
            report.invalid_amounts += 1;
        }

        if let (Some(date), Some(amount)) = (date, amount) {
            records.push(ExpenseRecord {
                row: index + 1,
                date,
                category: cell(columns.category).unwrap_or_default().to_string(),
                amount,
            });
        }
    }

    report.rows_kept = records.len();
    debug!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        invalid_dates = report.invalid_dates,
        invalid_amounts = report.invalid_amounts,
        "Cleaned expense rows"
    );

    Ok((ExpenseTable::new(records), report))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── validate_schema ──────────────────────────────────────────────────────

    #[test]
    fn test_schema_all_present() {
        let table = RawTable::from_strings(&["Amount", "Note", "Date", "Category"], &[]);
        let cols = validate_schema(&table).unwrap();
        assert_eq!(
            cols,
            SchemaColumns {
                date: 2,
                category: 3,
                amount: 0
            }
        );
    }

    #[test]
    fn test_schema_missing_category() {
        let table = RawTable::from_strings(&["Date", "Amount"], &[]);
        let err = validate_schema(&table).unwrap_err();
        match err {
            PipelineError::Schema { missing, .. } => assert_eq!(missing, vec!["Category"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_schema_missing_listed_in_required_order() {
        let table = RawTable::from_strings(&["Category"], &[]);
        match validate_schema(&table).unwrap_err() {
            PipelineError::Schema { missing, .. } => assert_eq!(missing, vec!["Date", "Amount"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_schema_is_case_sensitive() {
        let table = RawTable::from_strings(&["date", "Category", "AMOUNT"], &[]);
        match validate_schema(&table).unwrap_err() {
            PipelineError::Schema { missing, .. } => assert_eq!(missing, vec!["Date", "Amount"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_schema_duplicate_header_uses_first() {
        let table = RawTable::from_strings(&["Date", "Category", "Amount", "Amount"], &[]);
        assert_eq!(validate_schema(&table).unwrap().amount, 2);
    }

    // ── parse_amount ─────────────────────────────────────────────────────────

    #[test]
    fn test_parse_amount_accepts_numbers() {
        assert_eq!(parse_amount("50"), Some(50.0));
        assert_eq!(parse_amount(" 12.5 "), Some(12.5));
        assert_eq!(parse_amount("-3"), Some(-3.0));
        assert_eq!(parse_amount("1e3"), Some(1000.0));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("1,200"), None);
        assert_eq!(parse_amount("$5"), None);
    }

    #[test]
    fn test_parse_amount_rejects_non_finite() {
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("-infinity"), None);
    }

    // ── clean ────────────────────────────────────────────────────────────────

    #[test]
    fn test_clean_drops_invalid_rows() {
        let table = RawTable::from_strings(
            &["Date", "Category", "Amount"],
            &[
                &["2024-01-05", "Food", "50"],
                &["2024-01-06", "Food", "abc"],
                &["not-a-date", "Rent", "1200"],
                &["2024-02-01", "Food", "30"],
            ],
        );
        let (cleaned, report) = clean(&table).unwrap();

        let rows: Vec<usize> = cleaned.records.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![1, 4]);
        assert_eq!(
            report,
            CleaningReport {
                rows_read: 4,
                rows_kept: 2,
                invalid_dates: 1,
                invalid_amounts: 1,
            }
        );
    }

    #[test]
    fn test_clean_keeps_empty_category() {
        let table = RawTable::from_strings(
            &["Date", "Category", "Amount"],
            &[&["2024-03-01", "", "9.99"]],
        );
        let (cleaned, _) = clean(&table).unwrap();
        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned.records[0].category, "");
    }

    #[test]
    fn test_clean_missing_cells_count_as_invalid() {
        let table = RawTable {
            headers: vec!["Date".into(), "Category".into(), "Amount".into()],
            rows: vec![vec![Some("2024-01-05".into()), None, None]],
        };
        let (cleaned, report) = clean(&table).unwrap();
        assert!(cleaned.is_empty());
        assert_eq!(report.invalid_amounts, 1);
        assert_eq!(report.invalid_dates, 0);
    }

    #[test]
    fn test_clean_row_with_both_invalid_counts_twice() {
        let table = RawTable::from_strings(
            &["Date", "Category", "Amount"],
            &[&["nope", "Food", "nope"]],
        );
        let (_, report) = clean(&table).unwrap();
        assert_eq!(report.invalid_dates, 1);
        assert_eq!(report.invalid_amounts, 1);
        assert_eq!(report.rows_dropped(), 1);
    }

    #[test]
    fn test_clean_ignores_extra_columns() {
        let table = RawTable::from_strings(
            &["Note", "Date", "Category", "Amount"],
            &[&["lunch", "2024-01-05", "Food", "12"]],
        );
        let (cleaned, _) = clean(&table).unwrap();
        assert_eq!(cleaned.records[0].category, "Food");
        assert_eq!(cleaned.records[0].amount, 12.0);
    }

    #[test]
    fn test_clean_schema_error_propagates() {
        let table = RawTable::from_strings(&["Date", "Amount"], &[&["2024-01-05", "1"]]);
        assert!(matches!(clean(&table), Err(PipelineError::Schema { .. })));
    }
}
