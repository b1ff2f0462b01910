use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::months::month_label;

/// Default number of rows kept in the top-N table.
pub const DEFAULT_TOP_N: usize = 10;

/// The parsed-but-untyped contents of an uploaded CSV file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Header names exactly as they appear in the file.
    pub headers: Vec<String>,
    /// Data rows.  A cell is `None` when the source row was shorter than the
    /// header.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Build a table from string literals, mainly for tests and fixtures.
    pub fn from_strings(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| Some(c.to_string())).collect())
                .collect(),
        }
    }

    /// Position of the first header equal to `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// A single cleaned expense row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// 1-based position of the row among the file's data rows.
    pub row: usize,
    /// Calendar date of the expense.
    pub date: NaiveDate,
    /// Free-form category; may be empty.
    pub category: String,
    /// Signed amount.
    pub amount: f64,
}

impl ExpenseRecord {
    /// Three-letter month abbreviation derived from [`Self::date`].
    pub fn month_label(&self) -> &'static str {
        month_label(self.date)
    }
}

/// Ordered sequence of cleaned records, in original row order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTable {
    pub records: Vec<ExpenseRecord>,
}

impl ExpenseTable {
    pub fn new(records: Vec<ExpenseRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Sum of amounts for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Headline figures shown in the metric cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    /// Sum of every amount.
    pub total_spent: f64,
    /// Category with the greatest summed amount.
    pub top_category: String,
    /// The summed amount of [`Self::top_category`].
    pub top_category_value: f64,
    /// Per-category sums in first-appearance order.
    pub category_totals: Vec<CategoryTotal>,
}

/// Dense month × category table of summed amounts.
///
/// `cells[m][c]` is the sum for `months[m]` and `categories[c]`; pairs with no
/// records hold `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregation {
    /// Month labels in calendar order.
    pub months: Vec<String>,
    /// Every category present in the data, sorted.
    pub categories: Vec<String>,
    /// One row per month, one column per category.
    pub cells: Vec<Vec<f64>>,
}

impl MonthlyAggregation {
    /// Cell value for a month/category pair, `None` if either is unknown.
    pub fn get(&self, month: &str, category: &str) -> Option<f64> {
        let m = self.months.iter().position(|x| x == month)?;
        let c = self.categories.iter().position(|x| x == category)?;
        Some(self.cells[m][c])
    }

    /// The full row for `month`, one value per entry of [`Self::categories`].
    pub fn row(&self, month: &str) -> Option<&[f64]> {
        let m = self.months.iter().position(|x| x == month)?;
        Some(&self.cells[m])
    }

    /// Sum of one month's row.
    pub fn month_total(&self, month: &str) -> f64 {
        self.row(month).map(|r| r.iter().sum()).unwrap_or(0.0)
    }

    /// Sum of every cell.
    pub fn grand_total(&self) -> f64 {
        self.cells.iter().flat_map(|r| r.iter()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Highest-amount rows, largest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopNTable {
    /// The `N` requested by the caller.
    pub limit: usize,
    pub records: Vec<ExpenseRecord>,
}

/// How many rows were read and why some were discarded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Data rows present in the file.
    pub rows_read: usize,
    /// Rows that survived cleaning.
    pub rows_kept: usize,
    /// Rows whose `Date` cell was missing or unparsable.
    pub invalid_dates: usize,
    /// Rows whose `Amount` cell was missing or unparsable.
    pub invalid_amounts: usize,
}

impl CleaningReport {
    pub fn rows_dropped(&self) -> usize {
        self.rows_read - self.rows_kept
    }
}

/// Tunables for a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Size of the top-N table.
    pub top_n: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Everything the presentation layer needs from one upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub kpis: KpiSet,
    pub monthly: MonthlyAggregation,
    pub top_n: TopNTable,
    pub report: CleaningReport,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
