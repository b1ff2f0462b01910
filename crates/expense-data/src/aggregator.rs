//! KPI, monthly and top-N aggregation over cleaned expenses.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use chrono::Datelike;
use expense_core::error::PipelineError;
use expense_core::models::{CategoryTotal, ExpenseTable, KpiSet, MonthlyAggregation, TopNTable};
use expense_core::months::MONTH_ABBREVIATIONS;

// ── ExpenseAggregator ─────────────────────────────────────────────────────────

/// Stateless aggregation routines.
pub struct ExpenseAggregator;

impl ExpenseAggregator {
    /// Total spend, per-category totals and the top category.
    ///
    /// Categories keep their first-appearance order; on a tie for the largest
    /// total the category seen first wins.
    pub fn compute_kpis(table: &ExpenseTable) -> Result<KpiSet, PipelineError> {
        if table.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }

        let mut category_totals: Vec<CategoryTotal> = Vec::new();
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut total_spent = 0.0;

        for record in &table.records {
            total_spent += record.amount;
            match position.get(record.category.as_str()) {
                Some(&i) => category_totals[i].total += record.amount,
                None => {
                    position.insert(record.category.as_str(), category_totals.len());
                    category_totals.push(CategoryTotal {
                        category: record.category.clone(),
                        total: record.amount,
                    });
                }
            }
        }

        ensure_finite("total spent", total_spent)?;

        let mut top = &category_totals[0];
        for group in &category_totals {
            ensure_finite("category total", group.total)?;
            if group.total > top.total {
                top = group;
            }
        }

        Ok(KpiSet {
            total_spent,
            top_category: top.category.clone(),
            top_category_value: top.total,
            category_totals,
        })
    }

    /// Dense month × category sums.
    ///
    /// Months appear in calendar order regardless of year, so January 2023 and
    /// January 2024 share one row.  Categories are sorted lexicographically.
    pub fn monthly_aggregation(table: &ExpenseTable) -> Result<MonthlyAggregation, PipelineError> {
        let categories: Vec<String> = table
            .records
            .iter()
            .map(|r| r.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let column: HashMap<&str, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut by_month: [Option<Vec<f64>>; 12] = Default::default();
        for record in &table.records {
            let row = by_month[record.date.month0() as usize]
                .get_or_insert_with(|| vec![0.0; categories.len()]);
            if let Some(&c) = column.get(record.category.as_str()) {
                row[c] += record.amount;
            }
        }

        let mut months = Vec::new();
        let mut cells = Vec::new();
        for (label, row) in MONTH_ABBREVIATIONS.iter().zip(by_month) {
            if let Some(row) = row {
                if let Some(bad) = row.iter().find(|v| !v.is_finite()) {
                    return Err(PipelineError::Processing(format!(
                        "monthly total for {label} is not finite ({bad})"
                    )));
                }
                months.push(label.to_string());
                cells.push(row);
            }
        }

        Ok(MonthlyAggregation {
            months,
            categories,
            cells,
        })
    }

    /// The `n` highest-amount records, largest first.
    ///
    /// The sort is stable, so equal amounts keep their original row order.
    pub fn top_n(table: &ExpenseTable, n: usize) -> TopNTable {
        let mut records = table.records.clone();
        records.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
        records.truncate(n);
        TopNTable { limit: n, records }
    }
}

fn ensure_finite(what: &str, value: f64) -> Result<(), PipelineError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PipelineError::Processing(format!(
            "{what} is not finite ({value})"
        )))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
