//! Plain-text rendering of a pipeline result for `--view summary`.

use std::fmt::Write;

use expense_core::formatting::format_amount;
use expense_core::models::PipelineOutput;
use expense_ui::components::metric_card::display_category as category_label;

/// Serialise a pipeline result for `--view json`.
pub fn render_json(output: &PipelineOutput) -> expense_core::Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// Render KPIs, the monthly table and the top-N list as plain text.
pub fn render_summary(source: &str, output: &PipelineOutput) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_summary(&mut out, source, output);
    out
}

fn write_summary(out: &mut String, source: &str, output: &PipelineOutput) -> std::fmt::Result {
    let report = &output.report;
    writeln!(out, "Expense summary: {source}")?;
    writeln!(
        out,
        "Rows: {} read, {} kept ({} invalid dates, {} invalid amounts)",
        report.rows_read, report.rows_kept, report.invalid_dates, report.invalid_amounts
    )?;
    writeln!(out)?;

    let kpis = &output.kpis;
    writeln!(out, "Total Spent:   {}", format_amount(kpis.total_spent))?;
    writeln!(
        out,
        "Top Category:  {} ({})",
        category_label(&kpis.top_category),
        format_amount(kpis.top_category_value)
    )?;
    writeln!(out)?;

    // ── Monthly table ────────────────────────────────────────────────────────
    let monthly = &output.monthly;
    let widths: Vec<usize> = monthly
        .categories
        .iter()
        .enumerate()
        .map(|(c, name)| {
            monthly
                .cells
                .iter()
                .map(|row| format_amount(row[c]).len())
                .chain(std::iter::once(category_label(name).chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    writeln!(out, "Monthly Breakdown")?;
    write!(out, "{:<5}", "Month")?;
    for (name, w) in monthly.categories.iter().zip(&widths) {
        write!(out, "  {:>w$}", category_label(name), w = *w)?;
    }
    writeln!(out)?;
    for (month, row) in monthly.months.iter().zip(&monthly.cells) {
        write!(out, "{month:<5}")?;
        for (value, w) in row.iter().zip(&widths) {
            write!(out, "  {:>w$}", format_amount(*value), w = *w)?;
        }
        writeln!(out)?;
    }
    writeln!(out)?;

    // ── Top-N ────────────────────────────────────────────────────────────────
    let top = &output.top_n;
    let cat_width = top
        .records
        .iter()
        .map(|r| category_label(&r.category).chars().count())
        .chain(std::iter::once("Category".len()))
        .max()
        .unwrap_or(0);
    writeln!(out, "Top {} Highest Expenses", top.limit)?;
    writeln!(out, "{:<10}  {:<cat_width$}  {:>14}", "Date", "Category", "Amount")?;
    for record in &top.records {
        writeln!(
            out,
            "{:<10}  {:<cat_width$}  {:>14}",
            record.date.format("%Y-%m-%d").to_string(),
            category_label(&record.category),
            format_amount(record.amount)
        )?;
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
