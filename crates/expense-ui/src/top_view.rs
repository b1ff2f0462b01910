//! Highest-expenses panel: a table on the left, a horizontal bar chart on the
//! right.

use expense_core::formatting::format_amount;
use expense_core::models::TopNTable;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::components::metric_card::display_category;
use crate::themes::Theme;

/// Render the top-N table and chart into `area`.
pub fn render_top_view(frame: &mut Frame, area: Rect, top: &TopNTable, theme: &Theme) {
    let halves = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    render_top_table(frame, halves[0], top, theme);
    render_top_chart(frame, halves[1], top, theme);
}

/// Height needed to show every row of `top` in the table.
pub fn required_height(top: &TopNTable) -> u16 {
    // borders + header
    (top.records.len() as u16).saturating_add(3)
}

fn render_top_table(frame: &mut Frame, area: Rect, top: &TopNTable, theme: &Theme) {
    let header = Row::new(
        ["Date", "Category", "Amount"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = top
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            Row::new(vec![
                Cell::from(record.date.format("%Y-%m-%d").to_string()),
                Cell::from(display_category(&record.category).to_string()),
                Cell::from(Line::from(format_amount(record.amount)).right_aligned()),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Min(10),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title(Span::styled(
                format!(" Top {} Highest Expenses ", top.limit),
                theme.title,
            )),
    );
    frame.render_widget(table, area);
}

fn render_top_chart(frame: &mut Frame, area: Rect, top: &TopNTable, theme: &Theme) {
    let bars: Vec<Bar> = top
        .records
        .iter()
        .map(|record| {
            Bar::default()
                .value(bar_value(record.amount))
                .label(Line::from(display_category(&record.category).to_string()))
                .text_value(format_amount(record.amount))
                .style(theme.bar)
                .value_style(theme.bar_value)
        })
        .collect();

    let chart = BarChart::default()
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(Span::styled(" By Amount ", theme.title)),
        );
    frame.render_widget(chart, area);
}

/// Bar length in cents; negative amounts draw an empty bar.
fn bar_value(amount: f64) -> u64 {
    (amount.max(0.0) * 100.0).round() as u64
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use expense_core::models::ExpenseRecord;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn top() -> TopNTable {
        let rows = [
            ("2024-01-10", "Rent", 1200.0),
            ("2024-01-05", "Food", 50.0),
            ("2024-02-01", "", 30.0),
        ];
        TopNTable {
            limit: 10,
            records: rows
                .iter()
                .enumerate()
                .map(|(i, (d, c, a))| ExpenseRecord {
                    row: i + 1,
                    date: NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
                    category: c.to_string(),
                    amount: *a,
                })
                .collect(),
        }
    }

    fn draw(top: &TopNTable, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_top_view(frame, area, top, &theme);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_bar_value() {
        assert_eq!(bar_value(12.345), 1235);
        assert_eq!(bar_value(-5.0), 0);
        assert_eq!(bar_value(0.0), 0);
    }

    #[test]
    fn test_required_height() {
        assert_eq!(required_height(&top()), 6);
        assert_eq!(required_height(&TopNTable::default()), 3);
    }

    #[test]
    fn test_render_table_contents() {
        let text = draw(&top(), 120, 10);
        assert!(text.contains("Top 10 Highest Expenses"));
        assert!(text.contains("2024-01-10"));
        assert!(text.contains("1,200.00"));
        assert!(text.contains("(blank)"));
    }

    #[test]
    fn test_render_empty_does_not_panic() {
        draw(&TopNTable::default(), 80, 10);
    }

    #[test]
    fn test_render_negative_amount_does_not_panic() {
        let mut table = top();
        table.records[2].amount = -30.0;
        draw(&table, 80, 10);
    }
}
