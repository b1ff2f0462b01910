//! Monthly breakdown grid.
//!
//! One bordered panel per month, two panels per row, each showing a share bar
//! and a per-category legend.  The grid scrolls vertically by panel rows.

use expense_core::models::MonthlyAggregation;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::components::ShareBar;
use crate::themes::Theme;

/// Months per grid row.
pub const GRID_COLUMNS: usize = 2;

/// Height of one month panel: borders, the bar and one legend line per
/// category.
pub fn panel_height(monthly: &MonthlyAggregation) -> u16 {
    (monthly.categories.len() as u16).saturating_add(3)
}

/// Number of panel rows in the grid.
pub fn grid_rows(monthly: &MonthlyAggregation) -> usize {
    monthly.months.len().div_ceil(GRID_COLUMNS)
}

/// Largest useful scroll offset for the grid.
pub fn max_scroll(monthly: &MonthlyAggregation) -> usize {
    grid_rows(monthly).saturating_sub(1)
}

/// Render the month grid starting at panel row `scroll`.
pub fn render_monthly_view(
    frame: &mut Frame,
    area: Rect,
    monthly: &MonthlyAggregation,
    scroll: usize,
    theme: &Theme,
) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(" Monthly Breakdown ", theme.title));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    if monthly.is_empty() || inner.height == 0 {
        return;
    }

    let height = panel_height(monthly);
    let visible = usize::from((inner.height / height).max(1));
    let first = scroll.min(max_scroll(monthly));

    let rows = Layout::vertical(vec![Constraint::Length(height); visible]).split(inner);
    for (slot, pair) in monthly
        .months
        .chunks(GRID_COLUMNS)
        .skip(first)
        .take(visible)
        .enumerate()
    {
        let columns = Layout::horizontal(vec![
            Constraint::Ratio(1, GRID_COLUMNS as u32);
            GRID_COLUMNS
        ])
        .split(rows[slot]);
        for (column, month) in pair.iter().enumerate() {
            render_month_panel(frame, columns[column], monthly, month, theme);
        }
    }
}

/// One month: `"<Mon> Expenses"` panel with share bar and legend.
fn render_month_panel(
    frame: &mut Frame,
    area: Rect,
    monthly: &MonthlyAggregation,
    month: &str,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {month} Expenses "), theme.title));
    let width = block.inner(area).width;

    let row = monthly.row(month).unwrap_or(&[]);
    let bar = ShareBar::from_row(&monthly.categories, row, theme).with_width(width);

    frame.render_widget(Paragraph::new(Text::from(bar.to_lines())).block(block), area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn monthly(months: &[&str]) -> MonthlyAggregation {
        MonthlyAggregation {
            months: months.iter().map(|m| m.to_string()).collect(),
            categories: vec!["Food".to_string(), "Rent".to_string()],
            cells: months.iter().map(|_| vec![50.0, 150.0]).collect(),
        }
    }

    fn draw(monthly: &MonthlyAggregation, scroll: usize, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_view(frame, area, monthly, scroll, &theme);
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
    fn test_grid_geometry() {
        let m = monthly(&["Jan", "Feb", "Mar"]);
        assert_eq!(panel_height(&m), 5);
        assert_eq!(grid_rows(&m), 2);
        assert_eq!(max_scroll(&m), 1);
        assert_eq!(max_scroll(&MonthlyAggregation::default()), 0);
    }

    #[test]
    fn test_render_titles_and_legend() {
        let text = draw(&monthly(&["Jan", "Feb"]), 0, 100, 12);
        assert!(text.contains("Jan Expenses"));
        assert!(text.contains("Feb Expenses"));
        assert!(text.contains("Food: 25.0%"));
        assert!(text.contains("Rent: 75.0%"));
    }

    #[test]
    fn test_scroll_skips_first_row() {
        let text = draw(&monthly(&["Jan", "Feb", "Mar", "Apr"]), 1, 100, 7);
        assert!(!text.contains("Jan Expenses"));
        assert!(text.contains("Mar Expenses"));
    }

    #[test]
    fn test_scroll_past_end_is_clamped() {
        let text = draw(&monthly(&["Jan", "Feb", "Mar"]), 99, 100, 7);
        assert!(text.contains("Mar Expenses"));
    }

    #[test]
    fn test_render_empty_does_not_panic() {
        draw(&MonthlyAggregation::default(), 0, 40, 10);
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        draw(&monthly(&["Jan", "Feb", "Mar"]), 0, 6, 3);
    }
}
