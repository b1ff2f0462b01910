use expense_core::formatting::format_amount;
use expense_core::models::KpiSet;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

// ── MetricCard ───────────────────────────────────────────────────────────────

/// A bordered single-value card: the label is the block title, the value sits
/// centred inside.
pub struct MetricCard<'a> {
    pub label: &'a str,
    pub value: String,
    pub theme: &'a Theme,
}

impl<'a> MetricCard<'a> {
    pub fn new(label: &'a str, value: String, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            theme,
        }
    }

    /// "Total Spent", formatted `1,234.56`.
    pub fn total_spent(kpis: &KpiSet, theme: &'a Theme) -> Self {
        Self::new("Total Spent", format_amount(kpis.total_spent), theme)
    }

    /// "Top Category", formatted `Rent (1,200.00)`.
    pub fn top_category(kpis: &KpiSet, theme: &'a Theme) -> Self {
        Self::new(
            "Top Category",
            format!(
                "{} ({})",
                display_category(&kpis.top_category),
                format_amount(kpis.top_category_value)
            ),
            theme,
        )
    }

    pub fn to_line(&self) -> Line<'a> {
        Line::from(Span::styled(self.value.clone(), self.theme.value))
    }

    /// Draw the card into `area`.  Needs three rows to show the value.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border)
            .title(Span::styled(format!(" {} ", self.label), self.theme.label));
        let paragraph = Paragraph::new(Text::from(self.to_line()))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

/// Category names as shown to the user; a blank category reads `(blank)`.
pub fn display_category(category: &str) -> &str {
    if category.is_empty() {
        "(blank)"
    } else {
        category
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
