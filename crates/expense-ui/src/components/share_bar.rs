use expense_core::formatting::percentage;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::components::metric_card::display_category;
use crate::themes::Theme;

/// Glyph used for filled share segments.
const SEGMENT_CHAR: &str = "█";
/// Glyph used for the unfilled remainder.
const EMPTY_CHAR: &str = "░";

/// One category's slice of a month.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    /// Summed amount for the month.
    pub value: f64,
    /// Share of the month total, rounded to one decimal place.
    pub percentage: f64,
}

// ── ShareBar ─────────────────────────────────────────────────────────────────

/// A proportional multi-coloured bar showing each category's share of a
/// month's total, followed by one legend line per category.
///
/// Segment colours follow the category's position in the full category list,
/// so a category keeps its colour across every month.
pub struct ShareBar<'a> {
    /// Shares in category order.
    pub shares: Vec<CategoryShare>,
    pub theme: &'a Theme,
    /// Width of the bar in terminal columns.
    pub width: u16,
}

impl<'a> ShareBar<'a> {
    /// Build the bar for one row of the monthly aggregation.
    ///
    /// A month whose cells sum to zero yields 0 % for every category.
    pub fn from_row(categories: &[String], row: &[f64], theme: &'a Theme) -> Self {
        let total: f64 = row.iter().sum();
        let shares = categories
            .iter()
            .zip(row)
            .map(|(category, &value)| CategoryShare {
                category: category.clone(),
                value,
                percentage: percentage(value, total, 1),
            })
            .collect();
        Self {
            shares,
            theme,
            width: 40,
        }
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Column count of each segment.  Non-positive shares get none, and the
    /// sum never exceeds [`Self::width`].
    pub fn segment_widths(&self) -> Vec<usize> {
        let width = self.width as usize;
        let mut used = 0usize;
        self.shares
            .iter()
            .map(|share| {
                if share.percentage <= 0.0 {
                    return 0;
                }
                let chars = ((share.percentage / 100.0) * width as f64).round() as usize;
                let chars = chars.min(width - used);
                used += chars;
                chars
            })
            .collect()
    }

    /// Render the bar itself.
    pub fn to_line(&self) -> Line<'a> {
        let widths = self.segment_widths();
        let filled: usize = widths.iter().sum();

        let mut spans: Vec<Span<'a>> = widths
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > 0)
            .map(|(i, w)| Span::styled(SEGMENT_CHAR.repeat(*w), self.theme.category_style(i)))
            .collect();

        let empty = (self.width as usize).saturating_sub(filled);
        if empty > 0 {
            spans.push(Span::styled(EMPTY_CHAR.repeat(empty), self.theme.share_empty));
        }
        Line::from(spans)
    }

    /// One `Category: 12.3%` line per category, names padded to align.
    pub fn legend_lines(&self) -> Vec<Line<'a>> {
        let name_width = self
            .shares
            .iter()
            .map(|s| display_category(&s.category).width())
            .max()
            .unwrap_or(0);

        self.shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                let name = display_category(&share.category);
                let pad = " ".repeat(name_width - name.width());
                Line::from(vec![
                    Span::styled("■ ", self.theme.category_style(i)),
                    Span::styled(format!("{name}:{pad} "), self.theme.label),
                    Span::styled(format!("{:.1}%", share.percentage), self.theme.text),
                ])
            })
            .collect()
    }

    /// The bar followed by its legend.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![self.to_line()];
        lines.extend(self.legend_lines());
        lines
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
