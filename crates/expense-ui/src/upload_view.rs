//! Upload-related panels: required-format help, the path prompt, the error
//! banner and the empty-dataset notice.

use expense_core::error::REQUIRED_COLUMNS;
use expense_core::models::CleaningReport;
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Prefix of every error shown in the banner.
pub const ERROR_PREFIX: &str = "Error processing file: ";

/// Format description for each required column, in display order.
const COLUMN_FORMATS: [&str; 3] = ["YYYY-MM-DD", "text", "number"];

/// Lines describing the expected CSV layout.
pub fn required_format_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            "Upload a CSV file with the following columns:",
            theme.text,
        )),
        Line::from(""),
    ];
    for (name, format) in REQUIRED_COLUMNS.iter().zip(COLUMN_FORMATS) {
        lines.push(Line::from(vec![
            Span::styled("  • ", theme.dim),
            Span::styled(format!("{name:<10}"), theme.value),
            Span::styled(format!("({format})"), theme.label),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press 'u' to upload a file, 'q' to quit.",
        theme.dim,
    )));
    lines
}

/// Help panel shown while nothing is loaded.
pub fn render_required_format(frame: &mut Frame, area: Rect, theme: &Theme) {
    let paragraph = Paragraph::new(Text::from(required_format_lines(theme))).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title(Span::styled(" Required Format ", theme.title)),
    );
    frame.render_widget(paragraph, area);
}

/// Key hints shown when the prompt is closed.
const KEY_HINTS: &str = "u upload · r reload · ↑/↓ scroll months · q quit";

/// One-line status bar: the path prompt while editing, key hints otherwise.
///
/// `loaded` is the cleaning report of a successful upload; its kept-row
/// count is shown ahead of the hints.
pub fn status_line<'a>(
    input: Option<&'a str>,
    loaded: Option<&CleaningReport>,
    theme: &Theme,
) -> Line<'a> {
    if let Some(text) = input {
        return Line::from(vec![
            Span::styled("Upload CSV path: ", theme.label),
            Span::styled(text, theme.input),
            Span::styled("▏", theme.input),
            Span::styled("  (Enter to load, Esc to cancel)", theme.dim),
        ]);
    }

    let mut spans = Vec::with_capacity(2);
    if let Some(report) = loaded {
        spans.push(Span::styled(
            format!("✔ {} rows loaded · ", report.rows_kept),
            theme.success,
        ));
    }
    spans.push(Span::styled(KEY_HINTS, theme.info));
    Line::from(spans)
}

pub fn render_status_line(
    frame: &mut Frame,
    area: Rect,
    input: Option<&str>,
    loaded: Option<&CleaningReport>,
    theme: &Theme,
) {
    frame.render_widget(Paragraph::new(status_line(input, loaded, theme)), area);
}

/// Rows the error banner needs (borders included) to show `message` in full
/// at the given outer width, word-wrapped.
pub fn error_banner_height(message: &str, width: u16) -> u16 {
    let inner = usize::from(width.saturating_sub(2)).max(1);
    let mut lines = 1usize;
    let mut used = 0usize;
    for word in ERROR_PREFIX.split_whitespace().chain(message.split_whitespace()) {
        let w = word.width();
        let needed = if used == 0 { w } else { used + 1 + w };
        if needed <= inner {
            used = needed;
            continue;
        }
        if used > 0 {
            lines += 1;
        }
        // Words wider than the banner are broken across rows.
        lines += w.saturating_sub(1) / inner;
        used = match w % inner {
            0 => inner,
            rest => rest,
        };
    }
    u16::try_from(lines + 2).unwrap_or(u16::MAX)
}

/// Red banner for a failed upload.  The dashboard stays interactive.
pub fn render_error_banner(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(ERROR_PREFIX, theme.error),
        Span::styled(message.to_string(), theme.text),
    ]))
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.error),
    );
    frame.render_widget(paragraph, area);
}

/// Neutral notice for a file in which no row survived cleaning.
pub fn render_empty_state(frame: &mut Frame, area: Rect, report: &CleaningReport, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No valid expense rows found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Read {} row(s): {} with an invalid Date, {} with an invalid Amount.",
                report.rows_read, report.invalid_dates, report.invalid_amounts
            ),
            theme.text,
        )),
        Line::from(Span::styled(
            "Dates must look like YYYY-MM-DD and amounts must be numeric.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'u' to upload another file.", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(Span::styled(" No Data ", theme.title)),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
