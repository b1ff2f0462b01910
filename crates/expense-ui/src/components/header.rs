use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative marker placed either side of the application title.
pub const ACCENT: &str = "◆ ◇ ◆";

/// Width of the `=` rule under the title.
pub const SEPARATOR_WIDTH: usize = 60;

/// Dashboard header rendering four lines:
///
/// 1. Application title between accent markers (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. The loaded file in `[ file: name ]` format, or `[ no file loaded ]`.
/// 4. An empty line.
pub struct Header<'a> {
    /// Display name of the current upload, if any.
    pub source: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: Option<&'a str>, theme: &'a Theme) -> Self {
        Self { source, theme }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let info = match self.source {
            Some(name) if !name.is_empty() => Line::from(vec![
                Span::styled("[ file: ", self.theme.label),
                Span::styled(name.to_string(), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            _ => Line::from(Span::styled("[ no file loaded ]", self.theme.dim)),
        };

        vec![
            Line::from(vec![
                Span::styled(ACCENT, self.theme.header_accent),
                Span::styled(" EXPENSE ANALYSIS DASHBOARD ", self.theme.header),
                Span::styled(ACCENT, self.theme.header_accent),
            ]),
            Line::from(Span::styled(
                "=".repeat(SEPARATOR_WIDTH),
                self.theme.separator,
            )),
            info,
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        assert_eq!(Header::new(None, &theme).to_lines().len(), 4);
    }

    #[test]
    fn test_header_title_line_content() {
        let theme = Theme::dark();
        let lines = Header::new(None, &theme).to_lines();
        let title = text(&lines[0]);
        assert!(title.contains("EXPENSE ANALYSIS DASHBOARD"), "got: {title}");
        assert!(title.starts_with(ACCENT));
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::dark();
        let sep = text(&Header::new(None, &theme).to_lines()[1]);
        assert_eq!(sep.chars().count(), SEPARATOR_WIDTH);
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_shows_source_file() {
        let theme = Theme::dark();
        let lines = Header::new(Some("expenses.csv"), &theme).to_lines();
        assert_eq!(text(&lines[2]), "[ file: expenses.csv ]");
    }

    #[test]
    fn test_header_without_source() {
        let theme = Theme::dark();
        assert_eq!(
            text(&Header::new(None, &theme).to_lines()[2]),
            "[ no file loaded ]"
        );
        assert_eq!(
            text(&Header::new(Some(""), &theme).to_lines()[2]),
            "[ no file loaded ]"
        );
    }
}
