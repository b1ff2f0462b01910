//! Calendar-month labels.
//!
//! Labels come from a fixed English table rather than `strftime("%b")` so that
//! grouping never depends on the host locale.

use chrono::{Datelike, NaiveDate};

/// Three-letter month abbreviations, January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Return the abbreviated English month name for `date`.
///
/// ```
/// use chrono::NaiveDate;
/// use expense_core::months::month_label;
///
/// let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
/// assert_eq!(month_label(d), "Feb");
/// ```
pub fn month_label(date: NaiveDate) -> &'static str {
    MONTH_ABBREVIATIONS[date.month0() as usize]
}

/// Parse a calendar date from a CSV cell.
///
/// The canonical form is `YYYY-MM-DD`. ISO date-time forms (with `T` or a
/// space separator, optional fractional seconds) and RFC 3339 timestamps with
/// an offset are also accepted and truncated to their date.  Surrounding
/// whitespace is ignored.  Anything else yields `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.date());
        }
    }

    let normalised = match s.strip_suffix('Z') {
        Some(stripped) => format!("{}+00:00", stripped),
        None => s.to_string(),
    };
    chrono::DateTime::parse_from_rfc3339(&normalised)
        .ok()
        .map(|dt| dt.date_naive())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
