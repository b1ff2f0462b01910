//! CSV decoding for uploaded expense files.
//!
//! Turns raw upload bytes into a [`RawTable`] of untyped cells.  No column is
//! interpreted here; schema checks and type coercion happen in the cleaner.

use expense_core::error::PipelineError;
use expense_core::models::RawTable;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse CSV bytes whose first row is the header.
///
/// * Header names are kept verbatim, including surrounding whitespace.
/// * A data row shorter than the header is padded with `None` cells.
/// * A data row longer than the header is rejected.
///
/// Fails with [`PipelineError::Parse`] for invalid UTF-8, an input without a
/// header row, or any lower-level CSV read error.
pub fn parse_csv(bytes: &[u8]) -> Result<RawTable, PipelineError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let content = std::str::from_utf8(bytes).map_err(|e| {
        PipelineError::Parse(format!(
            "file is not valid UTF-8 (invalid byte at offset {})",
            e.valid_up_to()
        ))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::Parse(format!("unreadable header row: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        return Err(PipelineError::Parse("file has no header row".to_string()));
    }

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| PipelineError::Parse(e.to_string()))?;
        let row_number = index + 1;

        if record.len() > headers.len() {
            return Err(PipelineError::Parse(format!(
                "row {row_number} has {} fields but the header has {}",
                record.len(),
                headers.len()
            )));
        }

        let mut cells: Vec<Option<String>> = record.iter().map(|c| Some(c.to_string())).collect();
        cells.resize(headers.len(), None);
        rows.push(cells);
    }

    debug!(
        columns = headers.len(),
        rows = rows.len(),
        "Parsed CSV upload"
    );

    Ok(RawTable { headers, rows })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
