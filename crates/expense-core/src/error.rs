use std::path::PathBuf;
use thiserror::Error;

/// Column names every uploaded file must carry, in display order.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Date", "Category", "Amount"];

/// Failures produced by the expense pipeline itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// One or more required columns are absent from the header row.
    #[error("CSV must contain columns {required:?}; missing {missing:?}")]
    Schema {
        /// Required columns that were not found, in required order.
        missing: Vec<String>,
        /// The full list of required columns.
        required: Vec<String>,
    },

    /// The raw file could not be parsed as a CSV table.
    #[error("Failed to parse CSV: {0}")]
    Parse(String),

    /// Every row was discarded during cleaning.
    #[error("No valid rows remain after cleaning")]
    EmptyDataset,

    /// Any other unexpected failure during processing.
    #[error("Processing failed: {0}")]
    Processing(String),
}

impl PipelineError {
    /// Build a [`PipelineError::Schema`] for the given missing columns.
    pub fn schema<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Schema {
            missing: missing.into_iter().map(Into::into).collect(),
            required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// All errors produced by the expense dashboard.
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// An uploaded file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The pipeline rejected the uploaded data.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Pipeline output could not be serialised.
    #[error("Failed to serialise output: {0}")]
    Json(#[from] serde_json::Error),

    /// Raw mode, the alternate screen or a draw call failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the expense crates.
pub type Result<T> = std::result::Result<T, ExpenseError>;
