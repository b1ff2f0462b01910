//! Shared building blocks for the expense dashboard.
//!
//! Holds the expense data model, the error taxonomy, command-line settings,
//! number formatting and locale-independent month labels.

pub mod error;
pub mod formatting;
pub mod models;
pub mod months;
pub mod settings;

pub use error::{ExpenseError, PipelineError, Result, REQUIRED_COLUMNS};
