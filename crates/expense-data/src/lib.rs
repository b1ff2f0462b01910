//! Data layer for the expense dashboard.
//!
//! Parses uploaded CSV bytes, validates and cleans the rows, and computes the
//! KPI, monthly and top-N aggregates.

pub mod aggregator;
pub mod cleaner;
pub mod pipeline;
pub mod reader;

pub use expense_core as core;
pub use pipeline::{run, run_csv, run_with};
