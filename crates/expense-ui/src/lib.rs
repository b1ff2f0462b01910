//! Terminal UI layer for the expense dashboard.
//!
//! Provides themes, the header, metric cards and share bars, the monthly,
//! top-expenses and upload views, and the main event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod monthly_view;
pub mod themes;
pub mod top_view;
pub mod upload_view;

pub use expense_core as core;
