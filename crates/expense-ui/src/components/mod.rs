//! Reusable widgets for the dashboard views.

pub mod header;
pub mod metric_card;
pub mod share_bar;

pub use header::Header;
pub use metric_card::MetricCard;
pub use share_bar::{CategoryShare, ShareBar};
