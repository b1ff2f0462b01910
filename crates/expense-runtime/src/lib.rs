//! Runtime layer for the expense dashboard.
//!
//! Owns the upload boundary between the file system, the pipeline and the UI.

pub mod upload_manager;

pub use expense_core as core;
pub use expense_data as data;
pub use upload_manager::{user_message, UploadManager, UploadState};
