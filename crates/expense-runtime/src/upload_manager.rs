//! Upload boundary for the expense dashboard.
//!
//! [`UploadManager`] reads an uploaded file, runs the pipeline under a panic
//! guard and keeps the outcome of the most recent upload as an
//! [`UploadState`].  Every failure is turned into a readable message here;
//! nothing past this point ever sees a raw error.

use std::panic::{self, UnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use expense_core::error::{ExpenseError, PipelineError};
use expense_core::models::{CleaningReport, PipelineOptions, PipelineOutput};
use expense_data::cleaner::clean;
use expense_data::pipeline::summarize;
use expense_data::reader::parse_csv;

// ── UploadState ───────────────────────────────────────────────────────────────

/// Outcome of the most recent upload.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UploadState {
    /// Nothing has been uploaded yet.
    #[default]
    Idle,
    /// The pipeline produced a full result.
    Ready {
        /// Display name of the uploaded file.
        source: String,
        output: PipelineOutput,
    },
    /// The file was valid but no row survived cleaning.
    Empty {
        source: String,
        report: CleaningReport,
    },
    /// The upload failed; `message` is ready to show to the user.
    Failed { source: String, message: String },
}

impl UploadState {
    /// Display name of the file behind this state, if any.
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Ready { source, .. } | Self::Empty { source, .. } | Self::Failed { source, .. } => {
                Some(source)
            }
        }
    }

    /// The pipeline output when the last upload succeeded.
    pub fn output(&self) -> Option<&PipelineOutput> {
        match self {
            Self::Ready { output, .. } => Some(output),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

// ── UploadManager ─────────────────────────────────────────────────────────────

/// Owns the state of the most recent upload.
///
/// # Example
/// ```no_run
/// use expense_core::models::PipelineOptions;
/// use expense_runtime::upload_manager::UploadManager;
///
/// let mut mgr = UploadManager::new(PipelineOptions::default());
/// if let Some(output) = mgr.upload_path("~/expenses.csv").output() {
///     println!("total spent: {}", output.kpis.total_spent);
/// }
/// ```
pub struct UploadManager {
    options: PipelineOptions,
    state: UploadState,
    /// Resolved path of the last file uploaded from disk.
    last_path: Option<PathBuf>,
}

impl UploadManager {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            state: UploadState::Idle,
            last_path: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Path of the last file uploaded from disk, if any.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }

    /// Read a file from disk and run the pipeline on it.
    ///
    /// A leading `~` is expanded to the home directory.  Surrounding
    /// whitespace in `raw_path` is ignored.
    pub fn upload_path(&mut self, raw_path: &str) -> &UploadState {
        let trimmed = raw_path.trim();
        if trimmed.is_empty() {
            let err = ExpenseError::Config("no file path given".to_string());
            self.last_path = None;
            self.state = failed(String::new(), &err);
            return &self.state;
        }

        let path = expand_home(trimmed);
        self.last_path = Some(path.clone());
        self.load_path(&path)
    }

    /// Re-read the last file uploaded from disk.
    ///
    /// Returns `None` when nothing has been uploaded from a path.
    pub fn reload(&mut self) -> Option<&UploadState> {
        let path = self.last_path.clone()?;
        tracing::debug!(path = %path.display(), "reloading upload");
        Some(self.load_path(&path))
    }

    /// Run the pipeline on in-memory bytes.
    pub fn upload_bytes(&mut self, name: &str, bytes: &[u8]) -> &UploadState {
        self.last_path = None;
        self.state = self.evaluate(name.to_string(), bytes);
        &self.state
    }

    /// Forget the current upload.
    pub fn clear(&mut self) {
        self.state = UploadState::Idle;
        self.last_path = None;
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn load_path(&mut self, path: &Path) -> &UploadState {
        let source = display_name(path);
        self.state = match std::fs::read(path) {
            Ok(bytes) => self.evaluate(source, &bytes),
            Err(e) => {
                let err = ExpenseError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                };
                tracing::warn!(error = %err, "upload could not be read");
                failed(source, &err)
            }
        };
        &self.state
    }

    fn evaluate(&self, source: String, bytes: &[u8]) -> UploadState {
        let options = &self.options;
        let outcome = guarded(|| {
            let raw = parse_csv(bytes)?;
            let (table, report) = clean(&raw)?;
            match summarize(&table, report, options) {
                Ok(output) => Ok(Ok(output)),
                Err(PipelineError::EmptyDataset) => Ok(Err(report)),
                Err(e) => Err(e),
            }
        });

        match outcome {
            Ok(Ok(output)) => {
                tracing::info!(
                    source = %source,
                    rows = output.report.rows_kept,
                    dropped = output.report.rows_dropped(),
                    "upload processed"
                );
                UploadState::Ready { source, output }
            }
            Ok(Err(report)) => {
                tracing::info!(
                    source = %source,
                    rows_read = report.rows_read,
                    "upload has no valid rows"
                );
                UploadState::Empty { source, report }
            }
            Err(e) => {
                let err = ExpenseError::from(e);
                tracing::warn!(source = %source, error = %err, "upload failed");
                failed(source, &err)
            }
        }
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Turn any upload error into the message shown to the user.
pub fn user_message(err: &ExpenseError) -> String {
    match err {
        ExpenseError::Pipeline(PipelineError::Schema { missing, required }) => format!(
            "CSV must contain columns: {} (missing: {})",
            required.join(", "),
            missing.join(", ")
        ),
        ExpenseError::Pipeline(PipelineError::EmptyDataset) => "No valid rows remain after \
             cleaning. Check that Date values look like YYYY-MM-DD and Amount values are numeric."
            .to_string(),
        other => other.to_string(),
    }
}

/// Expand a leading `~` to the current user's home directory.
pub fn expand_home(raw: &str) -> PathBuf {
    let expanded = if raw == "~" {
        dirs::home_dir()
    } else {
        raw.strip_prefix("~/")
            .and_then(|rest| dirs::home_dir().map(|home| home.join(rest)))
    };
    expanded.unwrap_or_else(|| PathBuf::from(raw))
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn failed(source: String, err: &ExpenseError) -> UploadState {
    UploadState::Failed {
        source,
        message: user_message(err),
    }
}

/// Serialises swaps of the process-wide panic hook.
static PANIC_HOOK: Mutex<()> = Mutex::new(());

/// Run `f`, converting a panic into [`PipelineError::Processing`].
///
/// While `f` runs the panic hook reports through `tracing` instead of
/// stderr, which would otherwise land on top of the dashboard.
fn guarded<T, F>(f: F) -> Result<T, PipelineError>
where
    F: FnOnce() -> Result<T, PipelineError> + UnwindSafe,
{
    let lock = PANIC_HOOK.lock().unwrap_or_else(PoisonError::into_inner);
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "pipeline panicked");
    }));
    let outcome = panic::catch_unwind(f);
    panic::set_hook(previous);
    drop(lock);

    outcome.unwrap_or_else(|payload| {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(PipelineError::Processing(format!("pipeline panicked: {detail}")))
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
