use clap::Parser;
use std::path::PathBuf;

use crate::models::PipelineOptions;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive dashboard for CSV expense records
#[derive(Parser, Debug, Clone)]
#[command(
    name = "expense-dashboard",
    about = "Interactive dashboard for CSV expense records (Date, Category, Amount)",
    version
)]
pub struct Settings {
    /// CSV file to load on startup (the dashboard can also upload one later)
    pub file: Option<PathBuf>,

    /// Output mode
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "summary", "json"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Number of rows in the highest-expenses table (1-100)
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub top_n: u16,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`Self::load`] for an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// `true` for the interactive terminal dashboard.
    pub fn is_interactive(&self) -> bool {
        self.view == "dashboard"
    }

    /// Pipeline tunables derived from the command line.
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            top_n: usize::from(self.top_n),
        }
    }

    fn resolve(mut settings: Settings) -> Settings {
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
