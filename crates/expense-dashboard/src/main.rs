mod bootstrap;
mod report;

use anyhow::Result;
use expense_core::models::PipelineOutput;
use expense_core::settings::Settings;
use expense_core::{ExpenseError, PipelineError};
use expense_runtime::{user_message, UploadManager, UploadState};
use expense_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(
        &settings.log_level,
        settings.log_file.as_deref(),
        settings.is_interactive(),
    )?;

    tracing::info!("Expense Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Theme: {}, Top N: {}",
        settings.view,
        settings.theme,
        settings.top_n
    );

    match settings.view.as_str() {
        "dashboard" => {
            let mut app = App::new(&settings.theme, settings.pipeline_options());
            if let Some(file) = &settings.file {
                app.upload(&file.to_string_lossy());
            }
            app.run()?;
        }
        "summary" => {
            let (source, output) = load_output(&settings)?;
            print!("{}", report::render_summary(&source, &output));
        }
        "json" => {
            let (_, output) = load_output(&settings)?;
            println!("{}", report::render_json(&output)?);
        }
        other => {
            return Err(ExpenseError::Config(format!("unknown view: {other}")).into());
        }
    }

    Ok(())
}

/// Run the pipeline once for the non-interactive views.
fn load_output(settings: &Settings) -> Result<(String, PipelineOutput)> {
    let file = settings.file.as_ref().ok_or_else(|| {
        ExpenseError::Config(format!("a CSV file is required for --view {}", settings.view))
    })?;

    let mut manager = UploadManager::new(settings.pipeline_options());
    match manager.upload_path(&file.to_string_lossy()) {
        UploadState::Ready { source, output } => Ok((source.clone(), output.clone())),
        UploadState::Empty { .. } => {
            anyhow::bail!("{}", user_message(&PipelineError::EmptyDataset.into()))
        }
        UploadState::Failed { message, .. } => anyhow::bail!("Error processing file: {message}"),
        UploadState::Idle => anyhow::bail!("no file was loaded"),
    }
}
