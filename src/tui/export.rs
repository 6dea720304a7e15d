use crate::model::RunSummary;
use anyhow::{Context, Result};

use super::state::UiState;

/// Export JSON next to the working directory.
/// Returns the absolute path of the exported file.
pub fn export_summary_json(summary: &RunSummary) -> Result<std::path::PathBuf> {
    let current_dir = std::env::current_dir().context("get current directory")?;
    let path = current_dir.join(crate::storage::default_export_name(summary));
    crate::storage::export_json(&path, summary)?;
    Ok(path)
}

/// Export the last finished run and report the outcome in the status line.
pub fn export_and_show_path(state: &mut UiState) {
    let Some(summary) = state.last_summary.as_ref() else {
        state.info = "No finished run to export yet.".into();
        return;
    };
    match export_summary_json(summary) {
        Ok(path) => {
            state.info = format!("Exported JSON: {}", path.display());
        }
        Err(e) => {
            tracing::warn!("export failed: {e:#}");
            state.info = format!("JSON export failed: {e:#}");
        }
    }
}
