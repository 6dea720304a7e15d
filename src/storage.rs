use crate::model::RunSummary;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Per-user data directory for logs.
pub fn base_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sortviz")
}

/// Write a run summary as pretty JSON, creating parent directories as needed.
pub fn export_json(path: &Path, summary: &RunSummary) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create export dir {}", parent.display()))?;
    }
    let data = serde_json::to_vec_pretty(summary)?;
    std::fs::write(path, data).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// File name used when exporting from the TUI.
pub fn default_export_name(summary: &RunSummary) -> String {
    format!(
        "sortviz-{}-n{}.json",
        summary.timestamp_utc.replace(':', "-").replace('T', "_"),
        summary.initial.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn summary() -> RunSummary {
        RunSummary {
            timestamp_utc: "2026-10-19T08:30:00Z".into(),
            initial: vec![3, 1, 2],
            sorted: vec![1, 2, 3],
            comparisons: 3,
            swaps: 2,
            passes: 3,
            frames: 9,
            delay: Duration::from_millis(50),
            elapsed_ms: 150,
            completed: true,
        }
    }

    #[test]
    fn export_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/run.json");
        export_json(&path, &summary()).unwrap();
        let back: RunSummary =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(back.sorted, vec![1, 2, 3]);
        assert_eq!(back.swaps, 2);
    }

    #[test]
    fn export_name_is_filesystem_friendly() {
        assert_eq!(
            default_export_name(&summary()),
            "sortviz-2026-10-19_08-30-00Z-n3.json"
        );
    }
}
