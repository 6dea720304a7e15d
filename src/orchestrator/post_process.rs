//! Post-run processing utilities.
//!
//! Handles exports after a run completes.

use crate::cli::Cli;
use crate::model::RunSummary;
use crate::storage;

/// Result of post-run processing, ready for presentation layers.
pub(crate) struct ProcessedRun {
    pub summary: RunSummary,
    pub export_messages: Vec<String>,
}

/// Process a completed run: export it if the command line asked for it.
pub(crate) fn process_run_completion(args: &Cli, run: &RunSummary) -> ProcessedRun {
    let mut export_messages = Vec::new();
    if let Some(export_path) = args.export_json.as_deref() {
        match storage::export_json(export_path, run) {
            Ok(_) => export_messages.push(format!("Exported JSON: {}", export_path.display())),
            Err(e) => {
                tracing::warn!("export failed: {e:#}");
                export_messages.push(format!("Export JSON failed: {e:#}"))
            }
        }
    }

    ProcessedRun {
        summary: run.clone(),
        export_messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;

    fn summary() -> RunSummary {
        RunSummary {
            timestamp_utc: String::new(),
            initial: vec![2, 1],
            sorted: vec![1, 2],
            comparisons: 2,
            swaps: 1,
            passes: 2,
            frames: 6,
            delay: Duration::from_millis(50),
            elapsed_ms: 100,
            completed: true,
        }
    }

    #[test]
    fn no_export_without_flag() {
        let args = Cli::try_parse_from(["sortviz"]).unwrap();
        let processed = process_run_completion(&args, &summary());
        assert!(processed.export_messages.is_empty());
        assert_eq!(processed.summary.sorted, vec![1, 2]);
    }

    #[test]
    fn exports_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let args = Cli::try_parse_from([
            "sortviz".to_string(),
            "--export-json".to_string(),
            path.to_string_lossy().to_string(),
        ])
        .unwrap();
        let processed = process_run_completion(&args, &summary());
        assert_eq!(processed.export_messages.len(), 1);
        assert!(processed.export_messages[0].starts_with("Exported JSON"));
        assert!(path.exists());
    }
}
