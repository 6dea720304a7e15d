//! Text summary builder for CLI output.
//!
//! This module formats human-readable lines for text mode.

use crate::model::RunSummary;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text summary from a finished (or cancelled) run.
pub(crate) fn build_text_summary(summary: &RunSummary) -> TextSummary {
    let mut lines = Vec::new();

    lines.push(format!("Input:  {:?}", summary.initial));
    lines.push(format!("Output: {:?}", summary.sorted));
    lines.push(format!(
        "Comparisons: {}  Swaps: {}  Passes: {}  Frames: {}",
        summary.comparisons, summary.swaps, summary.passes, summary.frames
    ));
    lines.push(format!(
        "Elapsed: {} ms (delay {} per comparison)",
        summary.elapsed_ms,
        humantime::format_duration(summary.delay)
    ));
    if !summary.completed {
        lines.push("Status: cancelled before the sort finished".to_string());
    }

    TextSummary { lines }
}
