use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub size: usize,
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Per-step visual state of a sort run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub current_index: Option<usize>,
    pub compare_index: Option<usize>,
    /// Every index at or past this one holds its final value.
    pub sorted_boundary: usize,
    pub running: bool,
}

impl PlaybackState {
    /// Idle state for a freshly generated sequence of `len` values.
    pub fn idle(len: usize) -> Self {
        Self {
            current_index: None,
            compare_index: None,
            sorted_boundary: len,
            running: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameKind {
    /// Two adjacent values are about to be compared.
    Compare,
    /// The compared pair was out of order and has been swapped.
    Swap,
    /// A full pass ended and the boundary moved down by one.
    PassComplete,
    Finished,
}

/// One emitted snapshot of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Run that produced the frame; players ignore frames from older runs.
    pub run_id: u64,
    pub kind: FrameKind,
    pub values: Vec<u32>,
    pub state: PlaybackState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SortEvent {
    RunStarted {
        len: usize,
    },
    Frame(Frame),
    Info(InfoEvent),
    RunCompleted {
        summary: Box<RunSummary>,
    },
}

/// Structured info events emitted by the engine and consumed by UI/CLI layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InfoEvent {
    // UI/CLI messages generated outside the engine.
    Message(String),
    Paused(bool),
    Cancelled { after_frames: u64 },
    AlreadyRunning,
    /// The paced run ended without a summary.
    RunFailed(String),
}

impl InfoEvent {
    /// Render a human-readable message for UI/CLI layers.
    pub fn to_message(&self) -> String {
        match self {
            InfoEvent::Message(msg) => msg.clone(),
            InfoEvent::Paused(true) => "Paused".to_string(),
            InfoEvent::Paused(false) => "Resumed".to_string(),
            InfoEvent::Cancelled { after_frames } => {
                format!("Sort cancelled after {} frames", after_frames)
            }
            InfoEvent::AlreadyRunning => "A sort is already running".to_string(),
            InfoEvent::RunFailed(reason) => format!("Run failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default)]
    pub timestamp_utc: String,
    pub initial: Vec<u32>,
    pub sorted: Vec<u32>,
    pub comparisons: u64,
    pub swaps: u64,
    pub passes: u64,
    pub frames: u64,
    #[serde(with = "humantime_serde")]
    pub delay: Duration,
    pub elapsed_ms: u64,
    pub completed: bool,
}
