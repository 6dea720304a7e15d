mod bubble;
mod generate;
mod matching;
mod player;
mod quiz;
mod stack;

pub use bubble::Playback;
pub use generate::VALUE_MAX;
pub use matching::MatchingQuiz;
pub use player::SortPlayer;
pub use quiz::{MultipleChoiceQuiz, OptionMark};
pub use stack::{StackModel, STACK_CAPACITY};

use crate::metrics::RunTally;
use crate::model::{FrameKind, InfoEvent, RunConfig, RunSummary, SortEvent};
use anyhow::Result;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum EngineControl {
    /// Pause (true) or resume (false) the running sort
    Pause(bool),
    /// Stop consuming frames and report what was reached
    Cancel,
}

/// Block while paused; returns true once a cancel has been requested.
pub(crate) async fn wait_if_paused_or_cancelled(paused: &AtomicBool, cancel: &AtomicBool) -> bool {
    while paused.load(Ordering::Relaxed) && !cancel.load(Ordering::Relaxed) {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    cancel.load(Ordering::Relaxed)
}

/// Drives a [`Playback`] at the configured frame delay.
pub struct SortEngine {
    cfg: RunConfig,
}

impl SortEngine {
    pub fn new(cfg: RunConfig) -> Self {
        Self { cfg }
    }

    pub async fn run(
        self,
        mut playback: Playback,
        event_tx: mpsc::UnboundedSender<SortEvent>,
        mut control_rx: mpsc::UnboundedReceiver<EngineControl>,
    ) -> Result<RunSummary> {
        let paused = Arc::new(AtomicBool::new(false));
        let cancel = Arc::new(AtomicBool::new(false));

        // Control listener.
        let paused2 = paused.clone();
        let cancel2 = cancel.clone();
        let control_handle = tokio::spawn(async move {
            while let Some(msg) = control_rx.recv().await {
                match msg {
                    EngineControl::Pause(p) => paused2.store(p, Ordering::Relaxed),
                    EngineControl::Cancel => {
                        cancel2.store(true, Ordering::Relaxed);
                        break;
                    }
                }
            }
        });

        let start = tokio::time::Instant::now();
        let initial = playback.values().to_vec();
        tracing::info!(len = initial.len(), delay = ?self.cfg.delay, "sort run started");
        let _ = event_tx.send(SortEvent::RunStarted { len: initial.len() });

        let mut tally = RunTally::default();
        let mut completed = false;
        loop {
            if wait_if_paused_or_cancelled(&paused, &cancel).await {
                break;
            }
            let Some(frame) = playback.next() else {
                break;
            };
            tally.record(&frame);
            let kind = frame.kind;
            if event_tx.send(SortEvent::Frame(frame)).is_err() {
                // Nobody is rendering anymore; stop consuming.
                break;
            }
            match kind {
                FrameKind::Compare if !self.cfg.delay.is_zero() => {
                    tokio::time::sleep(self.cfg.delay).await;
                }
                FrameKind::Finished => completed = true,
                _ => {}
            }
        }

        // Dropping a JoinHandle does not stop the task; abort the listener explicitly.
        control_handle.abort();

        let sorted = playback.values().to_vec();
        // Release the player before anyone hears about completion.
        drop(playback);

        if !completed {
            tracing::info!(frames = tally.frames, "sort run cancelled");
            let _ = event_tx.send(SortEvent::Info(InfoEvent::Cancelled {
                after_frames: tally.frames,
            }));
        } else {
            tracing::info!(
                comparisons = tally.comparisons,
                swaps = tally.swaps,
                passes = tally.passes,
                "sort run finished"
            );
        }

        Ok(RunSummary {
            timestamp_utc: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_else(|_| "now".into()),
            initial,
            sorted,
            comparisons: tally.comparisons,
            swaps: tally.swaps,
            passes: tally.passes,
            frames: tally.frames,
            delay: self.cfg.delay,
            elapsed_ms: start.elapsed().as_millis() as u64,
            completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Frame;

    fn cfg(delay_ms: u64) -> RunConfig {
        RunConfig {
            size: 4,
            delay: Duration::from_millis(delay_ms),
            seed: None,
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<SortEvent>) -> Vec<SortEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            out.push(ev);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn paced_run_reports_every_frame() {
        let mut player = SortPlayer::from_values(vec![5, 3, 8, 1]);
        let playback = player.run().unwrap();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (_ctrl_tx, ctrl_rx) = mpsc::unbounded_channel();

        let summary = SortEngine::new(cfg(50))
            .run(playback, event_tx, ctrl_rx)
            .await
            .unwrap();

        assert!(summary.completed);
        assert_eq!(summary.initial, vec![5, 3, 8, 1]);
        assert_eq!(summary.sorted, vec![1, 3, 5, 8]);
        assert_eq!(summary.comparisons, 6);
        assert_eq!(summary.swaps, 4);
        assert_eq!(summary.passes, 4);
        // One delay per comparison.
        assert!(summary.elapsed_ms >= 300);
        assert!(!player.is_running());

        let events = drain(&mut event_rx);
        assert!(matches!(events[0], SortEvent::RunStarted { len: 4 }));
        let frames: Vec<Frame> = events
            .into_iter()
            .filter_map(|ev| match ev {
                SortEvent::Frame(f) => Some(f),
                _ => None,
            })
            .collect();
        assert_eq!(frames.len() as u64, summary.frames);
        for frame in &frames {
            player.apply(frame);
        }
        assert_eq!(player.values(), &[1, 3, 5, 8]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_the_run_and_frees_the_player() {
        let mut player = SortPlayer::from_values(vec![9, 8, 7, 6, 5, 4, 3, 2, 1]);
        let playback = player.run().unwrap();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (ctrl_tx, ctrl_rx) = mpsc::unbounded_channel();
        ctrl_tx.send(EngineControl::Cancel).unwrap();

        let summary = SortEngine::new(cfg(50))
            .run(playback, event_tx, ctrl_rx)
            .await
            .unwrap();

        assert!(!summary.completed);
        assert!(summary.frames < 10);
        assert!(!player.is_running());
        let events = drain(&mut event_rx);
        assert!(events
            .iter()
            .any(|ev| matches!(ev, SortEvent::Info(InfoEvent::Cancelled { .. }))));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_holds_frames_until_resumed() {
        let mut player = SortPlayer::from_values(vec![3, 2, 1]);
        let playback = player.run().unwrap();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (ctrl_tx, ctrl_rx) = mpsc::unbounded_channel();
        ctrl_tx.send(EngineControl::Pause(true)).unwrap();

        let handle = tokio::spawn(SortEngine::new(cfg(50)).run(playback, event_tx, ctrl_rx));

        tokio::time::sleep(Duration::from_secs(5)).await;
        let frames_while_paused = drain(&mut event_rx)
            .iter()
            .filter(|ev| matches!(ev, SortEvent::Frame(_)))
            .count();
        assert!(frames_while_paused <= 1);
        assert!(!handle.is_finished());

        ctrl_tx.send(EngineControl::Pause(false)).unwrap();
        let summary = handle.await.unwrap().unwrap();
        assert!(summary.completed);
        assert_eq!(summary.sorted, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn closed_event_channel_abandons_the_run() {
        let mut player = SortPlayer::from_values(vec![2, 1]);
        let playback = player.run().unwrap();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        drop(event_rx);
        let (_ctrl_tx, ctrl_rx) = mpsc::unbounded_channel();

        let summary = SortEngine::new(cfg(0))
            .run(playback, event_tx, ctrl_rx)
            .await
            .unwrap();
        assert!(!summary.completed);
        assert!(!player.is_running());
    }
}
