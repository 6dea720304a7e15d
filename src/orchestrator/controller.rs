//! Run lifecycle controller.
//!
//! Owns start/pause/cancel orchestration and emits events for presentation layers.

use crate::engine::{EngineControl, Playback, SortEngine};
use crate::model::{InfoEvent, RunConfig, RunSummary, SortEvent};
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::Duration;

/// Commands emitted by UI layers to control the running sort.
#[derive(Debug)]
pub(crate) enum UiCommand {
    /// Pace a playback the UI obtained from its player.
    Start(Playback),
    Pause(bool),
    Cancel,
    Quit,
}

/// Internal handle for a running sort task.
struct RunCtx {
    ctrl_tx: UnboundedSender<EngineControl>,
    handle: Option<tokio::task::JoinHandle<Result<RunSummary>>>,
}

/// Spawn a new paced run and return its control handle.
fn start_run(cfg: &RunConfig, playback: Playback, event_tx: UnboundedSender<SortEvent>) -> RunCtx {
    let (ctrl_tx, ctrl_rx) = tokio::sync::mpsc::unbounded_channel::<EngineControl>();
    let engine = SortEngine::new(cfg.clone());
    let handle = tokio::spawn(async move { engine.run(playback, event_tx, ctrl_rx).await });
    RunCtx {
        ctrl_tx,
        handle: Some(handle),
    }
}

fn request_cancel(
    ctx: &RunCtx,
    event_tx: &UnboundedSender<SortEvent>,
    cancel_deadline: &mut Option<tokio::time::Instant>,
) {
    let _ = ctx.ctrl_tx.send(EngineControl::Cancel);
    let _ = event_tx.send(SortEvent::Info(InfoEvent::Message("Cancelling…".into())));
    *cancel_deadline = Some(tokio::time::Instant::now() + Duration::from_secs(3));
}

/// Orchestrate sort runs based on UI commands and emit events back to presentation layers.
pub(crate) async fn run_controller(
    cfg: RunConfig,
    event_tx: UnboundedSender<SortEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut run_ctx: Option<RunCtx> = None;
    let mut quit_pending = false;
    // Cancel watchdog: a long frame delay can hold a cancel back; keep UI feedback alive.
    let mut cancel_deadline: Option<tokio::time::Instant> = None;
    let mut watchdog = tokio::time::interval(Duration::from_millis(500));

    let res = loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Start(playback)) => {
                        if run_ctx.is_some() {
                            // Runs are never queued; dropping the playback releases its player.
                            tracing::warn!("start ignored: a sort is already running");
                            drop(playback);
                            let _ = event_tx.send(SortEvent::Info(InfoEvent::AlreadyRunning));
                        } else {
                            run_ctx = Some(start_run(&cfg, playback, event_tx.clone()));
                        }
                    }
                    Some(UiCommand::Pause(p)) => {
                        if let Some(ctx) = &run_ctx {
                            let _ = ctx.ctrl_tx.send(EngineControl::Pause(p));
                            let _ = event_tx.send(SortEvent::Info(InfoEvent::Paused(p)));
                        }
                    }
                    Some(UiCommand::Cancel) => {
                        if let Some(ctx) = &run_ctx {
                            request_cancel(ctx, &event_tx, &mut cancel_deadline);
                        }
                    }
                    Some(UiCommand::Quit) | None => {
                        // Quit waits for the current run to finish so we can cleanly finalize UI state.
                        quit_pending = true;
                        if let Some(ctx) = &run_ctx {
                            request_cancel(ctx, &event_tx, &mut cancel_deadline);
                        } else {
                            break Ok(());
                        }
                    }
                }
            }
            // Do not take the JoinHandle before this branch wins; otherwise it can be dropped
            // if another select branch is chosen, and we'll never observe completion.
            maybe_done = async {
                if let Some(ctx) = &mut run_ctx {
                    if let Some(h) = ctx.handle.as_mut() {
                        return Some(h.await);
                    }
                }
                futures::future::pending().await
            } => {
                if let Some(join_res) = maybe_done {
                    if let Some(ctx) = &mut run_ctx {
                        ctx.handle.take();
                    }
                    match join_res {
                        Ok(Ok(summary)) => {
                            let _ = event_tx.send(SortEvent::RunCompleted { summary: Box::new(summary) });
                        }
                        Ok(Err(e)) => {
                            let _ = event_tx
                                .send(SortEvent::Info(InfoEvent::RunFailed(format!("{e:#}"))));
                        }
                        Err(e) => {
                            tracing::error!("sort task join failed: {e}");
                            let _ = event_tx.send(SortEvent::Info(InfoEvent::RunFailed(format!(
                                "join failed: {e}"
                            ))));
                        }
                    }
                    run_ctx = None;
                    cancel_deadline = None;
                    if quit_pending {
                        break Ok(());
                    }
                }
            }
            _ = watchdog.tick() => {
                if let Some(deadline) = cancel_deadline {
                    if tokio::time::Instant::now() >= deadline && run_ctx.is_some() {
                        let _ = event_tx.send(SortEvent::Info(InfoEvent::Message(
                            "Still cancelling…".into(),
                        )));
                        cancel_deadline = None;
                    }
                }
            }
        }
    };

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SortPlayer;
    use crate::model::FrameKind;
    use tokio::sync::mpsc;

    fn cfg() -> RunConfig {
        RunConfig {
            size: 4,
            delay: Duration::from_millis(50),
            seed: None,
        }
    }

    async fn next_completed(rx: &mut UnboundedReceiver<SortEvent>) -> (Vec<SortEvent>, RunSummary) {
        let mut seen = Vec::new();
        while let Some(ev) = rx.recv().await {
            if let SortEvent::RunCompleted { summary } = ev {
                return (seen, *summary);
            }
            seen.push(ev);
        }
        panic!("event channel closed before completion");
    }

    #[tokio::test(start_paused = true)]
    async fn start_runs_to_completion() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let controller = tokio::spawn(run_controller(cfg(), event_tx, cmd_rx));

        let mut player = SortPlayer::from_values(vec![5, 3, 8, 1]);
        cmd_tx.send(UiCommand::Start(player.run().unwrap())).unwrap();

        let (events, summary) = next_completed(&mut event_rx).await;
        assert!(summary.completed);
        assert_eq!(summary.sorted, vec![1, 3, 5, 8]);
        assert!(events.iter().any(
            |ev| matches!(ev, SortEvent::Frame(f) if f.kind == FrameKind::Finished)
        ));
        assert!(!player.is_running());

        cmd_tx.send(UiCommand::Quit).unwrap();
        controller.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_is_rejected_and_released() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let controller = tokio::spawn(run_controller(cfg(), event_tx, cmd_rx));

        let mut first = SortPlayer::from_values(vec![4, 3, 2, 1]);
        let mut second = SortPlayer::from_values(vec![2, 1]);
        cmd_tx.send(UiCommand::Start(first.run().unwrap())).unwrap();
        cmd_tx.send(UiCommand::Start(second.run().unwrap())).unwrap();

        let (events, summary) = next_completed(&mut event_rx).await;
        assert!(events
            .iter()
            .any(|ev| matches!(ev, SortEvent::Info(InfoEvent::AlreadyRunning))));
        assert_eq!(summary.initial, vec![4, 3, 2, 1]);
        assert!(!second.is_running());

        cmd_tx.send(UiCommand::Quit).unwrap();
        controller.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn quit_cancels_the_active_run() {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let controller = tokio::spawn(run_controller(cfg(), event_tx, cmd_rx));

        let mut player = SortPlayer::from_values((1..=40).rev().collect());
        cmd_tx.send(UiCommand::Start(player.run().unwrap())).unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
        cmd_tx.send(UiCommand::Quit).unwrap();

        let (_, summary) = next_completed(&mut event_rx).await;
        assert!(!summary.completed);
        controller.await.unwrap().unwrap();
        assert!(!player.is_running());
    }

    #[tokio::test]
    async fn quit_without_a_run_returns_immediately() {
        let (event_tx, _event_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        cmd_tx.send(UiCommand::Quit).unwrap();
        run_controller(cfg(), event_tx, cmd_rx).await.unwrap();
    }
}
