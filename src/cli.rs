use crate::engine::{EngineControl, SortEngine, SortPlayer};
use crate::model::{FrameKind, RunConfig, RunSummary, SortEvent};
use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "sortviz",
    version,
    about = "Animated bubble sort and stack visualizations with optional TUI"
)]
pub struct Cli {
    /// Number of random values to sort
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..=512))]
    pub size: u16,

    /// Delay after each comparison
    #[arg(long, default_value = "50ms")]
    pub delay: humantime::Duration,

    /// Seed for the value generator (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sort these values instead of random ones (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub values: Option<Vec<u32>>,

    /// Print JSON summary and exit (no TUI)
    #[arg(long, conflicts_with = "text")]
    pub json: bool,

    /// Print pass-by-pass progress and a text summary, then exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Export the run summary as JSON
    #[arg(long)]
    pub export_json: Option<std::path::PathBuf>,

    /// Start sorting as soon as the TUI opens
    #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
    pub sort_on_launch: bool,

    /// Log file for the TUI (defaults to the user data directory)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,
}

impl Cli {
    /// True when the run will take over the terminal.
    pub fn is_interactive(&self) -> bool {
        cfg!(feature = "tui") && !self.json && !self.text
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if args.json {
        return run_json(args).await;
    }
    if args.text {
        return run_text(args).await;
    }

    #[cfg(feature = "tui")]
    return crate::tui::run(args).await;

    // Fallback when built without TUI support.
    #[cfg(not(feature = "tui"))]
    return run_text(args).await;
}

/// Build a `RunConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> RunConfig {
    RunConfig {
        size: args
            .values
            .as_ref()
            .map(|v| v.len())
            .unwrap_or(args.size as usize),
        delay: Duration::from(args.delay),
        seed: args.seed,
    }
}

/// Random source for a run: seeded when requested, otherwise from OS entropy.
pub fn build_rng(cfg: &RunConfig) -> StdRng {
    match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Initial player for a session: explicit `--values` win over generated ones.
pub fn build_player(args: &Cli, cfg: &RunConfig, rng: &mut StdRng) -> SortPlayer {
    match args.values.as_ref() {
        Some(values) => SortPlayer::from_values(values.clone()),
        None => SortPlayer::new(cfg.size, rng),
    }
}

/// Run one paced sort headlessly, forwarding every event to `on_event`.
async fn run_headless(
    args: &Cli,
    mut on_event: impl FnMut(SortEvent),
) -> Result<RunSummary> {
    let cfg = build_config(args);
    let mut rng = build_rng(&cfg);
    let mut player = build_player(args, &cfg, &mut rng);
    let playback = player
        .run()
        .context("sort player refused to start a fresh run")?;

    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<SortEvent>();
    let (_ctrl_tx, ctrl_rx) = mpsc::unbounded_channel::<EngineControl>();

    let engine = SortEngine::new(cfg);
    let handle = tokio::spawn(async move { engine.run(playback, evt_tx, ctrl_rx).await });

    while let Some(ev) = evt_rx.recv().await {
        on_event(ev);
    }

    handle
        .await
        .context("sort engine task failed")?
        .context("sort run failed")
}

async fn run_json(args: Cli) -> Result<()> {
    let (out_tx, out_handle) = spawn_output_writer();
    let summary = run_headless(&args, |_| {}).await?;

    handle_exports(&args, &summary)?;

    let out = serde_json::to_string_pretty(&summary)?;
    let _ = out_tx.send(OutputLine::Stdout(out));
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

async fn run_text(args: Cli) -> Result<()> {
    let (out_tx, out_handle) = spawn_output_writer();

    let progress_tx = out_tx.clone();
    let mut pass = 0u64;
    let summary = run_headless(&args, |ev| match ev {
        SortEvent::RunStarted { len } => {
            let _ = progress_tx.send(OutputLine::Stderr(format!("== Sorting {len} values ==")));
        }
        SortEvent::Frame(frame) if frame.kind == FrameKind::PassComplete => {
            pass += 1;
            let _ = progress_tx.send(OutputLine::Stderr(format!(
                "Pass {pass}: boundary {} {:?}",
                frame.state.sorted_boundary, frame.values
            )));
        }
        SortEvent::Info(info) => {
            let _ = progress_tx.send(OutputLine::Stderr(info.to_message()));
        }
        _ => {}
    })
    .await?;
    drop(progress_tx);

    handle_exports(&args, &summary)?;
    let text = crate::text_summary::build_text_summary(&summary);
    for line in text.lines {
        let _ = out_tx.send(OutputLine::Stdout(line));
    }
    if let Some(p) = args.export_json.as_deref() {
        let _ = out_tx.send(OutputLine::Stderr(format!("Exported: {}", p.display())));
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

/// Handle export operations for both text and JSON modes.
fn handle_exports(args: &Cli, summary: &RunSummary) -> Result<()> {
    if let Some(p) = args.export_json.as_deref() {
        crate::storage::export_json(p, summary)?;
    }
    Ok(())
}
