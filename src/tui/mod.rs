mod charts;
mod export;
mod help;
mod quiz;
mod state;

use crate::cli::{build_config, build_player, build_rng, Cli};
use crate::model::{RunConfig, SortEvent};
use crate::orchestrator::{self, UiCommand};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Terminal,
};
use state::{UiState, TAB_HELP, TAB_MATCH, TAB_QUIZ, TAB_SORTING, TAB_STACK};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure and task switching in the hot path.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<SortEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();
    let cfg = build_config(&args);

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_args = args.clone();
    let ui_cfg = cfg.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_args, ui_cfg, event_rx, cmd_tx));

    let res = orchestrator::run_controller(cfg, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// What the key handler wants the loop to do next.
enum KeyOutcome {
    Continue,
    Quit,
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    args: Cli,
    cfg: RunConfig,
    mut event_rx: UnboundedReceiver<SortEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; no cross-thread mutation.
    let mut rng = build_rng(&cfg);
    let player = build_player(&args, &cfg, &mut rng);
    let mut state = UiState::new(player, rng);
    state.info = "Press s to start sorting, g for a new array".into();

    if args.sort_on_launch {
        if let Some(playback) = state.start_sort() {
            let _ = cmd_tx.send(UiCommand::Start(playback));
        }
    }

    // Faster than the default frame delay so no comparison is skipped on screen.
    let tick_rate = Duration::from_millis(30);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep UI responsive; unbounded channel avoids backpressure.
        while let Ok(ev) = event_rx.try_recv() {
            match ev {
                SortEvent::RunCompleted { summary } => {
                    let processed = orchestrator::process_run_completion(&args, &summary);
                    state.apply_event(SortEvent::RunCompleted {
                        summary: Box::new(processed.summary),
                    });
                    if !processed.export_messages.is_empty() {
                        state.info = processed.export_messages.join("; ");
                    }
                }
                other => state.apply_event(other),
            }
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if let KeyOutcome::Quit = handle_key(&mut state, k, &cmd_tx) {
                    let _ = cmd_tx.send(UiCommand::Quit);
                    break Ok(());
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn handle_key(state: &mut UiState, k: KeyEvent, cmd_tx: &UnboundedSender<UiCommand>) -> KeyOutcome {
    if let (KeyModifiers::CONTROL, KeyCode::Char('c')) = (k.modifiers, k.code) {
        return KeyOutcome::Quit;
    }

    // Typing into the stack input swallows everything but a few control keys.
    if state.tab == TAB_STACK && state.stack_editing {
        match k.code {
            KeyCode::Esc => state.stack_editing = false,
            KeyCode::Enter => state.stack_push(Instant::now()),
            KeyCode::Backspace => {
                state.stack_input.pop();
            }
            KeyCode::Tab => state.next_tab(),
            KeyCode::Char(c) => state.stack_input.push(c),
            _ => {}
        }
        return KeyOutcome::Continue;
    }

    match k.code {
        KeyCode::Char('q') => return KeyOutcome::Quit,
        KeyCode::Tab => state.next_tab(),
        KeyCode::Char('?') => state.tab = TAB_HELP,
        KeyCode::Char('s') | KeyCode::Enter if state.tab == TAB_SORTING => {
            if let Some(playback) = state.start_sort() {
                let _ = cmd_tx.send(UiCommand::Start(playback));
            }
        }
        KeyCode::Char('g') if state.tab == TAB_SORTING => state.generate_new(),
        KeyCode::Char('p') if state.tab == TAB_SORTING => {
            if let Some(paused) = state.toggle_pause() {
                let _ = cmd_tx.send(UiCommand::Pause(paused));
            }
        }
        KeyCode::Char('c') if state.tab == TAB_SORTING => {
            if state.player.is_running() {
                let _ = cmd_tx.send(UiCommand::Cancel);
            } else {
                state.info = "Nothing to cancel".into();
            }
        }
        KeyCode::Char('e') if state.tab == TAB_SORTING => export::export_and_show_path(state),
        KeyCode::Char('i') if state.tab == TAB_STACK => {
            state.stack_editing = true;
            state.info = "Type a value, Enter to push, Esc to stop editing".into();
        }
        KeyCode::Enter if state.tab == TAB_STACK => state.stack_push(Instant::now()),
        KeyCode::Char('o') if state.tab == TAB_STACK => state.stack_pop(Instant::now()),
        KeyCode::Char(c @ '1'..='9') if state.tab == TAB_QUIZ => {
            state.quiz_answer(c as usize - '1' as usize)
        }
        KeyCode::Char('n') if state.tab == TAB_QUIZ => state.quiz_next(),
        KeyCode::Char('r') if state.tab == TAB_QUIZ => state.quiz_reset(),
        KeyCode::Char('j') | KeyCode::Down if state.tab == TAB_MATCH => state.match_move(true),
        KeyCode::Char('k') | KeyCode::Up if state.tab == TAB_MATCH => state.match_move(false),
        KeyCode::Char(c @ '1'..='9') if state.tab == TAB_MATCH => {
            state.match_place(c as usize - '1' as usize)
        }
        KeyCode::Char('r') if state.tab == TAB_MATCH => state.match_reset(),
        _ => {}
    }
    KeyOutcome::Continue
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(area);

    let tabs = Tabs::new(vec![
        Line::from("Sorting"),
        Line::from("Stack"),
        Line::from("Quiz"),
        Line::from("Match"),
        Line::from("Help"),
    ])
    .select(state.tab)
    .block(Block::default().borders(Borders::ALL).title("sortviz"))
    .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        TAB_SORTING => draw_sorting(chunks[1], f, state),
        TAB_STACK => charts::render_stack(f, chunks[1], state),
        TAB_QUIZ => quiz::draw_quiz(chunks[1], f, state),
        TAB_MATCH => quiz::draw_matching(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f),
    }

    let status = Paragraph::new(Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::Gray)),
        Span::raw(state.info.clone()),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[2]);
}

fn draw_sorting(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(6),    // Bars
                Constraint::Length(3), // Legend and counters
                Constraint::Length(3), // Progress
            ]
            .as_ref(),
        )
        .split(area);

    charts::render_sort_bars(f, rows[0], state);
    charts::render_legend(f, rows[1], state);
    charts::render_progress(f, rows[2], state);
}
