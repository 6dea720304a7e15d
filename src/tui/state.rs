use crate::engine::{MatchingQuiz, MultipleChoiceQuiz, Playback, SortPlayer, StackModel};
use crate::metrics::RunTally;
use crate::model::{InfoEvent, RunSummary, SortEvent};
use rand::rngs::StdRng;
use std::time::Instant;

pub const TAB_SORTING: usize = 0;
pub const TAB_STACK: usize = 1;
pub const TAB_QUIZ: usize = 2;
pub const TAB_MATCH: usize = 3;
pub const TAB_HELP: usize = 4;
pub const TAB_COUNT: usize = 5;

pub struct UiState {
    pub tab: usize,
    pub paused: bool,
    pub info: String,

    // Sorting tab
    pub size: usize,
    pub player: SortPlayer,
    pub rng: StdRng,
    pub tally: RunTally,
    pub last_summary: Option<RunSummary>,
    // Set from start until the controller reports the run over; the player is
    // released earlier, when its final frame is produced.
    pub run_in_flight: bool,

    // Stack tab
    pub stack: StackModel,
    pub stack_input: String,
    pub stack_editing: bool, // Whether keys go to the input line

    // Quiz tabs
    pub quiz: MultipleChoiceQuiz,
    pub matching: MatchingQuiz,
    pub match_cursor: usize,
}

impl UiState {
    pub fn new(player: SortPlayer, mut rng: StdRng) -> Self {
        let matching = MatchingQuiz::with_default_cards(&mut rng);
        Self {
            tab: TAB_SORTING,
            paused: false,
            info: String::new(),
            size: player.values().len(),
            player,
            rng,
            tally: RunTally::default(),
            last_summary: None,
            run_in_flight: false,
            stack: StackModel::default(),
            stack_input: String::new(),
            stack_editing: false,
            quiz: MultipleChoiceQuiz::default(),
            matching,
            match_cursor: 0,
        }
    }

    pub fn next_tab(&mut self) {
        self.tab = (self.tab + 1) % TAB_COUNT;
        self.stack_editing = false;
    }

    /// Ask the player for a playback; on success the caller hands it to the controller.
    pub fn start_sort(&mut self) -> Option<Playback> {
        let playback = if self.run_in_flight {
            None
        } else {
            self.player.run()
        };
        match playback {
            Some(playback) => {
                self.tally = RunTally::default();
                self.paused = false;
                self.run_in_flight = true;
                self.info = "Sorting…".into();
                Some(playback)
            }
            None => {
                self.info = InfoEvent::AlreadyRunning.to_message();
                None
            }
        }
    }

    pub fn generate_new(&mut self) {
        if !self.run_in_flight && self.player.reset(self.size, &mut self.rng) {
            self.tally = RunTally::default();
            self.last_summary = None;
            self.info = format!("Generated {} new values", self.size);
        } else {
            self.info = "Cannot generate a new array while sorting".into();
        }
    }

    pub fn toggle_pause(&mut self) -> Option<bool> {
        if !self.player.is_running() {
            return None;
        }
        self.paused = !self.paused;
        Some(self.paused)
    }

    pub fn apply_event(&mut self, ev: SortEvent) {
        match ev {
            SortEvent::RunStarted { len } => {
                self.info = format!("Sorting {len} values…");
            }
            SortEvent::Frame(frame) => {
                self.tally.record(&frame);
                self.player.apply(&frame);
            }
            SortEvent::Info(info) => {
                if let InfoEvent::RunFailed(_) = info {
                    self.run_in_flight = false;
                    self.paused = false;
                }
                self.info = info.to_message();
            }
            SortEvent::RunCompleted { summary } => {
                self.run_in_flight = false;
                self.paused = false;
                self.info = completion_message(&summary);
                self.last_summary = Some(*summary);
            }
        }
    }

    pub fn stack_push(&mut self, now: Instant) {
        match self.stack.push(&self.stack_input, now) {
            Ok(()) => {
                self.info = format!("Pushed: {}", self.stack_input);
                self.stack_input.clear();
            }
            Err(e) => self.info = e.to_string(),
        }
    }

    pub fn stack_pop(&mut self, now: Instant) {
        match self.stack.pop(now) {
            Ok(v) => self.info = format!("Popped: {v}"),
            Err(e) => self.info = e.to_string(),
        }
    }

    pub fn quiz_answer(&mut self, option: usize) {
        self.info = match self.quiz.answer(option) {
            Ok(true) => "Correct!".into(),
            Ok(false) => "Not quite".into(),
            Err(e) => e.to_string(),
        };
    }

    pub fn quiz_next(&mut self) {
        self.info = match self.quiz.advance() {
            Ok(()) if self.quiz.is_finished() => self.quiz.result_message(),
            Ok(()) => {
                let (n, total) = self.quiz.position();
                format!("Question {n}/{total}")
            }
            Err(e) => e.to_string(),
        };
    }

    pub fn quiz_reset(&mut self) {
        self.quiz.reset();
        self.info = "Quiz reset".into();
    }

    pub fn match_move(&mut self, down: bool) {
        let len = self.matching.pool().len();
        if len == 0 {
            return;
        }
        self.match_cursor = if down {
            (self.match_cursor + 1) % len
        } else {
            (self.match_cursor + len - 1) % len
        };
    }

    /// Place the highlighted description on the target at `target_index`.
    pub fn match_place(&mut self, target_index: usize) {
        let Some(item_id) = self.matching.pool().get(self.match_cursor).map(|i| i.id) else {
            self.info = "Nothing left to match".into();
            return;
        };
        let Some(target_id) = self.matching.targets().get(target_index).map(|t| t.id) else {
            self.info = "No such target".into();
            return;
        };
        self.info = match self.matching.place(item_id, target_id) {
            Ok(_) if self.matching.all_matched() => {
                "Congratulations! You've matched all the concepts correctly.".into()
            }
            Ok(true) => "Correct match".into(),
            Ok(false) => "Incorrect match".into(),
            Err(e) => e.to_string(),
        };
        let len = self.matching.pool().len();
        if self.match_cursor >= len {
            self.match_cursor = len.saturating_sub(1);
        }
    }

    pub fn match_reset(&mut self) {
        self.matching.reset(&mut self.rng);
        self.match_cursor = 0;
        self.info = "Matching reset".into();
    }
}

pub fn completion_message(summary: &RunSummary) -> String {
    if summary.completed {
        format!(
            "Sorted {} values: {} comparisons, {} swaps, {} passes",
            summary.sorted.len(),
            summary.comparisons,
            summary.swaps,
            summary.passes
        )
    } else {
        format!("Stopped after {} comparisons", summary.comparisons)
    }
}
