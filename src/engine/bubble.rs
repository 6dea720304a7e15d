//! Lazy bubble sort frame generator.
//!
//! A [`Playback`] owns a private copy of the sequence and yields one [`Frame`]
//! per comparison, one per swap, one per finished pass and a final
//! [`FrameKind::Finished`] frame. It never sleeps; pacing is the caller's job.

use super::player::RunGuard;
use crate::model::{Frame, FrameKind, PlaybackState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Compare,
    Decide,
    EndPass,
    Finish,
    Done,
}

/// Finite, ordered iterator of animation frames for one bubble sort run.
#[derive(Debug)]
pub struct Playback {
    run_id: u64,
    values: Vec<u32>,
    // Length of the unsorted prefix for the current pass.
    n: usize,
    i: usize,
    swapped: bool,
    step: Step,
    current: Option<usize>,
    compare: Option<usize>,
    guard: Option<RunGuard>,
}

impl Playback {
    pub(crate) fn new(run_id: u64, values: Vec<u32>, guard: Option<RunGuard>) -> Self {
        let n = values.len();
        Self {
            run_id,
            values,
            n,
            i: 0,
            swapped: false,
            step: Step::Compare,
            current: None,
            compare: None,
            guard,
        }
    }

    /// Sequence as it stands after the frames consumed so far.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    fn frame(&self, kind: FrameKind) -> Frame {
        Frame {
            run_id: self.run_id,
            kind,
            values: self.values.clone(),
            state: PlaybackState {
                current_index: self.current,
                compare_index: self.compare,
                sorted_boundary: self.n,
                running: true,
            },
        }
    }
}

impl Iterator for Playback {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        loop {
            match self.step {
                Step::Compare => {
                    if self.i + 1 < self.n {
                        self.current = Some(self.i);
                        self.compare = Some(self.i + 1);
                        self.step = Step::Decide;
                        return Some(self.frame(FrameKind::Compare));
                    }
                    self.step = Step::EndPass;
                }
                Step::Decide => {
                    let i = self.i;
                    self.i += 1;
                    self.step = Step::Compare;
                    if self.values[i] > self.values[i + 1] {
                        self.values.swap(i, i + 1);
                        self.swapped = true;
                        return Some(self.frame(FrameKind::Swap));
                    }
                }
                Step::EndPass => {
                    self.n = self.n.saturating_sub(1);
                    self.i = 0;
                    self.step = if self.swapped {
                        Step::Compare
                    } else {
                        Step::Finish
                    };
                    self.swapped = false;
                    return Some(self.frame(FrameKind::PassComplete));
                }
                Step::Finish => {
                    self.step = Step::Done;
                    // Release the player before the caller sees the final frame.
                    self.guard.take();
                    self.current = None;
                    self.compare = None;
                    return Some(Frame {
                        run_id: self.run_id,
                        kind: FrameKind::Finished,
                        values: self.values.clone(),
                        state: PlaybackState {
                            current_index: None,
                            compare_index: None,
                            sorted_boundary: 0,
                            running: false,
                        },
                    });
                }
                Step::Done => return None,
            }
        }
    }
}
