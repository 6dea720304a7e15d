use crate::model::{Frame, FrameKind};

/// Running counts over the frames of one sort run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTally {
    pub comparisons: u64,
    pub swaps: u64,
    pub passes: u64,
    pub frames: u64,
}

impl RunTally {
    pub fn record(&mut self, frame: &Frame) {
        self.frames += 1;
        match frame.kind {
            FrameKind::Compare => self.comparisons += 1,
            FrameKind::Swap => self.swaps += 1,
            FrameKind::PassComplete => self.passes += 1,
            FrameKind::Finished => {}
        }
    }
}

/// Fraction of the sequence already in final position (0.0..=1.0).
pub fn sorted_fraction(len: usize, sorted_boundary: usize) -> f64 {
    if len == 0 {
        return 1.0;
    }
    (len.saturating_sub(sorted_boundary) as f64) / (len as f64)
}
