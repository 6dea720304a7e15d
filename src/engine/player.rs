use super::bubble::Playback;
use super::generate::generate;
use crate::model::{Frame, PlaybackState};
use rand::Rng;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Holds the player's running flag for the lifetime of one playback.
/// Dropping it (finished or abandoned run) clears the flag.
#[derive(Debug)]
pub(crate) struct RunGuard(Arc<AtomicBool>);

impl RunGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunGuard(flag.clone()))
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns a sequence and its playback state, and hands out at most one
/// [`Playback`] at a time.
#[derive(Debug)]
pub struct SortPlayer {
    values: Vec<u32>,
    state: PlaybackState,
    running: Arc<AtomicBool>,
    // Bumped by every reset and run; frames stamped with another id are stale.
    run_id: u64,
}

impl SortPlayer {
    pub fn new<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        Self::from_values(generate(size, rng))
    }

    pub fn from_values(values: Vec<u32>) -> Self {
        let state = PlaybackState::idle(values.len());
        Self {
            values,
            state,
            running: Arc::new(AtomicBool::new(false)),
            run_id: 0,
        }
    }

    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            running: self.is_running(),
            ..self.state
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Replace the sequence with `size` fresh values and reset the playback
    /// state. Returns `false` without touching anything while a run is active.
    pub fn reset<R: Rng + ?Sized>(&mut self, size: usize, rng: &mut R) -> bool {
        if self.is_running() {
            tracing::debug!("reset ignored: sort in progress");
            return false;
        }
        self.values = generate(size, rng);
        self.state = PlaybackState::idle(size);
        self.run_id += 1;
        true
    }

    /// Start a run over a copy of the current sequence.
    ///
    /// Returns `None` while a previous playback is still alive. The player is
    /// released when the playback yields its final frame or is dropped.
    pub fn run(&mut self) -> Option<Playback> {
        let Some(guard) = RunGuard::acquire(&self.running) else {
            tracing::debug!("run ignored: sort in progress");
            return None;
        };
        self.run_id += 1;
        self.state = PlaybackState {
            running: true,
            ..PlaybackState::idle(self.values.len())
        };
        Some(Playback::new(
            self.run_id,
            self.values.clone(),
            Some(guard),
        ))
    }

    /// Mirror a frame received from the latest playback into the player's own
    /// state. Frames from an earlier run or from before a reset are ignored;
    /// returns whether the frame was applied.
    pub fn apply(&mut self, frame: &Frame) -> bool {
        if frame.run_id != self.run_id {
            tracing::debug!(
                frame_run = frame.run_id,
                current_run = self.run_id,
                "stale frame ignored"
            );
            return false;
        }
        if frame.values.len() == self.values.len() {
            self.values.clone_from(&frame.values);
        }
        self.state = frame.state;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FrameKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn new_player_is_idle_with_full_boundary() {
        let mut rng = StdRng::seed_from_u64(1);
        let player = SortPlayer::new(20, &mut rng);
        assert_eq!(player.values().len(), 20);
        assert_eq!(player.state(), PlaybackState::idle(20));
    }

    #[test]
    fn second_run_is_rejected_while_first_is_alive() {
        let mut player = SortPlayer::from_values(vec![5, 3, 8, 1]);
        let mut first = player.run().expect("first run starts");
        let frame = first.next().unwrap();
        player.apply(&frame);

        assert!(player.run().is_none());
        assert!(player.is_running());

        // The in-flight run is unaffected by the rejected call.
        let rest: Vec<Frame> = first.collect();
        assert_eq!(rest.last().unwrap().values, vec![1, 3, 5, 8]);
        assert!(!player.is_running());
        assert!(player.run().is_some());
    }

    #[test]
    fn reset_is_rejected_while_running() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut player = SortPlayer::from_values(vec![3, 2, 1]);
        let playback = player.run().unwrap();

        assert!(!player.reset(10, &mut rng));
        assert_eq!(player.values(), &[3, 2, 1]);

        drop(playback);
        assert!(player.reset(10, &mut rng));
        assert_eq!(player.values().len(), 10);
        assert_eq!(player.state(), PlaybackState::idle(10));
    }

    #[test]
    fn dropping_a_playback_releases_the_player() {
        let mut player = SortPlayer::from_values(vec![4, 3, 2, 1]);
        {
            let mut playback = player.run().unwrap();
            playback.next();
            playback.next();
        }
        assert!(!player.is_running());
        assert!(player.run().is_some());
    }

    #[test]
    fn running_flag_clears_before_final_frame_is_seen() {
        let mut player = SortPlayer::from_values(vec![2, 1]);
        let playback = player.run().unwrap();
        let mut finished = None;
        for frame in playback {
            if frame.kind == FrameKind::Finished {
                assert!(!player.is_running());
                finished = Some(frame);
                break;
            }
            assert!(frame.state.running);
        }
        assert!(finished.is_some());
        assert!(!player.is_running());
    }

    #[test]
    fn applying_frames_tracks_the_run() {
        let mut player = SortPlayer::from_values(vec![5, 3, 8, 1]);
        let playback = player.run().unwrap();
        let frames: Vec<Frame> = playback.collect();
        let mut last_boundary = player.state().sorted_boundary;
        for frame in &frames {
            player.apply(frame);
            assert!(player.state().sorted_boundary <= last_boundary);
            last_boundary = player.state().sorted_boundary;
        }
        assert_eq!(player.values(), &[1, 3, 5, 8]);
        assert_eq!(player.state().sorted_boundary, 0);
        assert!(!player.state().running);
        assert!(player.state().current_index.is_none());
    }

    #[test]
    fn frames_from_before_a_reset_are_ignored() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut player = SortPlayer::from_values(vec![5, 3, 8, 1]);
        let frames: Vec<Frame> = player.run().unwrap().collect();
        let (last, earlier) = frames.split_last().unwrap();
        for frame in earlier {
            assert!(player.apply(frame));
        }

        // The playback is exhausted, so the player is free before the final
        // frame has been mirrored.
        assert!(player.reset(4, &mut rng));
        let fresh = player.values().to_vec();

        assert!(!player.apply(last));
        assert_eq!(player.values(), fresh.as_slice());
        assert_eq!(player.state(), PlaybackState::idle(4));
    }

    #[test]
    fn frames_from_an_earlier_run_are_ignored() {
        let mut player = SortPlayer::from_values(vec![3, 1, 2]);
        let old: Vec<Frame> = player.run().unwrap().collect();
        let mut second = player.run().unwrap();
        let first_of_second = second.next().unwrap();

        assert!(player.apply(&first_of_second));
        assert!(!player.apply(old.last().unwrap()));
        assert!(player.state().running);
        assert_eq!(player.state().current_index, Some(0));
    }

    #[test]
    fn run_starts_from_the_full_boundary_after_reset() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut player = SortPlayer::from_values(vec![2, 1]);
        for frame in player.run().unwrap() {
            player.apply(&frame);
        }
        assert_eq!(player.state().sorted_boundary, 0);
        assert!(player.reset(6, &mut rng));
        let first = player.run().unwrap().next().unwrap();
        assert_eq!(first.state.sorted_boundary, 6);
    }
}
