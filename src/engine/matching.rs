//! Matching quiz: descriptions are placed onto targets and scored by pair id.
//!
//! A target accepts one placement. A correct placement removes the
//! description from the pool; a wrong one stays on the target until reset
//! and the description remains available.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCard {
    pub id: u32,
    pub text: String,
    pub pair_id: u32,
}

impl MatchCard {
    pub fn new(id: u32, text: &str, pair_id: u32) -> Self {
        Self {
            id,
            text: text.to_string(),
            pair_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRejection {
    UnknownItem,
    UnknownTarget,
    TargetTaken,
}

impl fmt::Display for MatchRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MatchRejection::UnknownItem => "That description is not available",
            MatchRejection::UnknownTarget => "No such target",
            MatchRejection::TargetTaken => "That target already has a match",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    item_id: u32,
    correct: bool,
}

#[derive(Debug, Clone)]
pub struct MatchingQuiz {
    items: Vec<MatchCard>,
    targets: Vec<MatchCard>,
    // Ids of items still in the pool, in display order.
    pool: Vec<u32>,
    // One slot per target, same order as `targets`.
    placements: Vec<Option<Placement>>,
}

impl MatchingQuiz {
    pub fn new<R: Rng + ?Sized>(items: Vec<MatchCard>, targets: Vec<MatchCard>, rng: &mut R) -> Self {
        let placements = vec![None; targets.len()];
        let mut quiz = Self {
            items,
            targets,
            pool: Vec::new(),
            placements,
        };
        quiz.reset(rng);
        quiz
    }

    /// Data structures and their one-line descriptions.
    pub fn with_default_cards<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            vec![
                MatchCard::new(1, "LIFO Structure", 1),
                MatchCard::new(2, "Key-Value Pairs", 4),
                MatchCard::new(3, "FIFO Structure", 2),
                MatchCard::new(4, "Nodes and Edges", 3),
            ],
            vec![
                MatchCard::new(1, "Stack", 1),
                MatchCard::new(2, "Queue", 2),
                MatchCard::new(3, "Graph", 3),
                MatchCard::new(4, "Hash Map", 4),
            ],
            rng,
        )
    }

    /// Shuffle the pool back to every item and clear all targets.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool = self.items.iter().map(|i| i.id).collect();
        self.pool.shuffle(rng);
        self.placements.iter_mut().for_each(|p| *p = None);
    }

    /// Items not yet matched correctly, in display order.
    pub fn pool(&self) -> Vec<&MatchCard> {
        self.pool.iter().filter_map(|id| self.item(*id)).collect()
    }

    pub fn targets(&self) -> &[MatchCard] {
        &self.targets
    }

    /// Item placed on the target at `index` and whether it matched.
    pub fn placement(&self, index: usize) -> Option<(&MatchCard, bool)> {
        let p = self.placements.get(index).copied().flatten()?;
        self.item(p.item_id).map(|item| (item, p.correct))
    }

    /// Place a pool item on a target. Returns whether the pair ids agree.
    pub fn place(&mut self, item_id: u32, target_id: u32) -> Result<bool, MatchRejection> {
        if !self.pool.contains(&item_id) {
            return Err(MatchRejection::UnknownItem);
        }
        let index = self
            .targets
            .iter()
            .position(|t| t.id == target_id)
            .ok_or(MatchRejection::UnknownTarget)?;
        if self.placements[index].is_some() {
            return Err(MatchRejection::TargetTaken);
        }
        let pair_id = self
            .item(item_id)
            .map(|i| i.pair_id)
            .ok_or(MatchRejection::UnknownItem)?;

        let correct = pair_id == self.targets[index].pair_id;
        self.placements[index] = Some(Placement { item_id, correct });
        if correct {
            self.pool.retain(|id| *id != item_id);
        }
        Ok(correct)
    }

    /// Number of targets holding their correct description.
    pub fn score(&self) -> usize {
        self.placements
            .iter()
            .flatten()
            .filter(|p| p.correct)
            .count()
    }

    pub fn all_matched(&self) -> bool {
        self.pool.is_empty()
    }

    fn item(&self, id: u32) -> Option<&MatchCard> {
        self.items.iter().find(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiz() -> MatchingQuiz {
        MatchingQuiz::with_default_cards(&mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn reset_deals_every_item_in_shuffled_order() {
        let q = quiz();
        let mut ids: Vec<u32> = q.pool().iter().map(|i| i.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(q.score(), 0);
        assert!(!q.all_matched());
    }

    #[test]
    fn correct_pairs_leave_the_pool() {
        let mut q = quiz();
        assert_eq!(q.place(1, 1), Ok(true));
        assert_eq!(q.score(), 1);
        assert!(q.pool().iter().all(|i| i.id != 1));
        let (item, correct) = q.placement(0).unwrap();
        assert_eq!(item.text, "LIFO Structure");
        assert!(correct);
        assert_eq!(q.place(1, 2), Err(MatchRejection::UnknownItem));
    }

    #[test]
    fn wrong_pairs_lock_the_target_but_keep_the_item() {
        let mut q = quiz();
        assert_eq!(q.place(2, 1), Ok(false));
        assert_eq!(q.score(), 0);
        assert!(q.pool().iter().any(|i| i.id == 2));
        assert_eq!(q.placement(0).map(|(_, ok)| ok), Some(false));
        assert_eq!(q.place(1, 1), Err(MatchRejection::TargetTaken));
        assert_eq!(q.place(2, 4), Ok(true));
    }

    #[test]
    fn matching_everything_finishes_and_reset_clears() {
        let mut q = quiz();
        for (item, target) in [(1, 1), (3, 2), (4, 3), (2, 4)] {
            assert_eq!(q.place(item, target), Ok(true));
        }
        assert!(q.all_matched());
        assert_eq!(q.score(), 4);
        assert_eq!(q.place(1, 9), Err(MatchRejection::UnknownItem));

        q.reset(&mut StdRng::seed_from_u64(2));
        assert_eq!(q.pool().len(), 4);
        assert!((0..4).all(|i| q.placement(i).is_none()));
    }

    #[test]
    fn unknown_target_is_rejected() {
        let mut q = quiz();
        assert_eq!(q.place(1, 9), Err(MatchRejection::UnknownTarget));
        assert_eq!(q.pool().len(), 4);
    }
}
