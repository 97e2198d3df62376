//! Move pool: the multiset of preferred successors for one (board, player).

use rand::Rng;

use crate::identifiers::StateId;

/// Insertion-ordered multiset of successor states.
///
/// The number of copies of a successor is its weight: a uniform draw over
/// the entries picks each successor with probability proportional to its
/// multiplicity. Order matters only for reproducibility under a fixed seed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovePool {
    entries: Vec<StateId>,
}

impl MovePool {
    /// Create a pool holding one copy of each successor
    pub fn new(successors: impl IntoIterator<Item = StateId>) -> Self {
        Self {
            entries: successors.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StateId] {
        &self.entries
    }

    /// Number of copies of `successor` currently in the pool
    pub fn multiplicity(&self, successor: StateId) -> usize {
        self.entries.iter().filter(|&&s| s == successor).count()
    }

    /// Distinct successors with their multiplicities, in first-appearance order
    pub fn counts(&self) -> Vec<(StateId, usize)> {
        let mut counts: Vec<(StateId, usize)> = Vec::new();
        for &entry in &self.entries {
            match counts.iter_mut().find(|(s, _)| *s == entry) {
                Some((_, n)) => *n += 1,
                None => counts.push((entry, 1)),
            }
        }
        counts
    }

    /// Probability that the next draw picks `successor`
    pub fn probability(&self, successor: StateId) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.multiplicity(successor) as f64 / self.entries.len() as f64
    }

    /// Remove and return one entry chosen uniformly at random.
    ///
    /// Returns `None` when the pool is exhausted.
    pub fn draw(&mut self, rng: &mut impl Rng) -> Option<StateId> {
        if self.entries.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.entries.len());
        Some(self.entries.remove(idx))
    }

    /// Append `copies` instances of `successor`
    pub fn insert_copies(&mut self, successor: StateId, copies: usize) {
        self.entries.extend(std::iter::repeat_n(successor, copies));
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn ids(raw: &[u32]) -> Vec<StateId> {
        raw.iter().copied().map(StateId::new).collect()
    }

    #[test]
    fn draw_removes_exactly_one_instance() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut pool = MovePool::new(ids(&[1, 2, 3]));
        pool.insert_copies(StateId::new(2), 2);

        let drawn = pool.draw(&mut rng).unwrap();
        assert_eq!(pool.len(), 4);
        let expected = if drawn == StateId::new(2) { 2 } else { 0 };
        assert_eq!(pool.multiplicity(drawn), expected);
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = MovePool::new(ids(&[7]));
        assert_eq!(pool.draw(&mut rng), Some(StateId::new(7)));
        assert!(pool.is_empty());
        assert_eq!(pool.draw(&mut rng), None);
    }

    #[test]
    fn counts_follow_first_appearance() {
        let mut pool = MovePool::new(ids(&[4, 1]));
        pool.insert_copies(StateId::new(4), 2);
        pool.insert_copies(StateId::new(9), 1);

        assert_eq!(
            pool.counts(),
            vec![(StateId::new(4), 3), (StateId::new(1), 1), (StateId::new(9), 1)]
        );
        assert!((pool.probability(StateId::new(4)) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn draws_follow_multiplicity() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut favoured = 0;
        for _ in 0..2000 {
            let mut pool = MovePool::new(ids(&[1, 2]));
            pool.insert_copies(StateId::new(1), 2);
            if pool.draw(&mut rng) == Some(StateId::new(1)) {
                favoured += 1;
            }
        }
        // expected 3/4 of draws
        assert!((1350..=1650).contains(&favoured), "favoured = {favoured}");
    }
}
