//! The learner: registry, pools, RNG and configuration bundled together.
//!
//! A [`Game`](crate::tictactoe::Game) borrows a learner for its lifetime.
//! Nothing here is global, so every test can build its own isolated learner.

use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{pool::MovePool, reinforcement::Outcome, store::PoolStore};
use crate::{
    Result,
    config::{ExhaustionPolicy, LearnerConfig},
    identifiers::{PoolKey, StateId},
    registry::StateRegistry,
    tictactoe::{BoardState, GameOutcome, MoveSource, Player, Ply},
};

/// Self-learning move source backed by per-(board, player) move pools
pub struct Learner {
    config: LearnerConfig,
    registry: StateRegistry,
    store: PoolStore,
    rng: StdRng,
    episodes: usize,
}

impl std::fmt::Debug for Learner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Learner")
            .field("config", &self.config)
            .field("states", &self.registry.len())
            .field("pools", &self.store.pool_count())
            .field("episodes", &self.episodes)
            .finish()
    }
}

/// Summary of one reinforcement replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub plies_reinforced: usize,
    pub entries_added: usize,
}

/// Statistics about a learner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerStats {
    pub registered_states: usize,
    pub pools: usize,
    pub pool_entries: usize,
    pub episodes: usize,
}

impl Learner {
    pub fn new(config: LearnerConfig) -> Self {
        let registry = StateRegistry::new(config.deduplicate);
        let store = PoolStore::new(config.exhaustion, config.reinforcement);
        let rng = Self::make_rng(config.seed);
        Self {
            config,
            registry,
            store,
            rng,
            episodes: 0,
        }
    }

    /// Default configuration with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(LearnerConfig::default().with_seed(seed))
    }

    fn make_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        }
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    pub fn store(&self) -> &PoolStore {
        &self.store
    }

    pub fn set_exhaustion(&mut self, exhaustion: ExhaustionPolicy) {
        self.config.exhaustion = exhaustion;
        self.store.set_exhaustion(exhaustion);
    }

    pub fn set_reinforce_both_players(&mut self, both: bool) {
        self.config.reinforce_both_players = both;
    }

    /// Id of the empty starting board
    pub fn root(&self) -> StateId {
        self.registry.root()
    }

    pub fn state(&self, id: StateId) -> Result<BoardState> {
        self.registry.state(id)
    }

    /// Id first registered for a board layout
    pub fn lookup(&self, board: &BoardState) -> Option<StateId> {
        self.registry.lookup(board)
    }

    /// Register (or find) the board reached by a directed move.
    pub fn successor(&mut self, state: StateId, player: Player, position: usize) -> Result<StateId> {
        self.registry.successor(state, player, position)
    }

    /// Draw the agent's move for `player` from `state`'s pool.
    pub fn select(&mut self, state: StateId, player: Player) -> Result<StateId> {
        self.store
            .select(&mut self.registry, PoolKey::new(state, player), &mut self.rng)
    }

    /// Return copies of `successor` to the (state, player) pool.
    pub fn reinforce(
        &mut self,
        state: StateId,
        player: Player,
        successor: StateId,
        outcome: Outcome,
    ) -> Result<usize> {
        self.store.reinforce(
            &mut self.registry,
            PoolKey::new(state, player),
            successor,
            outcome,
        )
    }

    /// Pool for (state, player); fails if it was never materialized
    pub fn pool(&self, state: StateId, player: Player) -> Result<&MovePool> {
        self.store.pool(PoolKey::new(state, player))
    }

    pub fn multiplicity(&self, state: StateId, player: Player, successor: StateId) -> Result<usize> {
        self.store.multiplicity(PoolKey::new(state, player), successor)
    }

    /// Reinforcement replay over a finished game's history.
    ///
    /// Agent plies are always reinforced; directed plies only when
    /// `reinforce_both_players` is set. Each ply is credited relative to its
    /// own player. Pool updates are independent, so order does not matter.
    pub fn train_from_game(&mut self, plies: &[Ply], outcome: GameOutcome) -> Result<ReplaySummary> {
        let both = self.config.reinforce_both_players;
        let mut summary = ReplaySummary::default();

        for ply in plies
            .iter()
            .filter(|ply| both || ply.source == MoveSource::Agent)
        {
            let result = Outcome::for_player(outcome, ply.player);
            summary.entries_added += self.reinforce(ply.before, ply.player, ply.after, result)?;
            summary.plies_reinforced += 1;
        }

        self.episodes += 1;
        debug!(
            "episode {} ended {:?}: reinforced {} plies, {} entries added",
            self.episodes, outcome, summary.plies_reinforced, summary.entries_added
        );
        Ok(summary)
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    /// Get statistics about the learner
    pub fn stats(&self) -> LearnerStats {
        LearnerStats {
            registered_states: self.registry.len(),
            pools: self.store.pool_count(),
            pool_entries: self.store.total_entries(),
            episodes: self.episodes,
        }
    }

    /// Forget everything learned; the RNG keeps its current stream.
    pub fn reset(&mut self) {
        self.registry = StateRegistry::new(self.config.deduplicate);
        self.store.clear();
        self.episodes = 0;
    }
}

impl Default for Learner {
    fn default() -> Self {
        Self::new(LearnerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ply(
        learner: &mut Learner,
        before: StateId,
        player: Player,
        pos: usize,
        source: MoveSource,
    ) -> Ply {
        let after = learner.successor(before, player, pos).unwrap();
        Ply {
            before,
            after,
            player,
            position: pos,
            source,
        }
    }

    #[test]
    fn replay_skips_directed_plies_when_agent_only() {
        let mut learner = Learner::new(
            LearnerConfig::default()
                .with_seed(1)
                .with_reinforce_both_players(false),
        );
        let root = learner.root();
        let first = ply(&mut learner, root, Player::X, 4, MoveSource::Directed);
        let second = ply(&mut learner, first.after, Player::O, 0, MoveSource::Agent);

        let summary = learner
            .train_from_game(&[first, second], GameOutcome::Draw)
            .unwrap();

        assert_eq!(summary.plies_reinforced, 1);
        assert_eq!(summary.entries_added, 1);
        assert!(learner.pool(root, Player::X).is_err());
        assert_eq!(
            learner
                .multiplicity(second.before, Player::O, second.after)
                .unwrap(),
            2
        );
    }

    #[test]
    fn replay_credits_each_ply_relative_to_its_player() {
        let mut learner = Learner::with_seed(2);
        let root = learner.root();
        let x = ply(&mut learner, root, Player::X, 0, MoveSource::Agent);
        let o = ply(&mut learner, x.after, Player::O, 4, MoveSource::Agent);

        let summary = learner
            .train_from_game(&[x, o], GameOutcome::Win(Player::X))
            .unwrap();

        assert_eq!(summary.entries_added, 2);
        assert_eq!(learner.multiplicity(root, Player::X, x.after).unwrap(), 3);
        assert_eq!(learner.multiplicity(x.after, Player::O, o.after).unwrap(), 1);
        assert_eq!(learner.episodes(), 1);
    }

    #[test]
    fn reset_forgets_pools() {
        let mut learner = Learner::with_seed(3);
        let root = learner.root();
        learner.select(root, Player::X).unwrap();
        assert_eq!(learner.stats().pools, 1);

        learner.reset();
        let stats = learner.stats();
        assert_eq!(stats.pools, 0);
        assert_eq!(stats.registered_states, 1);
        assert_eq!(stats.episodes, 0);
    }
}
