//! Reinforcement store: every move pool the learner has materialized.

use std::collections::HashMap;

use log::debug;
use rand::Rng;

use super::{
    pool::MovePool,
    reinforcement::{Outcome, ReinforcementValues},
};
use crate::{
    Error, Result,
    config::ExhaustionPolicy,
    identifiers::{PoolKey, StateId},
    registry::StateRegistry,
};

/// Owner of all move pools, keyed by (board, player).
///
/// Pools are created lazily from the legal moves of their board the first
/// time they are selected from or reinforced.
#[derive(Debug, Clone)]
pub struct PoolStore {
    pools: HashMap<PoolKey, MovePool>,
    exhaustion: ExhaustionPolicy,
    values: ReinforcementValues,
}

impl PoolStore {
    pub fn new(exhaustion: ExhaustionPolicy, values: ReinforcementValues) -> Self {
        Self {
            pools: HashMap::new(),
            exhaustion,
            values,
        }
    }

    pub fn exhaustion(&self) -> ExhaustionPolicy {
        self.exhaustion
    }

    pub fn set_exhaustion(&mut self, exhaustion: ExhaustionPolicy) {
        self.exhaustion = exhaustion;
    }

    /// One copy of each legal successor of the key's board
    fn materialize(registry: &mut StateRegistry, key: PoolKey) -> Result<MovePool> {
        let board = registry.state(key.state)?;
        let successors = board
            .legal_positions()
            .into_iter()
            .map(|pos| registry.successor(key.state, key.player, pos))
            .collect::<Result<Vec<_>>>()?;
        Ok(MovePool::new(successors))
    }

    /// Get the pool for `key`, creating it if this is the first access.
    pub fn ensure(&mut self, registry: &mut StateRegistry, key: PoolKey) -> Result<&mut MovePool> {
        if !self.pools.contains_key(&key) {
            let pool = Self::materialize(registry, key)?;
            debug!("materialized pool {key} with {} successors", pool.len());
            self.pools.insert(key, pool);
        }
        self.pools.get_mut(&key).ok_or_else(|| Error::PoolNotInitialized {
            state: key.state.to_string(),
            player: key.player,
        })
    }

    /// Draw and remove one successor uniformly from the pool for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MoveExhausted`] when the pool is empty and the policy
    /// is [`ExhaustionPolicy::Report`], or when the board has no legal moves.
    pub fn select(
        &mut self,
        registry: &mut StateRegistry,
        key: PoolKey,
        rng: &mut impl Rng,
    ) -> Result<StateId> {
        let exhaustion = self.exhaustion;
        let pool = self.ensure(registry, key)?;
        if let Some(successor) = pool.draw(rng) {
            return Ok(successor);
        }

        match exhaustion {
            ExhaustionPolicy::Report => Err(Self::exhausted(registry, key)),
            ExhaustionPolicy::Refill => {
                *pool = Self::materialize(registry, key)?;
                debug!("pool {key} exhausted; refilled with {} successors", pool.len());
                pool.draw(rng).ok_or_else(|| Self::exhausted(registry, key))
            }
        }
    }

    fn exhausted(registry: &StateRegistry, key: PoolKey) -> Error {
        match registry.state(key.state) {
            Ok(board) => Error::MoveExhausted {
                state: board.encode(),
            },
            Err(err) => err,
        }
    }

    /// Return copies of `successor` to the pool for `key` according to `outcome`.
    ///
    /// Returns the number of copies added.
    pub fn reinforce(
        &mut self,
        registry: &mut StateRegistry,
        key: PoolKey,
        successor: StateId,
        outcome: Outcome,
    ) -> Result<usize> {
        let copies = self.values.copies(outcome);
        let pool = self.ensure(registry, key)?;
        pool.insert_copies(successor, copies);
        Ok(copies)
    }

    /// Borrow a pool that has already been materialized.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PoolNotInitialized`] if the pool was never accessed.
    pub fn pool(&self, key: PoolKey) -> Result<&MovePool> {
        self.pools.get(&key).ok_or_else(|| Error::PoolNotInitialized {
            state: key.state.to_string(),
            player: key.player,
        })
    }

    pub fn contains(&self, key: PoolKey) -> bool {
        self.pools.contains_key(&key)
    }

    /// Copies of `successor` in the pool for `key`
    pub fn multiplicity(&self, key: PoolKey, successor: StateId) -> Result<usize> {
        Ok(self.pool(key)?.multiplicity(successor))
    }

    pub fn pools(&self) -> impl Iterator<Item = (&PoolKey, &MovePool)> {
        self.pools.iter()
    }

    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Sum of all pool lengths
    pub fn total_entries(&self) -> usize {
        self.pools.values().map(MovePool::len).sum()
    }

    pub fn clear(&mut self) {
        self.pools.clear();
    }
}

impl Default for PoolStore {
    fn default() -> Self {
        Self::new(ExhaustionPolicy::default(), ReinforcementValues::default())
    }
}
