//! Identifier types for registered board states and move pools.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Player;

/// Stable identity of a board registered in a [`StateRegistry`].
///
/// With deduplication on, one `StateId` stands for every structurally equal
/// board. With deduplication off, it identifies one node of the game tree.
///
/// [`StateRegistry`]: crate::registry::StateRegistry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateId(u32);

impl StateId {
    /// Create a state identifier from a registry index.
    ///
    /// # Examples
    ///
    /// ```
    /// use noughts::identifiers::StateId;
    ///
    /// let id = StateId::new(3);
    /// assert_eq!(id.index(), 3);
    /// assert_eq!(id.to_string(), "#3");
    /// ```
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Position of the state in its registry
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Key of a move pool: the board and the player choosing from it.
///
/// Each non-terminal board owns two independent pools, one per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    pub state: StateId,
    pub player: Player,
}

impl PoolKey {
    pub fn new(state: StateId, player: Player) -> Self {
        Self { state, player }
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.state, self.player)
    }
}
