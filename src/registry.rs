//! Registry of board states.
//!
//! The registry hands out a stable [`StateId`] for every board the learner
//! meets, so pools can refer to successors by identity instead of sharing
//! board values or lists. In deduplicating mode structurally equal boards
//! share one id, and therefore one pair of pools, regardless of the move
//! order that produced them. Otherwise every (parent, player, position) edge
//! gets its own id and each path through the game tree learns independently.

use std::collections::HashMap;

use log::trace;

use crate::{
    Error, Result,
    identifiers::StateId,
    tictactoe::{BoardState, PackedBoard, Player},
};

#[derive(Debug, Clone)]
pub struct StateRegistry {
    deduplicate: bool,
    states: Vec<BoardState>,
    /// First id registered for each layout
    by_layout: HashMap<PackedBoard, StateId>,
    /// Tree edges; only populated when deduplication is off
    edges: HashMap<(StateId, Player, usize), StateId>,
}

impl StateRegistry {
    /// Create a registry holding only the empty starting board.
    pub fn new(deduplicate: bool) -> Self {
        let mut registry = Self {
            deduplicate,
            states: Vec::new(),
            by_layout: HashMap::new(),
            edges: HashMap::new(),
        };
        registry.push(BoardState::new());
        registry
    }

    /// Id of the empty starting board
    pub fn root(&self) -> StateId {
        StateId::new(0)
    }

    pub fn is_deduplicating(&self) -> bool {
        self.deduplicate
    }

    /// Number of registered states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always false: the starting board is registered on construction.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Look up the board behind an id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownState`] if the id was not issued by this registry.
    pub fn state(&self, id: StateId) -> Result<BoardState> {
        self.states
            .get(id.index())
            .copied()
            .ok_or(Error::UnknownState { id: id.raw() })
    }

    /// Id first registered for a layout, if any.
    pub fn lookup(&self, board: &BoardState) -> Option<StateId> {
        self.by_layout.get(&board.packed()).copied()
    }

    /// Id of the board reached when `player` marks `position` from `parent`.
    ///
    /// The move is validated against the parent board first; nothing is
    /// registered when it is rejected.
    ///
    /// # Errors
    ///
    /// Propagates [`Error::InvalidPosition`] and [`Error::CellOccupied`] from
    /// [`BoardState::place`], and [`Error::UnknownState`] for a foreign parent.
    pub fn successor(&mut self, parent: StateId, player: Player, position: usize) -> Result<StateId> {
        let board = self.state(parent)?.place(player, position)?;

        if self.deduplicate {
            return Ok(self.intern(board));
        }

        let edge = (parent, player, position);
        if let Some(&id) = self.edges.get(&edge) {
            return Ok(id);
        }
        let id = self.push(board);
        self.edges.insert(edge, id);
        Ok(id)
    }

    /// Register a board by layout, reusing the existing id when present.
    fn intern(&mut self, board: BoardState) -> StateId {
        match self.by_layout.get(&board.packed()) {
            Some(&id) => id,
            None => self.push(board),
        }
    }

    fn push(&mut self, board: BoardState) -> StateId {
        let id = StateId::new(self.states.len() as u32);
        self.states.push(board);
        self.by_layout.entry(board.packed()).or_insert(id);
        trace!("registered state {id} = {board}");
        id
    }
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicates_transpositions() {
        let mut registry = StateRegistry::new(true);
        let root = registry.root();

        // X0 O4 X8 and X8 O4 X0 reach the same layout
        let a = registry.successor(root, Player::X, 0).unwrap();
        let a = registry.successor(a, Player::O, 4).unwrap();
        let a = registry.successor(a, Player::X, 8).unwrap();

        let b = registry.successor(root, Player::X, 8).unwrap();
        let b = registry.successor(b, Player::O, 4).unwrap();
        let b = registry.successor(b, Player::X, 0).unwrap();

        assert_eq!(a, b);
        assert_eq!(registry.state(a).unwrap().encode(), "X...O...X");
    }

    #[test]
    fn tree_mode_keeps_paths_apart_but_reuses_edges() {
        let mut registry = StateRegistry::new(false);
        assert!(!registry.is_deduplicating());
        let root = registry.root();

        let x0 = registry.successor(root, Player::X, 0).unwrap();
        let x8 = registry.successor(root, Player::X, 8).unwrap();
        let a = registry.successor(x0, Player::X, 8).unwrap();
        let b = registry.successor(x8, Player::X, 0).unwrap();

        assert_ne!(a, b);
        assert_eq!(registry.state(a).unwrap(), registry.state(b).unwrap());
        assert_eq!(registry.successor(x0, Player::X, 8).unwrap(), a);
        assert_eq!(registry.lookup(&registry.state(b).unwrap()), Some(a));
    }

    #[test]
    fn rejected_move_registers_nothing() {
        let mut registry = StateRegistry::new(true);
        let root = registry.root();
        let x0 = registry.successor(root, Player::X, 0).unwrap();
        let before = registry.len();

        assert!(matches!(
            registry.successor(x0, Player::O, 0),
            Err(Error::CellOccupied { position: 0 })
        ));
        assert!(matches!(
            registry.successor(x0, Player::O, 12),
            Err(Error::InvalidPosition { position: 12 })
        ));
        assert_eq!(registry.len(), before);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let registry = StateRegistry::default();
        assert!(matches!(
            registry.state(StateId::new(99)),
            Err(Error::UnknownState { id: 99 })
        ));
    }
}
