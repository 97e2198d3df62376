//! Shared helpers for the integration tests.

#![allow(dead_code)]

use noughts::{BoardState, Game, Learner, LearnerConfig, Player, StateId};

/// Learner with a fixed seed and otherwise default configuration
pub fn seeded_learner(seed: u64) -> Learner {
    Learner::new(LearnerConfig::default().with_seed(seed))
}

/// Positions played alternately, X first
pub fn alternating(positions: &[usize]) -> Vec<(Player, usize)> {
    positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let player = if i % 2 == 0 { Player::X } else { Player::O };
            (player, pos)
        })
        .collect()
}

/// Play a directed sequence to the end, returning the final board
pub fn play_directed(game: &mut Game<'_>, moves: &[(Player, usize)]) -> BoardState {
    let mut board = BoardState::new();
    for &(player, pos) in moves {
        board = game.play_at(player, pos).unwrap();
    }
    board
}

/// Register a directed sequence without playing a game
pub fn walk(learner: &mut Learner, moves: &[(Player, usize)]) -> StateId {
    let mut state = learner.root();
    for &(player, pos) in moves {
        state = learner.successor(state, player, pos).unwrap();
    }
    state
}
