//! Outcome-based reinforcement values

use serde::{Deserialize, Serialize};

use crate::tictactoe::{GameOutcome, Player};

/// Result of an episode seen from one player's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Outcome of `outcome` for `player`
    pub fn for_player(outcome: GameOutcome, player: Player) -> Self {
        match outcome {
            GameOutcome::Win(winner) if winner == player => Outcome::Win,
            GameOutcome::Win(_) => Outcome::Loss,
            GameOutcome::Draw => Outcome::Draw,
            GameOutcome::Stalemate => Outcome::Loss,
        }
    }
}

/// Number of copies of a played successor returned to its pool per outcome.
///
/// The successor was removed from the pool when it was drawn, so returning
/// zero copies after a loss leaves it one copy lighter than its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinforcementValues {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

impl ReinforcementValues {
    pub fn copies(&self, outcome: Outcome) -> usize {
        let copies = match outcome {
            Outcome::Win => self.win,
            Outcome::Draw => self.draw,
            Outcome::Loss => self.loss,
        };
        copies as usize
    }
}

impl Default for ReinforcementValues {
    fn default() -> Self {
        ReinforcementValues {
            win: 2,
            draw: 1,
            loss: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_is_relative_to_player() {
        let x_wins = GameOutcome::Win(Player::X);
        assert_eq!(Outcome::for_player(x_wins, Player::X), Outcome::Win);
        assert_eq!(Outcome::for_player(x_wins, Player::O), Outcome::Loss);
        assert_eq!(
            Outcome::for_player(GameOutcome::Draw, Player::O),
            Outcome::Draw
        );
        assert_eq!(
            Outcome::for_player(GameOutcome::Stalemate, Player::X),
            Outcome::Loss
        );
        assert_eq!(
            Outcome::for_player(GameOutcome::Stalemate, Player::O),
            Outcome::Loss
        );
    }

    #[test]
    fn default_copies_are_two_one_zero() {
        let values = ReinforcementValues::default();
        assert_eq!(values.copies(Outcome::Win), 2);
        assert_eq!(values.copies(Outcome::Draw), 1);
        assert_eq!(values.copies(Outcome::Loss), 0);
    }
}
