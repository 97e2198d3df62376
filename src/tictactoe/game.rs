//! Turn state machine driving play and learning

use log::debug;
use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};
use crate::{Error, Result, identifiers::StateId, learning::Learner};

/// Who chose a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveSource {
    /// Drawn from the learner's pool
    Agent,
    /// Supplied by the caller (human or scripted opponent)
    Directed,
}

/// One ply of game history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ply {
    pub before: StateId,
    pub after: StateId,
    pub player: Player,
    pub position: usize,
    pub source: MoveSource,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
    /// Ended on an exhausted pool: nobody won and the board is not full
    Stalemate,
}

/// Lifecycle state of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Drawn,
    /// The agent's pool ran dry under [`ExhaustionPolicy::Report`].
    /// Replayed as a [`GameOutcome::Stalemate`], so no ply earns copies.
    ///
    /// [`ExhaustionPolicy::Report`]: crate::ExhaustionPolicy::Report
    Exhausted,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    /// Outcome used for reinforcement, `None` while in progress
    pub fn outcome(self) -> Option<GameOutcome> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(GameOutcome::Win(player)),
            GameStatus::Drawn => Some(GameOutcome::Draw),
            GameStatus::Exhausted => Some(GameOutcome::Stalemate),
        }
    }
}

/// A single episode played against a borrowed [`Learner`].
///
/// Moves may come from the learner's pools ([`Game::play`]) or from the
/// caller ([`Game::play_at`]). When the game reaches a terminal state the
/// whole history is replayed into the learner once.
pub struct Game<'a> {
    learner: &'a mut Learner,
    current: StateId,
    states: Vec<StateId>,
    plies: Vec<Ply>,
    status: GameStatus,
}

impl<'a> Game<'a> {
    /// Start a game on the empty board
    pub fn new(learner: &'a mut Learner) -> Self {
        let root = learner.root();
        Game {
            learner,
            current: root,
            states: vec![root],
            plies: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    fn ensure_in_progress(&self) -> Result<()> {
        if self.status.is_over() {
            return Err(Error::GameOver);
        }
        Ok(())
    }

    /// Let the learner choose `player`'s move.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the game has already ended
    /// - [`Error::MoveExhausted`] if the pool is empty under the report
    ///   policy; the game then ends as [`GameStatus::Exhausted`]
    pub fn play(&mut self, player: Player) -> Result<BoardState> {
        self.ensure_in_progress()?;

        let before = self.current;
        let after = match self.learner.select(before, player) {
            Ok(after) => after,
            Err(err @ Error::MoveExhausted { .. }) => {
                debug!("no move available for {player} at {before}; ending game");
                self.status = GameStatus::Exhausted;
                self.finish()?;
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let from = self.learner.state(before)?;
        let to = self.learner.state(after)?;
        let position = from
            .changed_position(&to)
            .ok_or_else(|| Error::InvalidConfiguration {
                message: format!("pool successor {to} of {from} changes no cell"),
            })?;

        self.record(Ply {
            before,
            after,
            player,
            position,
            source: MoveSource::Agent,
        })
    }

    /// Mark `position` for `player` as chosen by the caller.
    ///
    /// A rejected move leaves the game, registry and pools untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::GameOver`] if the game has already ended
    /// - [`Error::InvalidPosition`] if `position` is not in 0-8
    /// - [`Error::CellOccupied`] if the cell is taken
    pub fn play_at(&mut self, player: Player, position: usize) -> Result<BoardState> {
        self.ensure_in_progress()?;

        let before = self.current;
        let after = self.learner.successor(before, player, position)?;

        self.record(Ply {
            before,
            after,
            player,
            position,
            source: MoveSource::Directed,
        })
    }

    fn record(&mut self, ply: Ply) -> Result<BoardState> {
        let board = self.learner.state(ply.after)?;
        self.current = ply.after;
        self.states.push(ply.after);
        self.plies.push(ply);

        if board.is_win() {
            self.status = GameStatus::Won(ply.player);
        } else if board.is_draw() {
            self.status = GameStatus::Drawn;
        }

        if self.status.is_over() {
            self.finish()?;
        }
        Ok(board)
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(outcome) = self.status.outcome() {
            self.learner.train_from_game(&self.plies, outcome)?;
        }
        Ok(())
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Current board
    pub fn current(&self) -> Result<BoardState> {
        self.learner.state(self.current)
    }

    pub fn current_id(&self) -> StateId {
        self.current
    }

    pub fn history(&self) -> &[Ply] {
        &self.plies
    }

    pub fn ply_count(&self) -> usize {
        self.plies.len()
    }

    /// Ids of every board from the start to the current one
    pub fn state_ids(&self) -> &[StateId] {
        &self.states
    }

    /// Every board from the start to the current one
    pub fn states(&self) -> Result<Vec<BoardState>> {
        self.states.iter().map(|&id| self.learner.state(id)).collect()
    }

    /// Player due to move if turns alternate with X opening
    pub fn next_player(&self) -> Player {
        if self.plies.len().is_multiple_of(2) {
            Player::X
        } else {
            Player::O
        }
    }

    pub fn learner(&self) -> &Learner {
        &*self.learner
    }
}
