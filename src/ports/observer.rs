//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing self-play training,
//! allowing composable data collection without coupling the training loop
//! to specific output formats.

use crate::{
    Result,
    tictactoe::{BoardState, GameStatus, Ply},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - For each accepted move
///    - `on_game_end(game_num, status, plies)` - After reinforcement replay
/// 3. `on_training_end()` - Once at the end
///
/// Every method defaults to doing nothing.
///
/// # Examples
///
/// ```no_run
/// use noughts::{GameStatus, ports::Observer};
///
/// struct DrawCounter {
///     draws: usize,
/// }
///
/// impl Observer for DrawCounter {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         status: GameStatus,
///         _plies: usize,
///     ) -> noughts::Result<()> {
///         if status == GameStatus::Drawn {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts with the number of games to be played.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts. `game_num` is 0-based.
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each accepted move with the resulting board.
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _ply: &Ply,
        _board: &BoardState,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once a game is over and its history has been replayed.
    fn on_game_end(&mut self, _game_num: usize, _status: GameStatus, _plies: usize) -> Result<()> {
        Ok(())
    }

    /// Called when training completes. Use this to flush outputs.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
