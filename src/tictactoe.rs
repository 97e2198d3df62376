//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;
pub mod packed;

pub use board::{BoardState, CELL_COUNT, Cell, Player};
pub use game::{Game, GameOutcome, GameStatus, MoveSource, Ply};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use packed::PackedBoard;
