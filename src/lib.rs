//! Self-learning noughts and crosses
//!
//! This crate provides:
//! - Immutable board states with signed and packed (2-bit) encodings
//! - A state registry that deduplicates structurally equal boards
//! - Per-(board, player) move pools reinforced by game outcomes
//! - A turn state machine that replays each finished game into the pools
//! - A self-play training pipeline with pluggable observers
//! - A command-line driver for training and human play

pub mod cli;
pub mod config;
pub mod error;
pub mod identifiers;
pub mod learning;
pub mod pipeline;
pub mod ports;
pub mod registry;
pub mod tictactoe;

pub use config::{ExhaustionPolicy, LearnerConfig};
pub use error::{Error, Result};
pub use identifiers::{PoolKey, StateId};
pub use learning::{Learner, MovePool, Outcome, ReinforcementValues};
pub use registry::StateRegistry;
pub use tictactoe::{BoardState, Cell, Game, GameOutcome, GameStatus, Player};
