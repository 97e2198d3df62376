//! Pool-based reinforcement learning
//!
//! Every (board, player) pair owns a multiset of successor states. The agent
//! plays by drawing one entry uniformly at random; when the episode ends the
//! drawn successor is returned to its pool two times after a win, once after
//! a draw and not at all after a loss.

pub mod learner;
pub mod pool;
pub mod reinforcement;
pub mod store;

pub use learner::{Learner, LearnerStats, ReplaySummary};
pub use pool::MovePool;
pub use reinforcement::{Outcome, ReinforcementValues};
pub use store::PoolStore;
