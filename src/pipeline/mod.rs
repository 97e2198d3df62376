//! Self-play training pipeline
//!
//! This module provides:
//! - A training loop that plays a learner against itself
//! - Observer adapters for progress bars, CSV game logs and milestone logging

pub mod observers;
pub mod training;

pub use observers::{CsvObserver, GameRecord, MilestoneObserver, ProgressObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::Observer;
