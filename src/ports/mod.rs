//! Ports (trait boundaries) for external collaborators.
//!
//! The training pipeline reports through these traits; progress bars, CSV
//! logs and other sinks are adapters implemented in [`crate::pipeline`].

pub mod observer;

pub use observer::Observer;
