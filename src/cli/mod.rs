//! CLI infrastructure for the noughts binary
//!
//! This module provides the command-line interface for self-play training
//! and for playing against a trained learner.

pub mod commands;
pub mod config;
pub mod output;
