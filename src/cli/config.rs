//! Learner options shared by CLI commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::{ExhaustionPolicy, LearnerConfig};

/// Learner configuration flags. Flags override values read from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct LearnerArgs {
    /// JSON learner configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Behaviour on an empty pool (`refill` or `report`)
    #[arg(long)]
    pub exhaustion: Option<ExhaustionPolicy>,

    /// Reinforce only agent-chosen moves
    #[arg(long)]
    pub agent_only: bool,

    /// Give every move path its own pools instead of sharing by layout
    #[arg(long)]
    pub no_dedup: bool,
}

impl LearnerArgs {
    /// Build the learner configuration: file (or defaults), then flags.
    pub fn resolve(&self) -> Result<LearnerConfig> {
        let mut config = match &self.config {
            Some(path) => LearnerConfig::load(path)
                .with_context(|| format!("loading learner config {}", path.display()))?,
            None => LearnerConfig::default(),
        };

        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(exhaustion) = self.exhaustion {
            config = config.with_exhaustion(exhaustion);
        }
        if self.agent_only {
            config = config.with_reinforce_both_players(false);
        }
        if self.no_dedup {
            config = config.with_deduplicate(false);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learner.json");
        LearnerConfig::default()
            .with_seed(1)
            .with_exhaustion(ExhaustionPolicy::Report)
            .save(&path)
            .unwrap();

        let args = LearnerArgs {
            config: Some(path),
            seed: Some(99),
            no_dedup: true,
            ..LearnerArgs::default()
        };
        let config = args.resolve().unwrap();

        assert_eq!(config.seed, Some(99));
        assert_eq!(config.exhaustion, ExhaustionPolicy::Report);
        assert!(!config.deduplicate);
        assert!(config.reinforce_both_players);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = LearnerArgs {
            config: Some(PathBuf::from("/nonexistent/learner.json")),
            ..LearnerArgs::default()
        };
        assert!(args.resolve().is_err());
    }
}
