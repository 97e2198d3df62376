//! Configuration types for learner creation.

use std::{fmt, fs::File, io::BufReader, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::learning::ReinforcementValues;

/// What happens when the agent draws from an empty pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ExhaustionPolicy {
    /// Rebuild the pool from the legal moves (one copy each) and draw again.
    /// Reinforcement accumulated for that pool is discarded.
    #[default]
    Refill,
    /// Fail with [`crate::Error::MoveExhausted`]; the game ends in a stalemate.
    Report,
}

impl fmt::Display for ExhaustionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExhaustionPolicy::Refill => "refill",
            ExhaustionPolicy::Report => "report",
        };
        f.write_str(label)
    }
}

impl FromStr for ExhaustionPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refill" | "reset" => Ok(ExhaustionPolicy::Refill),
            "report" | "stalemate" => Ok(ExhaustionPolicy::Report),
            _ => Err(crate::Error::ParseExhaustionPolicy {
                input: s.to_string(),
                expected: "refill, report".to_string(),
            }),
        }
    }
}

/// Configuration for a [`Learner`](crate::learning::Learner).
///
/// # Examples
///
/// ```
/// use noughts::{ExhaustionPolicy, LearnerConfig};
///
/// let config = LearnerConfig::default()
///     .with_seed(42)
///     .with_exhaustion(ExhaustionPolicy::Report)
///     .with_reinforce_both_players(false);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Behaviour on an empty pool
    pub exhaustion: ExhaustionPolicy,
    /// Reinforce every ply at the end of a game, not just agent-chosen ones
    pub reinforce_both_players: bool,
    /// Share one pool pair between structurally equal boards
    pub deduplicate: bool,
    /// Copies returned to a pool per outcome
    pub reinforcement: ReinforcementValues,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            exhaustion: ExhaustionPolicy::default(),
            reinforce_both_players: true,
            deduplicate: true,
            reinforcement: ReinforcementValues::default(),
            seed: None,
        }
    }
}

impl LearnerConfig {
    pub fn with_exhaustion(mut self, exhaustion: ExhaustionPolicy) -> Self {
        self.exhaustion = exhaustion;
        self
    }

    pub fn with_reinforce_both_players(mut self, both: bool) -> Self {
        self.reinforce_both_players = both;
        self
    }

    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    pub fn with_reinforcement(mut self, values: ReinforcementValues) -> Self {
        self.reinforcement = values;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| crate::Error::Io {
            operation: format!("open config file '{}'", path.display()),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}
