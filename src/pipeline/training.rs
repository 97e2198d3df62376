//! Self-play training pipeline

use std::{fs::File, path::Path};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    learning::Learner,
    ports::Observer,
    tictactoe::{Game, GameStatus, Player},
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of self-play games
    pub num_games: usize,

    /// Which player opens each game
    pub first_player: Player,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 15,
            first_player: Player::X,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    /// Games ended by an empty pool under the report policy
    pub exhausted: usize,
    pub total_plies: usize,
}

impl TrainingResult {
    fn record(&mut self, status: GameStatus, plies: usize) {
        self.total_games += 1;
        self.total_plies += plies;
        match status {
            GameStatus::Won(Player::X) => self.x_wins += 1,
            GameStatus::Won(Player::O) => self.o_wins += 1,
            GameStatus::Drawn => self.draws += 1,
            GameStatus::Exhausted => self.exhausted += 1,
            GameStatus::InProgress => {}
        }
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_games > 0 {
            count as f64 / self.total_games as f64
        } else {
            0.0
        }
    }

    pub fn x_win_rate(&self) -> f64 {
        self.rate(self.x_wins)
    }

    pub fn o_win_rate(&self) -> f64 {
        self.rate(self.o_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Mean game length in plies
    pub fn mean_length(&self) -> f64 {
        self.rate(self.total_plies)
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Plays the learner against itself, alternating agent moves for both sides.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run the configured number of self-play games.
    pub fn run(&mut self, learner: &mut Learner) -> Result<TrainingResult> {
        let total = self.config.num_games;
        for observer in &mut self.observers {
            observer.on_training_start(total)?;
        }

        let mut result = TrainingResult::default();
        for game_num in 0..total {
            let status = self.play_game(learner, game_num, &mut result)?;
            if (game_num + 1).is_multiple_of(1000) {
                info!(
                    "{} games: X {:.1}% O {:.1}% draw {:.1}%",
                    game_num + 1,
                    100.0 * result.x_win_rate(),
                    100.0 * result.o_win_rate(),
                    100.0 * result.draw_rate()
                );
            }
            debug_assert!(status.is_over());
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }
        info!(
            "training finished: {} games, {} states, {} pools",
            result.total_games,
            learner.registry().len(),
            learner.store().pool_count()
        );
        Ok(result)
    }

    fn play_game(
        &mut self,
        learner: &mut Learner,
        game_num: usize,
        result: &mut TrainingResult,
    ) -> Result<GameStatus> {
        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        let mut game = Game::new(learner);
        let mut player = self.config.first_player;
        while !game.is_game_over() {
            match game.play(player) {
                Ok(board) => {
                    let step = game.ply_count() - 1;
                    let ply = game.history()[step];
                    for observer in &mut self.observers {
                        observer.on_move(game_num, step, &ply, &board)?;
                    }
                }
                // The game has already been closed out as exhausted
                Err(Error::MoveExhausted { .. }) => break,
                Err(err) => return Err(err),
            }
            player = player.opponent();
        }

        let status = game.status();
        let plies = game.ply_count();
        result.record(status, plies);
        for observer in &mut self.observers {
            observer.on_game_end(game_num, status, plies)?;
        }
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{ExhaustionPolicy, LearnerConfig};

    #[derive(Default)]
    struct Counts {
        starts: usize,
        moves: usize,
        ends: usize,
        finished: bool,
    }

    struct Recorder(Arc<Mutex<Counts>>);

    impl Observer for Recorder {
        fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
            self.0.lock().unwrap().starts += 1;
            Ok(())
        }

        fn on_move(
            &mut self,
            _game_num: usize,
            _step_num: usize,
            _ply: &crate::tictactoe::Ply,
            _board: &crate::BoardState,
        ) -> Result<()> {
            self.0.lock().unwrap().moves += 1;
            Ok(())
        }

        fn on_game_end(&mut self, _game_num: usize, status: GameStatus, _plies: usize) -> Result<()> {
            assert!(status.is_over());
            self.0.lock().unwrap().ends += 1;
            Ok(())
        }

        fn on_training_end(&mut self) -> Result<()> {
            self.0.lock().unwrap().finished = true;
            Ok(())
        }
    }

    #[test]
    fn results_account_for_every_game() {
        let mut learner = Learner::with_seed(17);
        let counts = Arc::new(Mutex::new(Counts::default()));
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            num_games: 200,
            first_player: Player::X,
        })
        .with_observer(Box::new(Recorder(Arc::clone(&counts))));

        let result = pipeline.run(&mut learner).unwrap();

        assert_eq!(result.total_games, 200);
        assert_eq!(
            result.x_wins + result.o_wins + result.draws + result.exhausted,
            200
        );
        assert_eq!(result.exhausted, 0);
        assert!((5.0..=9.0).contains(&result.mean_length()));
        assert_eq!(learner.episodes(), 200);

        let counts = counts.lock().unwrap();
        assert_eq!(counts.starts, 200);
        assert_eq!(counts.ends, 200);
        assert_eq!(counts.moves, result.total_plies);
        assert!(counts.finished);
    }

    #[test]
    fn report_policy_games_still_terminate() {
        let mut learner = Learner::new(
            LearnerConfig::default()
                .with_seed(23)
                .with_exhaustion(ExhaustionPolicy::Report),
        );
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            num_games: 300,
            first_player: Player::X,
        });

        let result = pipeline.run(&mut learner).unwrap();
        assert_eq!(
            result.x_wins + result.o_wins + result.draws + result.exhausted,
            300
        );
    }

    #[test]
    fn result_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        let result = TrainingResult {
            total_games: 3,
            x_wins: 1,
            o_wins: 1,
            draws: 1,
            exhausted: 0,
            total_plies: 21,
        };

        result.save(&path).unwrap();
        assert_eq!(TrainingResult::load(&path).unwrap(), result);
        assert!((result.mean_length() - 7.0).abs() < 1e-12);
    }
}
