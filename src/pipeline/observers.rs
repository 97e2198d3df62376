//! Observer adapters for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{fs::File, path::Path};

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    tictactoe::{BoardState, GameStatus, Player, Ply},
};

/// Running tally of game results, shared by the observers below
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    exhausted: usize,
}

impl Tally {
    fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::Won(Player::X) => self.x_wins += 1,
            GameStatus::Won(Player::O) => self.o_wins += 1,
            GameStatus::Drawn => self.draws += 1,
            GameStatus::Exhausted => self.exhausted += 1,
            GameStatus::InProgress => {}
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    tally: Tally,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            tally: Tally::default(),
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, status: GameStatus, _plies: usize) -> Result<()> {
        self.tally.record(status);
        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.tally.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally.message());
        }
        Ok(())
    }
}

/// One row of the per-game CSV log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game: usize,
    /// `x`, `o`, `draw` or `exhausted`
    pub result: String,
    pub plies: usize,
    /// Final board in `encode()` form
    pub final_board: String,
    /// Positions played, in order, separated by spaces
    pub moves: String,
}

fn result_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Won(Player::X) => "x",
        GameStatus::Won(Player::O) => "o",
        GameStatus::Drawn => "draw",
        GameStatus::Exhausted => "exhausted",
        GameStatus::InProgress => "in-progress",
    }
}

/// CSV observer - Writes one row per finished game
pub struct CsvObserver {
    writer: csv::Writer<File>,
    final_board: BoardState,
    moves: Vec<usize>,
    rows: usize,
}

impl CsvObserver {
    /// Create the output file, truncating any existing one
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let writer = csv::Writer::from_path(path)?;
        Ok(Self {
            writer,
            final_board: BoardState::new(),
            moves: Vec::new(),
            rows: 0,
        })
    }

    /// Rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }
}

impl Observer for CsvObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.final_board = BoardState::new();
        self.moves.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        ply: &Ply,
        board: &BoardState,
    ) -> Result<()> {
        self.final_board = *board;
        self.moves.push(ply.position);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, status: GameStatus, plies: usize) -> Result<()> {
        let moves = self
            .moves
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        self.writer.serialize(GameRecord {
            game: game_num + 1,
            result: result_label(status).to_string(),
            plies,
            final_board: self.final_board.encode(),
            moves,
        })?;
        self.rows += 1;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Milestone observer - Logs periodic results and notable first events
///
/// Every `interval` games the results of that window are logged at `info`.
/// The first draw and the first game each side wins are logged once.
pub struct MilestoneObserver {
    interval: usize,
    window: Tally,
    total: Tally,
    first_draw: Option<usize>,
    first_x_win: Option<usize>,
    first_o_win: Option<usize>,
}

impl MilestoneObserver {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
            window: Tally::default(),
            total: Tally::default(),
            first_draw: None,
            first_x_win: None,
            first_o_win: None,
        }
    }

    /// First game (0-based) that ended in a draw
    pub fn first_draw(&self) -> Option<usize> {
        self.first_draw
    }

    pub fn first_win(&self, player: Player) -> Option<usize> {
        match player {
            Player::X => self.first_x_win,
            Player::O => self.first_o_win,
        }
    }

    fn note_first(slot: &mut Option<usize>, game_num: usize, what: &str) {
        if slot.is_none() {
            *slot = Some(game_num);
            info!("first {what} at game {}", game_num + 1);
        }
    }
}

impl Observer for MilestoneObserver {
    fn on_game_end(&mut self, game_num: usize, status: GameStatus, _plies: usize) -> Result<()> {
        self.window.record(status);
        self.total.record(status);

        match status {
            GameStatus::Drawn => Self::note_first(&mut self.first_draw, game_num, "draw"),
            GameStatus::Won(Player::X) => Self::note_first(&mut self.first_x_win, game_num, "X win"),
            GameStatus::Won(Player::O) => Self::note_first(&mut self.first_o_win, game_num, "O win"),
            _ => {}
        }

        if (game_num + 1).is_multiple_of(self.interval) {
            info!(
                "games {}-{}: {} (exhausted {})",
                game_num + 2 - self.interval,
                game_num + 1,
                self.window.message(),
                self.window.exhausted
            );
            self.window = Tally::default();
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        info!("training totals: {}", self.total.message());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::StateId;
    use crate::tictactoe::MoveSource;

    #[test]
    fn milestones_record_first_events_once() {
        let mut observer = MilestoneObserver::new(2);
        observer.on_game_end(0, GameStatus::Won(Player::O), 6).unwrap();
        observer.on_game_end(1, GameStatus::Drawn, 9).unwrap();
        observer.on_game_end(2, GameStatus::Drawn, 9).unwrap();

        assert_eq!(observer.first_draw(), Some(1));
        assert_eq!(observer.first_win(Player::O), Some(0));
        assert_eq!(observer.first_win(Player::X), None);
        assert_eq!(observer.total.draws, 2);
        assert_eq!(observer.window.draws, 1);
    }

    #[test]
    fn csv_observer_writes_a_row_per_game() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.csv");
        let mut observer = CsvObserver::new(&path).unwrap();

        let board = BoardState::from_string("X........").unwrap();
        let ply = Ply {
            before: StateId::new(0),
            after: StateId::new(1),
            player: Player::X,
            position: 0,
            source: MoveSource::Agent,
        };
        for game in 0..2 {
            observer.on_game_start(game).unwrap();
            observer.on_move(game, 0, &ply, &board).unwrap();
            observer.on_game_end(game, GameStatus::Exhausted, 1).unwrap();
        }
        observer.on_training_end().unwrap();
        assert_eq!(observer.rows(), 2);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let records: Vec<GameRecord> = reader.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].game, 2);
        assert_eq!(records[1].result, "exhausted");
        assert_eq!(records[1].final_board, "X........");
        assert_eq!(records[1].moves, "0");
    }
}
