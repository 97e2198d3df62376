//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{lines::LineAnalyzer, packed::PackedBoard};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// Signed value of the mark: X = +1, O = -1, Empty = 0.
    ///
    /// Three cells of a line sum to +3 or -3 exactly when the line is owned
    /// by a single player.
    pub fn value(self) -> i8 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => -1,
        }
    }

    /// Two-bit code of the mark as stored in a [`PackedBoard`].
    pub fn code(self) -> u32 {
        match self {
            Cell::Empty => 0b00,
            Cell::X => 0b01,
            Cell::O => 0b10,
        }
    }

    /// Inverse of [`Cell::code`]. `0b11` is not a valid mark.
    pub fn from_code(code: u32) -> Option<Cell> {
        match code {
            0b00 => Some(Cell::Empty),
            0b01 => Some(Cell::X),
            0b10 => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this mark, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::X => "X",
            Player::O => "O",
        })
    }
}

impl FromStr for Player {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Player::X),
            "o" => Ok(Player::O),
            _ => Err(crate::Error::ParsePlayer {
                input: s.to_string(),
            }),
        }
    }
}

/// Immutable snapshot of the nine cells, indexed 0-8 in row-major order.
///
/// Every transition returns a new value; the cells of an existing state are
/// never modified. Equality and hashing are structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoardState {
    cells: [Cell; CELL_COUNT],
}

impl BoardState {
    /// Create the empty starting board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Build a board from raw cells.
    ///
    /// No reachability check is made; a board's history is defined by the
    /// moves that produced it, not by its layout.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Parse a board from a string of nine cell characters.
    ///
    /// Whitespace is ignored, so `"XO. ... ..."` and `"XO......."` are
    /// equivalent. Empty cells may be written as `.` or `_`.
    ///
    /// # Errors
    ///
    /// Returns error if the board does not have exactly nine cells or any
    /// character is not a valid cell representation.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != CELL_COUNT {
            return Err(crate::Error::InvalidBoardLength {
                expected: CELL_COUNT,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Self { cells })
    }

    /// Borrow the nine cells
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// The nine marks in index order, for display by a driver.
    pub fn render(&self) -> [Cell; CELL_COUNT] {
        self.cells
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Check if a position is empty. Out-of-range positions are never empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    /// Get all empty positions in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Place `player`'s mark at `position` and return the resulting board.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidPosition`] if `position` is not in 0-8
    /// - [`crate::Error::CellOccupied`] if the target cell already holds a mark
    #[must_use = "place returns a new board state; the original is unchanged"]
    pub fn place(&self, player: Player, position: usize) -> Result<BoardState, crate::Error> {
        match self.get(position) {
            None => Err(crate::Error::InvalidPosition { position }),
            Some(Cell::Empty) => {
                let mut next = *self;
                next.cells[position] = player.to_cell();
                Ok(next)
            }
            Some(_) => Err(crate::Error::CellOccupied { position }),
        }
    }

    /// Positions a player may mark, in ascending order. Empty for terminal boards.
    pub fn legal_positions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.empty_positions()
    }

    /// Every successor reachable by `player` marking one empty cell.
    ///
    /// Successors are produced in ascending position order, aligned with
    /// [`BoardState::legal_positions`]. Terminal boards have no successors.
    pub fn legal_moves(&self, player: Player) -> Vec<BoardState> {
        let mark = player.to_cell();
        self.legal_positions()
            .into_iter()
            .map(|pos| {
                let mut next = *self;
                next.cells[pos] = mark;
                next
            })
            .collect()
    }

    /// True iff some line holds three equal, non-empty marks
    pub fn is_win(&self) -> bool {
        LineAnalyzer::winning_line(&self.cells).is_some()
    }

    /// True iff every cell is marked and no line is won.
    ///
    /// The win test runs first: a full board with a completed line is a win.
    pub fn is_draw(&self) -> bool {
        if self.is_win() {
            return false;
        }
        let filled: i32 = self.cells.iter().map(|c| i32::from(c.value().abs())).sum();
        filled == CELL_COUNT as i32
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.is_win() || self.is_draw()
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells)
    }

    /// Find the first position where two boards differ
    pub fn changed_position(&self, other: &BoardState) -> Option<usize> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .position(|(a, b)| a != b)
    }

    /// Canonical nine-character encoding, e.g. `"X.O......"`.
    pub fn encode(&self) -> String {
        self.cells.iter().map(|&c| c.to_char()).collect()
    }

    /// Two-bit packed encoding of this board
    pub fn packed(&self) -> PackedBoard {
        PackedBoard::from_cells(&self.cells)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
