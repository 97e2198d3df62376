//! Two-bit packed board encoding
//!
//! Each cell occupies two bits of a `u32`, cell `i` at bits `2i..2i+2`:
//! `00` empty, `01` X, `10` O. The packed value is the registry key for
//! board deduplication.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    board::{BoardState, CELL_COUNT, Cell},
    lines::WINNING_LINES,
};

const CELL_BITS: usize = 2;
const CELL_MASK: u32 = 0b11;
const USED_BITS: u32 = (1u32 << (CELL_BITS * CELL_COUNT)) - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct PackedBoard(u32);

impl PackedBoard {
    pub fn from_cells(cells: &[Cell; CELL_COUNT]) -> Self {
        let bits = cells
            .iter()
            .enumerate()
            .fold(0u32, |acc, (pos, cell)| acc | (cell.code() << (pos * CELL_BITS)));
        Self(bits)
    }

    /// Accept raw bits only if every cell holds a valid code and no bits
    /// above the ninth cell are set.
    pub fn from_bits(bits: u32) -> Option<Self> {
        if bits & !USED_BITS != 0 {
            return None;
        }
        (0..CELL_COUNT)
            .all(|pos| Cell::from_code(Self::code_at(bits, pos)).is_some())
            .then_some(Self(bits))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    fn code_at(bits: u32, pos: usize) -> u32 {
        (bits >> (pos * CELL_BITS)) & CELL_MASK
    }

    /// Mark at `pos` (0-8) by shift and mask
    pub fn cell(self, pos: usize) -> Cell {
        debug_assert!(pos < CELL_COUNT);
        Cell::from_code(Self::code_at(self.0, pos)).unwrap_or(Cell::Empty)
    }

    #[must_use]
    pub fn with_cell(self, pos: usize, cell: Cell) -> Self {
        debug_assert!(pos < CELL_COUNT);
        let shift = pos * CELL_BITS;
        Self((self.0 & !(CELL_MASK << shift)) | (cell.code() << shift))
    }

    /// All three codes of some line equal and non-zero
    pub fn is_win(self) -> bool {
        WINNING_LINES.iter().any(|&[a, b, c]| {
            let code = Self::code_at(self.0, a);
            code != 0 && code == Self::code_at(self.0, b) && code == Self::code_at(self.0, c)
        })
    }

    pub fn is_full(self) -> bool {
        (0..CELL_COUNT).all(|pos| Self::code_at(self.0, pos) != 0)
    }

    pub fn is_draw(self) -> bool {
        !self.is_win() && self.is_full()
    }

    pub fn unpack(self) -> BoardState {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (pos, cell) in cells.iter_mut().enumerate() {
            *cell = self.cell(pos);
        }
        BoardState::from_cells(cells)
    }
}

impl From<BoardState> for PackedBoard {
    fn from(board: BoardState) -> Self {
        board.packed()
    }
}

impl From<PackedBoard> for BoardState {
    fn from(packed: PackedBoard) -> Self {
        packed.unpack()
    }
}

impl fmt::Display for PackedBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#07x}", self.0)
    }
}
