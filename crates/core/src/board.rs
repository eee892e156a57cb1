//! Board module - manages the game grid
//!
//! The board is a 10x22 grid. Occupancy and color live in two parallel flat
//! arrays (row-major, `y * WIDTH + x`) so the occupancy query never has to
//! look at colors. Rows 0 and 1 are the hidden spawn buffer.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..21 (top to bottom).

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, ColorId, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Result of a line-clear pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineClear {
    /// Row indices that were full, in the order they were removed (bottom first).
    /// An index can repeat when stacked rows collapse into the same slot.
    pub rows: ArrayVec<u8, { BOARD_HEIGHT as usize }>,
    /// The hidden spawn rows held a block when the pass started
    pub topped_out: bool,
}

impl LineClear {
    pub fn count(&self) -> u32 {
        self.rows.len() as u32
    }
}

/// The game board - 10 columns x 22 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    occupied: [bool; BOARD_SIZE],
    colors: [ColorId; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            occupied: [false; BOARD_SIZE],
            colors: [0; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_some()
    }

    /// True iff the cell is inside the grid and holds a block
    pub fn occupied(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_some_and(|idx| self.occupied[idx])
    }

    /// Color of a locked cell, `None` if empty or out of bounds
    pub fn color(&self, x: i8, y: i8) -> Cell {
        let idx = Self::index(x, y)?;
        self.occupied[idx].then_some(self.colors[idx])
    }

    /// True iff the cell is inside the grid and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_some_and(|idx| !self.occupied[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.occupied[idx] = cell.is_some();
                self.colors[idx] = cell.unwrap_or(0);
                true
            }
            None => false,
        }
    }

    /// Write a piece's four cells into the grid.
    ///
    /// If any cell falls outside the grid nothing is written and `false` is
    /// returned. Occupied cells are not re-checked here; callers only lock a
    /// piece they have already moved under collision checks.
    pub fn lock(&mut self, piece: &Piece) -> bool {
        let blocks = piece.blocks();
        if !blocks.iter().all(|&(x, y)| self.in_bounds(x, y)) {
            return false;
        }

        for (x, y) in blocks {
            self.set(x, y, Some(piece.color));
        }
        true
    }

    /// True if any block sits in the hidden spawn rows
    pub fn spawn_zone_occupied(&self) -> bool {
        let end = (HIDDEN_ROWS as usize) * (BOARD_WIDTH as usize);
        self.occupied[..end].iter().any(|&o| o)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.occupied[start..end].iter().all(|&o| o)
    }

    /// Remove row `y`: every row above moves down by one, the top row empties
    fn collapse_row(&mut self, y: usize) {
        let width = BOARD_WIDTH as usize;
        let end = y * width;

        // copy_within handles the overlapping ranges
        self.occupied.copy_within(0..end, width);
        self.colors.copy_within(0..end, width);

        self.occupied[..width].fill(false);
        self.colors[..width].fill(0);
    }

    /// Clear every full row of the visible playfield.
    ///
    /// Scans from the bottom row up to, but not including, the hidden rows.
    /// After a collapse the same index is examined again, so stacked full
    /// rows cascade. Whether the hidden rows were occupied is sampled before
    /// scanning and reported as `topped_out`; clearing still proceeds.
    pub fn clear_full_rows(&mut self) -> LineClear {
        let mut result = LineClear {
            rows: ArrayVec::new(),
            topped_out: self.spawn_zone_occupied(),
        };

        let top = HIDDEN_ROWS as usize;
        let mut y = BOARD_HEIGHT as usize - 1;
        while y >= top {
            if self.is_row_full(y) {
                self.collapse_row(y);
                result.rows.push(y as u8);
                continue;
            }
            y -= 1;
        }

        result
    }

    /// Copy the grid into a row-major 2D array (used by snapshots and saves)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.color(x as i8, y as i8);
            }
        }
    }

    /// Build a board from row-major cells
    pub fn from_grid(grid: &[[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                board.set(x as i8, y as i8, *cell);
            }
        }
        board
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.occupied.fill(false);
        self.colors.fill(0);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
