//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (col, row) where col ranges 0..9 (left to right), row ranges 0..19 (top to bottom)

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::piece::Piece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const HEIGHT: usize = BOARD_HEIGHT as usize;
const WIDTH: usize = BOARD_WIDTH as usize;

/// Row indices removed by a single [`Board::clear_full_rows`] call (bottom to top).
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// Why a piece could not be written into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("cell ({col}, {row}) is outside the board")]
    OutOfBounds { col: i8, row: i8 },
    #[error("cell ({col}, {row}) is already filled")]
    Occupied { col: i8, row: i8 },
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at position (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, col: i8, row: i8) -> bool {
        Self::index(col, row).is_none()
    }

    /// Whether every cell of `piece` is in bounds and empty.
    pub fn fits(&self, piece: &Piece) -> bool {
        piece.cells().all(|(col, row)| self.is_valid(col, row))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Write the piece's cells into the grid as filled.
    ///
    /// Every target cell is checked first; on error the board is unchanged.
    pub fn commit(&mut self, piece: &Piece) -> Result<(), CommitError> {
        for (col, row) in piece.cells() {
            match self.get(col, row) {
                None => return Err(CommitError::OutOfBounds { col, row }),
                Some(Some(_)) => return Err(CommitError::Occupied { col, row }),
                Some(None) => {}
            }
        }

        for (col, row) in piece.cells() {
            self.set(col, row, Some(piece.kind));
        }
        Ok(())
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Scans bottom to top with a write cursor: kept rows are copied down onto the
    /// write cursor, so each kept row moves down by the number of full rows below it.
    /// The vacated rows at the top are blanked.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_row = HEIGHT;

        for read_row in (0..HEIGHT).rev() {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * WIDTH;
                    self.cells.copy_within(src..src + WIDTH, write_row * WIDTH);
                }
            }
        }

        for cell in &mut self.cells[..write_row * WIDTH] {
            *cell = None;
        }

        cleared_rows
    }

    /// Export the grid as color ids (0 = empty) for render snapshots.
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (row, out_row) in out.iter_mut().enumerate() {
            let start = row * WIDTH;
            for (col, slot) in out_row.iter_mut().enumerate() {
                *slot = self.cells[start + col].map_or(0, |kind| kind.color_id());
            }
        }
    }

    /// Number of filled cells on the board.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a whole row with `kind`, leaving the listed columns empty.
    ///
    /// Handy for building fixtures and replays.
    pub fn fill_row_except(&mut self, row: i8, kind: PieceKind, holes: &[i8]) {
        for col in 0..BOARD_WIDTH as i8 {
            let cell = if holes.contains(&col) { None } else { Some(kind) };
            self.set(col, row, cell);
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), HEIGHT);
        assert!(cells_2d.iter().all(|row| row.len() == WIDTH));

        let mut flat = [None; BOARD_SIZE];
        for (row, line) in cells_2d.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                flat[row * WIDTH + col] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(WIDTH).map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
