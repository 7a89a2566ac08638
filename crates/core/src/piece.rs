//! Piece module - tetromino shapes and the active piece
//!
//! Shapes are mino offsets inside a 4x4 box, one table per rotation.
//! A [`Piece`] is a plain value: `rotate` and `translate` return a proposed
//! piece and never look at the board. The engine decides whether to keep it.

use crate::types::{PieceKind, RotateDirection, Rotation, ROTATION_KICKS, SPAWN_POSITION};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    match kind {
        PieceKind::I => match rotation {
            Rotation::North => [(0, 1), (1, 1), (2, 1), (3, 1)],
            Rotation::East => [(2, 0), (2, 1), (2, 2), (2, 3)],
            Rotation::South => [(0, 2), (1, 2), (2, 2), (3, 2)],
            Rotation::West => [(1, 0), (1, 1), (1, 2), (1, 3)],
        },
        PieceKind::O => [(1, 0), (2, 0), (1, 1), (2, 1)],
        PieceKind::T => match rotation {
            Rotation::North => [(1, 0), (0, 1), (1, 1), (2, 1)],
            Rotation::East => [(1, 0), (1, 1), (2, 1), (1, 2)],
            Rotation::South => [(0, 1), (1, 1), (2, 1), (1, 2)],
            Rotation::West => [(1, 0), (0, 1), (1, 1), (1, 2)],
        },
        PieceKind::S => match rotation {
            Rotation::North => [(1, 0), (2, 0), (0, 1), (1, 1)],
            Rotation::East => [(1, 0), (1, 1), (2, 1), (2, 2)],
            Rotation::South => [(1, 1), (2, 1), (0, 2), (1, 2)],
            Rotation::West => [(0, 0), (0, 1), (1, 1), (1, 2)],
        },
        PieceKind::Z => match rotation {
            Rotation::North => [(0, 0), (1, 0), (1, 1), (2, 1)],
            Rotation::East => [(2, 0), (1, 1), (2, 1), (1, 2)],
            Rotation::South => [(0, 1), (1, 1), (1, 2), (2, 2)],
            Rotation::West => [(1, 0), (0, 1), (1, 1), (0, 2)],
        },
        PieceKind::J => match rotation {
            Rotation::North => [(0, 0), (0, 1), (1, 1), (2, 1)],
            Rotation::East => [(1, 0), (2, 0), (1, 1), (1, 2)],
            Rotation::South => [(0, 1), (1, 1), (2, 1), (2, 2)],
            Rotation::West => [(1, 0), (1, 1), (0, 2), (1, 2)],
        },
        PieceKind::L => match rotation {
            Rotation::North => [(2, 0), (0, 1), (1, 1), (2, 1)],
            Rotation::East => [(1, 0), (1, 1), (1, 2), (2, 2)],
            Rotation::South => [(0, 1), (1, 1), (2, 1), (0, 2)],
            Rotation::West => [(0, 0), (1, 0), (1, 1), (1, 2)],
        },
    }
}

/// What the engine does when a rotated piece does not fit in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KickPolicy {
    /// Try the horizontal offsets in [`ROTATION_KICKS`] and keep the first fit.
    #[default]
    Shift,
    /// Reject the rotation outright.
    None,
}

impl KickPolicy {
    /// Horizontal offsets to try, in order.
    pub fn offsets(&self) -> &'static [i8] {
        match self {
            KickPolicy::Shift => &ROTATION_KICKS,
            KickPolicy::None => &ROTATION_KICKS[..1],
        }
    }
}

/// The active falling tetromino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
}

impl Piece {
    pub fn new(kind: PieceKind, rotation: Rotation, col: i8, row: i8) -> Self {
        Self {
            kind,
            rotation,
            col,
            row,
        }
    }

    /// Create a piece at the spawn position in its North rotation
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, Rotation::North, SPAWN_POSITION.0, SPAWN_POSITION.1)
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute (col, row) cells occupied at the current rotation/position.
    ///
    /// The iterator is lazy and `Clone`, so it can be restarted freely.
    pub fn cells(&self) -> PieceCells {
        PieceCells {
            shape: self.shape(),
            col: self.col,
            row: self.row,
            next: 0,
        }
    }

    /// The same piece rotated one step; placement is not validated.
    #[must_use]
    pub fn rotate(&self, direction: RotateDirection) -> Self {
        Self {
            rotation: self.rotation.rotate(direction),
            ..*self
        }
    }

    /// The same piece moved by (dcol, drow); placement is not validated.
    #[must_use]
    pub fn translate(&self, dcol: i8, drow: i8) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
            ..*self
        }
    }
}

/// Iterator over the four absolute cells of a [`Piece`].
#[derive(Debug, Clone)]
pub struct PieceCells {
    shape: PieceShape,
    col: i8,
    row: i8,
    next: usize,
}

impl Iterator for PieceCells {
    type Item = (i8, i8);

    fn next(&mut self) -> Option<Self::Item> {
        let &(dc, dr) = self.shape.get(self.next)?;
        self.next += 1;
        Some((self.col + dc, self.row + dr))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.shape.len() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for PieceCells {}
