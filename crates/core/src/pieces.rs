//! Pieces module - shape matrices and the seven-piece catalog
//!
//! A [`Shape`] is a small boolean matrix (at most 4x4) of occupied sub-cells relative to
//! an anchor at its top-left corner. Catalog shapes are square, so every kind can be
//! rotated; rectangular shapes are supported but never rotate.

use crate::types::{PieceKind, SPAWN_COL, SPAWN_ROW};

/// Largest supported shape dimension
pub const MAX_SHAPE_DIM: usize = 4;

/// Occupancy matrix of a piece in one orientation.
///
/// Stored inline so shapes are `Copy` and never allocate.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from a 0/1 matrix.
    ///
    /// Panics if either dimension is zero or larger than [`MAX_SHAPE_DIM`].
    pub fn from_bits<const R: usize, const C: usize>(bits: [[u8; C]; R]) -> Self {
        assert!(
            (1..=MAX_SHAPE_DIM).contains(&R) && (1..=MAX_SHAPE_DIM).contains(&C),
            "shape must be between 1x1 and {0}x{0}, got {1}x{2}",
            MAX_SHAPE_DIM,
            R,
            C
        );
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in bits.iter().enumerate() {
            for (c, &bit) in row.iter().enumerate() {
                cells[r][c] = bit != 0;
            }
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    /// Empty `rows` x `cols` matrix (crate-internal building block for transforms)
    pub(crate) fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows as u8,
            cols: cols as u8,
            cells: [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Whether the sub-cell at (row, col) is occupied; false outside the matrix
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.cells[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, occupied: bool) {
        self.cells[row][col] = occupied;
    }

    /// Occupied sub-cells as (local_row, local_col), row-major
    pub fn occupied(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        (0..self.rows()).flat_map(move |r| {
            (0..self.cols())
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r as i16, c as i16))
        })
    }

    /// Number of occupied sub-cells
    pub fn len(&self) -> usize {
        self.occupied().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for r in 0..self.rows() {
            let line: String = (0..self.cols())
                .map(|c| if self.cells[r][c] { '#' } else { '.' })
                .collect();
            list.entry(&line);
        }
        list.finish()
    }
}

/// Unrotated catalog shape for a kind
pub fn base_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_bits([
            [0, 0, 0, 0],
            [1, 1, 1, 1],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]),
        PieceKind::O => Shape::from_bits([[1, 1], [1, 1]]),
        PieceKind::T => Shape::from_bits([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
        PieceKind::S => Shape::from_bits([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
        PieceKind::Z => Shape::from_bits([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        PieceKind::J => Shape::from_bits([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
        PieceKind::L => Shape::from_bits([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
    }
}

/// Spawn anchor for new pieces (row, col)
pub const SPAWN_POSITION: (i16, i16) = (SPAWN_ROW, SPAWN_COL);

/// The piece currently under gravity and player control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FallingPiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub row: i16,
    pub col: i16,
}

impl FallingPiece {
    /// A new piece at the spawn anchor with its base shape
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: base_shape(kind),
            row: SPAWN_POSITION.0,
            col: SPAWN_POSITION.1,
        }
    }

    /// Absolute (row, col) of every occupied sub-cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .occupied()
            .map(move |(dr, dc)| (self.row + dr, self.col + dc))
    }
}
