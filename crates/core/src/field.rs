//! Field module - the settled grid of locked cells
//!
//! The field is a 10x20 grid where each cell is either empty or filled with a piece kind.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) where row ranges 0..19 (top to bottom), col ranges 0..9
//! (left to right). Rows above the field are never stored.

use arrayvec::ArrayVec;

use crate::pieces::Shape;
use crate::types::{Cell, PieceKind, FIELD_HEIGHT, FIELD_WIDTH};

/// Total number of cells in the field
const FIELD_SIZE: usize = FIELD_WIDTH * FIELD_HEIGHT;

/// Row indices removed by a single clear, top to bottom.
pub type ClearedRows = ArrayVec<usize, FIELD_HEIGHT>;

/// The settled field - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    #[cfg_attr(feature = "serde", serde(with = "flat_cells"))]
    cells: [Cell; FIELD_SIZE],
}

impl Field {
    /// Create a new empty field
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; FIELD_SIZE],
        }
    }

    /// Build a field from rows; rows beyond the height and cells beyond the width are ignored,
    /// missing ones stay empty.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = Cell>,
    {
        let mut field = Self::new();
        for (row, cells) in rows.into_iter().take(FIELD_HEIGHT).enumerate() {
            for (col, cell) in cells.into_iter().take(FIELD_WIDTH).enumerate() {
                field.cells[row * FIELD_WIDTH + col] = cell;
            }
        }
        field
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: i16, col: i16) -> Option<usize> {
        if row < 0 || row >= FIELD_HEIGHT as i16 || col < 0 || col >= FIELD_WIDTH as i16 {
            return None;
        }
        Some((row as usize) * FIELD_WIDTH + (col as usize))
    }

    /// Get cell at (row, col); None if out of bounds
    pub fn get(&self, row: i16, col: i16) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col); returns false if out of bounds
    pub fn set(&mut self, row: i16, col: i16, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is inside the field and filled
    pub fn is_filled(&self, row: i16, col: i16) -> bool {
        matches!(self.get(row, col), Some(Cell::Filled(_)))
    }

    /// Borrow one row of cells; None below the floor
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= FIELD_HEIGHT {
            return None;
        }
        let start = row * FIELD_WIDTH;
        Some(&self.cells[start..start + FIELD_WIDTH])
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(FIELD_WIDTH)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row)
            .is_some_and(|cells| cells.iter().all(Cell::is_filled))
    }

    /// Count filled cells (handy for invariant checks)
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Stamp every occupied shape cell at the anchor with `kind`.
    ///
    /// Cells in negative rows sit above the field and are dropped. Cells outside the
    /// column range or below the floor are skipped as well; callers gate placement
    /// through the collision detector first.
    pub fn stamp(&mut self, shape: &Shape, row: i16, col: i16, kind: PieceKind) {
        for (dr, dc) in shape.occupied() {
            let r = row + dr;
            if r < 0 {
                continue;
            }
            self.set(r, col + dc, Cell::Filled(kind));
        }
    }

    /// Remove all full rows, compacting the rest downward and refilling the top with
    /// empty rows. Returns the removed row indices, top to bottom.
    ///
    /// Two-pointer pass without allocation; the height never changes.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let mut write_row = FIELD_HEIGHT;

        // Scan from bottom to top
        for read_row in (0..FIELD_HEIGHT).rev() {
            if self.is_row_full(read_row) {
                cleared.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * FIELD_WIDTH;
                    let dst = write_row * FIELD_WIDTH;
                    self.cells.copy_within(src..src + FIELD_WIDTH, dst);
                }
            }
        }

        for cell in &mut self.cells[..write_row * FIELD_WIDTH] {
            *cell = Cell::Empty;
        }

        cleared.reverse();
        cleared
    }

    /// Copy of this field with the piece stamped in and full rows cleared.
    pub fn merged(&self, shape: &Shape, row: i16, col: i16, kind: PieceKind) -> (Field, ClearedRows) {
        let mut next = self.clone();
        next.stamp(shape, row, col, kind);
        let cleared = next.clear_full_rows();
        (next, cleared)
    }

    /// Copy the cells into a fixed 2D grid
    pub fn write_grid(&self, out: &mut [[Cell; FIELD_WIDTH]; FIELD_HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "serde")]
mod flat_cells {
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    use super::FIELD_SIZE;
    use crate::types::Cell;

    pub fn serialize<S: Serializer>(cells: &[Cell; FIELD_SIZE], s: S) -> Result<S::Ok, S::Error> {
        cells.as_slice().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[Cell; FIELD_SIZE], D::Error> {
        let cells = Vec::<Cell>::deserialize(d)?;
        let len = cells.len();
        cells
            .try_into()
            .map_err(|_| D::Error::invalid_length(len, &"200 field cells"))
    }
}
