use arrayvec::ArrayVec;

use crate::pieces::FallingPiece;
use crate::types::{Cell, PieceKind, TickSpeed, FIELD_HEIGHT, FIELD_WIDTH, MAX_QUEUE_LEN};

/// Read-only copy of the game handed to a renderer.
///
/// `field` is the settled field with the falling piece overlaid while playing. The
/// overlay exists only here; the engine's field is never touched by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub field: [[Cell; FIELD_WIDTH]; FIELD_HEIGHT],
    pub active: Option<FallingPiece>,
    pub next: Option<PieceKind>,
    pub upcoming: ArrayVec<PieceKind, MAX_QUEUE_LEN>,
    pub score: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub playing: bool,
    pub lock_pending: bool,
    pub tick_speed: Option<TickSpeed>,
    pub episode_id: u32,
}

impl GameSnapshot {
    /// Cell at (row, col) of the displayed field; None outside it
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.field.get(row)?.get(col).copied()
    }

    /// Number of filled cells in the displayed field
    pub fn filled_count(&self) -> usize {
        self.field.iter().flatten().filter(|cell| cell.is_filled()).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            field: [[Cell::Empty; FIELD_WIDTH]; FIELD_HEIGHT],
            active: None,
            next: None,
            upcoming: ArrayVec::new(),
            score: 0,
            lines: 0,
            pieces_locked: 0,
            playing: false,
            lock_pending: false,
            tick_speed: None,
            episode_id: 0,
        }
    }
}
