//! Grid module - the reducer that owns the field and the falling piece
//!
//! [`Grid::reduce`] maps a state and a [`GridCommand`] to the next state. It is the only
//! writer of the field and the falling piece. `Drop` trusts the caller's collision gate;
//! `Move` validates its own candidate and silently keeps the old state on collision.

use crate::collision::has_collision;
use crate::field::Field;
use crate::pieces::FallingPiece;
use crate::rotation::rotate;
use crate::types::{PieceKind, RotateDirection};

/// Commands accepted by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommand {
    /// Reset to an empty field and spawn `kind`
    Start { kind: PieceKind },
    /// Move the falling piece one row down (caller has checked the destination)
    Drop,
    /// Commit a merged field and spawn `next`
    Lock { field: Field, next: PieceKind },
    /// Shift and/or rotate the falling piece if the result fits
    Move {
        left: bool,
        right: bool,
        rotate: Option<RotateDirection>,
    },
}

impl GridCommand {
    /// Horizontal-only move from held-key flags
    pub fn shift(left: bool, right: bool) -> Self {
        GridCommand::Move {
            left,
            right,
            rotate: None,
        }
    }

    /// In-place rotation without horizontal movement
    pub fn rotate(direction: RotateDirection) -> Self {
        GridCommand::Move {
            left: false,
            right: false,
            rotate: Some(direction),
        }
    }
}

/// Field plus falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    field: Field,
    falling: FallingPiece,
}

impl Grid {
    /// Empty field with an `I` placeholder at the spawn anchor
    pub fn new() -> Self {
        Self {
            field: Field::new(),
            falling: FallingPiece::spawn(PieceKind::I),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn falling(&self) -> &FallingPiece {
        &self.falling
    }

    /// Whether the falling piece could move one row down
    pub fn can_drop(&self) -> bool {
        !has_collision(
            &self.field,
            &self.falling.shape,
            self.falling.row + 1,
            self.falling.col,
        )
    }

    /// Whether the falling piece overlaps the field or leaves its bounds
    pub fn is_overlapping(&self) -> bool {
        has_collision(
            &self.field,
            &self.falling.shape,
            self.falling.row,
            self.falling.col,
        )
    }

    /// Apply a command, producing the next grid state
    pub fn reduce(&self, command: GridCommand) -> Grid {
        match command {
            GridCommand::Start { kind } => Grid {
                field: Field::new(),
                falling: FallingPiece::spawn(kind),
            },
            GridCommand::Drop => Grid {
                field: self.field.clone(),
                falling: FallingPiece {
                    row: self.falling.row + 1,
                    ..self.falling
                },
            },
            GridCommand::Lock { field, next } => Grid {
                field,
                falling: FallingPiece::spawn(next),
            },
            GridCommand::Move {
                left,
                right,
                rotate: direction,
            } => {
                let shape = match direction {
                    Some(direction) => rotate(&self.falling.shape, direction),
                    None => self.falling.shape,
                };
                let dx = match (left, right) {
                    (true, false) => -1,
                    (false, true) => 1,
                    _ => 0,
                };
                let col = self.falling.col + dx;

                if has_collision(&self.field, &shape, self.falling.row, col) {
                    return self.clone();
                }
                Grid {
                    field: self.field.clone(),
                    falling: FallingPiece {
                        shape,
                        col,
                        ..self.falling
                    },
                }
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
