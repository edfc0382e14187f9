//! Collision detection - the single placement predicate used by every movement path.

use crate::field::Field;
use crate::pieces::Shape;
use crate::types::{FIELD_HEIGHT, FIELD_WIDTH};

/// Whether placing `shape` with its anchor at (row, col) would collide.
///
/// A sub-cell collides when it leaves the column range, falls below the floor, or lands
/// on a filled cell. Rows above the field (negative) are always open.
pub fn has_collision(field: &Field, shape: &Shape, row: i16, col: i16) -> bool {
    shape.occupied().any(|(dr, dc)| {
        let r = row + dr;
        let c = col + dc;
        c < 0 || c >= FIELD_WIDTH as i16 || r >= FIELD_HEIGHT as i16 || (r >= 0 && field.is_filled(r, c))
    })
}
