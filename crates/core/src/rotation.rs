//! Rotation module - pure 90 degree shape transforms
//!
//! Only square matrices rotate. A rectangular shape is returned unchanged; there are no
//! wall kicks. Whether the rotated shape fits is decided afterwards by the collision
//! detector.

use crate::pieces::Shape;
use crate::types::RotateDirection;

/// Rotate a shape by 90 degrees.
///
/// For an n x n matrix, clockwise maps `(y, x)` to `(x, n-1-y)` and counter-clockwise
/// maps `(y, x)` to `(n-1-x, y)`.
pub fn rotate(shape: &Shape, direction: RotateDirection) -> Shape {
    if !shape.is_square() {
        return *shape;
    }

    let n = shape.rows();
    let mut rotated = Shape::blank(n, n);
    for y in 0..n {
        for x in 0..n {
            let occupied = shape.get(y, x);
            match direction {
                RotateDirection::Clockwise => rotated.set(x, n - 1 - y, occupied),
                RotateDirection::CounterClockwise => rotated.set(n - 1 - x, y, occupied),
            }
        }
    }
    rotated
}
