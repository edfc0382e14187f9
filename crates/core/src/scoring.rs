//! Scoring module - points per lock
//!
//! A single piece spans at most four rows, so a lock clears 0-4 lines. Anything else
//! means the caller broke the field invariants.

use crate::types::LINE_SCORES;

/// Points for a lock that cleared `lines`, or None outside 0-4
pub fn try_points_for(lines: usize) -> Option<u32> {
    LINE_SCORES.get(lines).copied()
}

/// Points for a lock that cleared `lines`.
///
/// Panics if `lines` is greater than 4.
pub fn points_for(lines: usize) -> u32 {
    match try_points_for(lines) {
        Some(points) => points,
        None => panic!("a single lock cannot clear {} lines", lines),
    }
}
