//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the engine.
//! All types are pure data with no required dependencies, making them usable
//! in any context (core logic, input mapping, the async runtime, a UI shell).
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn anchor**: row 0, column 3
//!
//! Rows above the field (negative row indices) are never stored. They are
//! treated as open space while a piece spawns.
//!
//! # Tick Speeds
//!
//! Default gravity intervals in milliseconds:
//!
//! | Speed | Value | Description |
//! |-------|-------|-------------|
//! | `Normal` | 500 | Baseline gravity |
//! | `Sliding` | 100 | Lock-delay grace once the piece cannot descend |
//! | `Fast` | 50 | Soft drop, until the next lock |
//!
//! Horizontal auto-repeat fires every `REPEAT_MS` (100ms) while a direction is held.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, PieceKind, TickSpeed, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let cell = Cell::Filled(PieceKind::T);
//! assert!(cell.is_filled());
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! assert!(TickSpeed::Fast.default_ms() < TickSpeed::Sliding.default_ms());
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of columns in the field.
pub const FIELD_WIDTH: usize = 10;

/// Number of rows in the field.
pub const FIELD_HEIGHT: usize = 20;

/// Anchor row for freshly spawned pieces.
pub const SPAWN_ROW: i16 = 0;

/// Anchor column for freshly spawned pieces.
pub const SPAWN_COL: i16 = 3;

/// Default gravity interval.
pub const NORMAL_TICK_MS: u32 = 500;

/// Default lock-delay grace interval.
pub const SLIDING_TICK_MS: u32 = 100;

/// Default soft-drop interval.
pub const FAST_TICK_MS: u32 = 50;

/// Default horizontal auto-repeat interval.
pub const REPEAT_MS: u32 = 100;

/// Default number of upcoming pieces kept in the look-ahead queue.
pub const DEFAULT_QUEUE_LEN: usize = 3;

/// Longest supported look-ahead queue.
pub const MAX_QUEUE_LEN: usize = 7;

/// Points awarded per lock, indexed by lines cleared (0-4).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];
}

/// A single field cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceKind),
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Direction of a 90 degree rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RotateDirection {
    Clockwise,
    CounterClockwise,
}

/// Logical player keys, independent of any keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Key {
    Left,
    Right,
    SoftDrop,
    RotateCw,
    RotateCcw,
}

impl Key {
    /// Whether this key participates in horizontal auto-repeat.
    pub fn is_directional(&self) -> bool {
        matches!(self, Key::Left | Key::Right)
    }
}

/// A debounced key transition delivered by the input layer.
///
/// Platform key-repeat events must be filtered out before they get here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlayerInput {
    Press(Key),
    Release(Key),
}

impl PlayerInput {
    pub fn key(&self) -> Key {
        match self {
            PlayerInput::Press(key) | PlayerInput::Release(key) => *key,
        }
    }
}

/// Active gravity speed.
///
/// The ordering `Fast < Sliding < Normal` must hold for any timing set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TickSpeed {
    Normal,
    Sliding,
    Fast,
}

impl TickSpeed {
    /// Default interval for this speed in milliseconds.
    pub fn default_ms(&self) -> u32 {
        match self {
            TickSpeed::Normal => NORMAL_TICK_MS,
            TickSpeed::Sliding => SLIDING_TICK_MS,
            TickSpeed::Fast => FAST_TICK_MS,
        }
    }
}

/// Interval set driving gravity and auto-repeat, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timings {
    pub normal_ms: u32,
    pub sliding_ms: u32,
    pub fast_ms: u32,
    pub repeat_ms: u32,
}

impl Timings {
    /// Interval for the given speed.
    pub fn interval_ms(&self, speed: TickSpeed) -> u32 {
        match speed {
            TickSpeed::Normal => self.normal_ms,
            TickSpeed::Sliding => self.sliding_ms,
            TickSpeed::Fast => self.fast_ms,
        }
    }

    /// Whether the speeds are non-zero and strictly ordered `Fast < Sliding < Normal`.
    pub fn is_ordered(&self) -> bool {
        self.fast_ms > 0
            && self.repeat_ms > 0
            && self.fast_ms < self.sliding_ms
            && self.sliding_ms < self.normal_ms
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            normal_ms: NORMAL_TICK_MS,
            sliding_ms: SLIDING_TICK_MS,
            fast_ms: FAST_TICK_MS,
            repeat_ms: REPEAT_MS,
        }
    }
}

/// Result of the most recent lock (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points: u32,
}
