//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into debounced [`PlayerInput`](crate::types::PlayerInput)
//! transitions. Platform key-repeat events are dropped here; horizontal auto-repeat is
//! driven by the runtime's own interval instead.
//!
//! Release events are only delivered by terminals that support the keyboard
//! enhancement protocol; enable `PushKeyboardEnhancementFlags` with
//! `REPORT_EVENT_TYPES` in the host before reading events.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key_event, should_quit};
