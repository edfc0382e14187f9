//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: the settled field, the piece
//! catalog, rotation, collision, the grid reducer and the loop controller that sequences
//! them. It has **zero dependencies** on timers, terminals or I/O:
//!
//! - **Deterministic**: Same seed and inputs produce identical games
//! - **Pure transitions**: [`Grid::reduce`] returns a new state and never mutates its input
//! - **Portable**: The host supplies the clock (see `blockfall-runtime`)
//!
//! # Module Structure
//!
//! - [`field`]: 10x20 settled field with stamping and line clearing
//! - [`pieces`]: Shape matrices, the seven-kind catalog and the falling piece
//! - [`rotation`]: Pure 90 degree matrix rotation
//! - [`collision`]: Placement test against walls, floor and settled cells
//! - [`grid`]: The reducer owning field plus falling piece
//! - [`game_state`]: Gravity, lock delay, auto-repeat, scoring and game over
//! - [`rng`]: Seeded uniform piece supply with a look-ahead queue
//! - [`scoring`]: Points per lock
//! - [`snapshot`]: Render view with the falling piece overlaid
//!
//! # Game Rules
//!
//! - **Uniform supply**: Every kind is drawn independently; no bag
//! - **Plain rotation**: No wall kicks; a blocked rotation is rejected
//! - **Lock delay**: A landed piece gets one `Sliding` tick to be moved off its support
//! - **Scoring**: 0/100/300/500/800 for 0-4 lines per lock
//!
//! # Example
//!
//! ```
//! use blockfall_core::Game;
//! use blockfall_core::types::{Key, PlayerInput, TickSpeed};
//!
//! let mut game = Game::new(12345);
//! game.start();
//!
//! game.handle_input(PlayerInput::Press(Key::Left));
//! game.handle_input(PlayerInput::Release(Key::Left));
//! game.tick();
//!
//! assert!(game.playing());
//! assert_eq!(game.tick_speed(), Some(TickSpeed::Normal));
//! ```

pub mod collision;
pub mod field;
pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::has_collision;
pub use field::{ClearedRows, Field};
pub use game_state::{Game, TickOutcome};
pub use grid::{Grid, GridCommand};
pub use pieces::{base_shape, FallingPiece, Shape};
pub use rng::{PieceQueue, SimpleRng};
pub use rotation::rotate;
pub use scoring::{points_for, try_points_for};
pub use snapshot::GameSnapshot;
