//! Async session runtime.
//!
//! The core engine has no clock. This crate supplies one: a [`Session`] runs a tokio
//! task that owns the game, fires gravity at the interval for the current
//! [`TickSpeed`](blockfall_types::TickSpeed), fires horizontal auto-repeat while a
//! direction is held, and cancels both timers when the game ends.
//!
//! # Example
//!
//! ```no_run
//! use blockfall_runtime::{EngineConfig, Event, Session};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let session = Session::spawn(EngineConfig::from_env()?)?;
//! session.send(Event::Start).await?;
//!
//! let mut updates = session.subscribe();
//! updates.changed().await?;
//! println!("score: {}", updates.borrow().score);
//!
//! session.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod session;

pub use config::EngineConfig;
pub use session::{Event, Session};
