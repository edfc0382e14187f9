//! Session driver.
//!
//! A single tokio task owns the [`Game`] together with its gravity and auto-repeat
//! intervals. Host events arrive over an mpsc channel and are applied strictly in
//! arrival order; every processed wake-up publishes a fresh [`GameSnapshot`] on a
//! watch channel. Both intervals are dropped as soon as the game stops running.

use std::time::Duration;

use anyhow::Context;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use blockfall_core::{Game, GameSnapshot, TickOutcome};
use blockfall_types::{PlayerInput, TickSpeed, Timings};

use crate::config::EngineConfig;

/// Bound on queued host events.
const EVENT_CAPACITY: usize = 64;

/// Host event delivered to the session task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Begin a new game (restarts a running one)
    Start,
    /// Debounced key transition
    Input(PlayerInput),
    /// End the running game
    Stop,
    /// Exit the session task
    Shutdown,
}

/// Handle to a running session task.
pub struct Session {
    event_tx: mpsc::Sender<Event>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
    task: JoinHandle<()>,
}

impl Session {
    /// Spawn the session task on the current tokio runtime.
    pub fn spawn(config: EngineConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let handle = tokio::runtime::Handle::try_current()
            .context("Session::spawn must be called from within a tokio runtime")?;

        let seed = config.resolved_seed();
        let game = Game::with_queue_len(seed, config.queue_len);
        let (event_tx, event_rx) = mpsc::channel(EVENT_CAPACITY);
        let (snapshot_tx, snapshot_rx) = watch::channel(game.snapshot());

        if config.log {
            eprintln!("[Runtime] Session spawned (seed {})", seed);
        }

        let driver = Driver {
            game,
            timings: config.timings,
            log: config.log,
            gravity: None,
            gravity_speed: None,
            repeat: None,
            snapshot_tx,
        };
        let task = handle.spawn(driver.run(event_rx));

        Ok(Self {
            event_tx,
            snapshot_rx,
            task,
        })
    }

    /// Queue an event; fails once the session task has exited
    pub async fn send(&self, event: Event) -> anyhow::Result<()> {
        self.event_tx
            .send(event)
            .await
            .context("session task has shut down")
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver notified on every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.event_tx.is_closed()
    }

    /// Stop the task and wait for it to exit
    pub async fn shutdown(self) -> anyhow::Result<()> {
        // The task may already be gone; joining still reports a panic.
        let _ = self.event_tx.send(Event::Shutdown).await;
        self.task.await.context("session task panicked")?;
        Ok(())
    }
}

/// What woke the session loop
enum Wake {
    Event(Option<Event>),
    Gravity,
    Repeat,
}

struct Driver {
    game: Game,
    timings: Timings,
    log: bool,
    gravity: Option<Interval>,
    /// Speed the current gravity interval was built for
    gravity_speed: Option<TickSpeed>,
    repeat: Option<Interval>,
    snapshot_tx: watch::Sender<GameSnapshot>,
}

impl Driver {
    async fn run(mut self, mut event_rx: mpsc::Receiver<Event>) {
        loop {
            let wake = tokio::select! {
                biased;
                event = event_rx.recv() => Wake::Event(event),
                _ = next_tick(&mut self.gravity) => Wake::Gravity,
                _ = next_tick(&mut self.repeat) => Wake::Repeat,
            };

            match wake {
                Wake::Event(None) | Wake::Event(Some(Event::Shutdown)) => break,
                Wake::Event(Some(event)) => self.on_event(event),
                Wake::Gravity => self.on_gravity(),
                Wake::Repeat => {
                    self.game.repeat_tick();
                }
            }

            self.sync_timers();
            self.publish();
        }

        self.cancel_timers();
        if self.log {
            eprintln!("[Runtime] Session shut down");
        }
    }

    fn on_event(&mut self, event: Event) {
        match event {
            Event::Start => {
                self.game.start();
                // Restarting at the same speed must still restart the gravity period.
                self.cancel_timers();
                if self.log {
                    eprintln!(
                        "[Runtime] Game started (episode {}, next {:?})",
                        self.game.episode_id(),
                        self.game.next_piece()
                    );
                }
            }
            Event::Input(input) => {
                self.game.handle_input(input);
                if input.key().is_directional() {
                    // A fresh press or release restarts the repeat period.
                    self.repeat = self
                        .game
                        .repeat_active()
                        .then(|| periodic(self.timings.repeat_ms));
                }
            }
            Event::Stop => {
                if self.game.stop() && self.log {
                    eprintln!(
                        "[Runtime] Game stopped (score {}, lines {})",
                        self.game.score(),
                        self.game.lines()
                    );
                }
            }
            Event::Shutdown => {}
        }
    }

    fn on_gravity(&mut self) {
        if let TickOutcome::GameOver = self.game.tick() {
            if self.log {
                eprintln!(
                    "[Runtime] Game over (score {}, lines {}, pieces {})",
                    self.game.score(),
                    self.game.lines(),
                    self.game.pieces_locked()
                );
            }
        }
    }

    /// Rebuild gravity on a speed change and drop timers the game no longer needs
    fn sync_timers(&mut self) {
        let had_timers = self.gravity.is_some() || self.repeat.is_some();
        let speed = self.game.tick_speed();
        if speed != self.gravity_speed {
            self.gravity = speed.map(|s| periodic(self.timings.interval_ms(s)));
            self.gravity_speed = speed;
        }
        if !self.game.repeat_active() {
            self.repeat = None;
        }
        if had_timers && self.gravity.is_none() && self.repeat.is_none() && self.log {
            eprintln!("[Runtime] Timers cancelled");
        }
    }

    fn cancel_timers(&mut self) {
        self.gravity = None;
        self.gravity_speed = None;
        self.repeat = None;
    }

    fn publish(&self) {
        self.snapshot_tx
            .send_modify(|snapshot| self.game.snapshot_into(snapshot));
    }
}

/// Interval whose first tick is one full period from now
fn periodic(ms: u32) -> Interval {
    let period = Duration::from_millis(u64::from(ms));
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn next_tick(slot: &mut Option<Interval>) {
    match slot {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
