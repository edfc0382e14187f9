//! Game state module - the loop controller driving the grid reducer
//!
//! [`Game`] decides which [`GridCommand`] to issue for each gravity tick, auto-repeat
//! tick and player input. It owns scoring, the upcoming queue, the lock-delay flag and
//! game-over detection. It has no clock: the host fires [`Game::tick`] at the interval
//! named by [`Game::tick_speed`] and [`Game::repeat_tick`] every repeat interval while
//! [`Game::repeat_active`] holds.

use crate::collision::has_collision;
use crate::field::Field;
use crate::grid::{Grid, GridCommand};
use crate::pieces::{base_shape, SPAWN_POSITION};
use crate::rng::PieceQueue;
use crate::scoring::points_for;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// What a gravity tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened
    Idle,
    /// The piece moved one row down
    Dropped,
    /// The piece landed; the lock-delay grace period started
    LockPending,
    /// The piece was slid off its support during the grace period
    LockCancelled,
    /// The piece was merged and the next one spawned
    Locked(LockEvent),
    /// The next piece could not spawn
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    queue: PieceQueue,
    started: bool,
    playing: bool,
    lock_pending: bool,
    soft_drop: bool,
    left_held: bool,
    right_held: bool,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    /// Monotonic episode id (increments on every start after the first).
    episode_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl Game {
    /// Create a new game with the given RNG seed and the default queue length
    pub fn new(seed: u32) -> Self {
        Self::with_queue_len(seed, DEFAULT_QUEUE_LEN)
    }

    /// Create a new game with a custom look-ahead queue length
    pub fn with_queue_len(seed: u32, queue_len: usize) -> Self {
        Self {
            grid: Grid::new(),
            queue: PieceQueue::new(seed, queue_len),
            started: false,
            playing: false,
            lock_pending: false,
            soft_drop: false,
            left_held: false,
            right_held: false,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            episode_id: 0,
            last_event: None,
        }
    }

    /// Begin a new game on an empty field
    pub fn start(&mut self) {
        self.reset_session();
        let kind = self.queue.draw();
        self.grid = self.grid.reduce(GridCommand::Start { kind });
        self.playing = true;
    }

    /// Begin a new game on a prefilled field (puzzle and garbage setups).
    ///
    /// Returns false, leaving the game stopped, when the first piece cannot spawn.
    pub fn start_with_field(&mut self, field: Field) -> bool {
        self.reset_session();
        let kind = self.queue.draw();
        let (spawn_row, spawn_col) = SPAWN_POSITION;
        let blocked = has_collision(&field, &base_shape(kind), spawn_row, spawn_col);
        self.grid = self.grid.reduce(GridCommand::Lock { field, next: kind });
        self.playing = !blocked;
        self.playing
    }

    fn reset_session(&mut self) {
        if self.started {
            self.episode_id = self.episode_id.wrapping_add(1);
        }
        self.started = true;
        self.end();
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.last_event = None;
    }

    /// End the game explicitly. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        let was_playing = self.playing;
        self.end();
        was_playing
    }

    fn end(&mut self) {
        self.playing = false;
        self.lock_pending = false;
        self.soft_drop = false;
        self.left_held = false;
        self.right_held = false;
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn lock_pending(&self) -> bool {
        self.lock_pending
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.queue.seed()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn field(&self) -> &Field {
        self.grid.field()
    }

    /// The piece that will spawn next
    pub fn next_piece(&self) -> PieceKind {
        self.queue.peek()
    }

    /// Upcoming pieces, front first
    pub fn upcoming(&self) -> impl ExactSizeIterator<Item = PieceKind> + '_ {
        self.queue.upcoming()
    }

    /// Replace the upcoming pieces, front first (for scripted setups)
    pub fn set_upcoming(&mut self, kinds: &[PieceKind]) {
        self.queue.set_upcoming(kinds);
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Active gravity speed; None once the game is not running.
    ///
    /// A pending lock always runs at `Sliding`; otherwise a soft drop runs `Fast` until the
    /// next lock or lock cancel returns gravity to `Normal`.
    pub fn tick_speed(&self) -> Option<TickSpeed> {
        if !self.playing {
            None
        } else if self.lock_pending {
            Some(TickSpeed::Sliding)
        } else if self.soft_drop {
            Some(TickSpeed::Fast)
        } else {
            Some(TickSpeed::Normal)
        }
    }

    /// Whether horizontal auto-repeat should be firing
    pub fn repeat_active(&self) -> bool {
        self.playing && (self.left_held || self.right_held)
    }

    /// Gravity tick
    pub fn tick(&mut self) -> TickOutcome {
        if !self.playing {
            return TickOutcome::Idle;
        }

        if self.lock_pending {
            return self.commit();
        }

        if !self.grid.can_drop() {
            self.lock_pending = true;
            return TickOutcome::LockPending;
        }

        self.grid = self.grid.reduce(GridCommand::Drop);
        TickOutcome::Dropped
    }

    /// Resolve a pending lock: cancel it if the piece can fall again, otherwise merge,
    /// clear rows, score and spawn the next piece.
    fn commit(&mut self) -> TickOutcome {
        if self.grid.can_drop() {
            self.lock_pending = false;
            self.soft_drop = false;
            return TickOutcome::LockCancelled;
        }

        let falling = *self.grid.falling();
        let (field, cleared) =
            self.grid
                .field()
                .merged(&falling.shape, falling.row, falling.col, falling.kind);
        let lines_cleared = cleared.len();
        let points = points_for(lines_cleared);

        let next = self.queue.draw();
        let next_shape = base_shape(next);
        let (spawn_row, spawn_col) = SPAWN_POSITION;
        if has_collision(self.grid.field(), &next_shape, spawn_row, spawn_col)
            || has_collision(&field, &next_shape, spawn_row, spawn_col)
        {
            self.end();
            return TickOutcome::GameOver;
        }

        self.grid = self.grid.reduce(GridCommand::Lock { field, next });
        self.lock_pending = false;
        self.soft_drop = false;
        self.score += points;
        self.lines += lines_cleared as u32;
        self.pieces_locked += 1;

        let event = LockEvent {
            kind: falling.kind,
            lines_cleared: lines_cleared as u32,
            points,
        };
        self.last_event = Some(event);
        TickOutcome::Locked(event)
    }

    /// Apply a debounced key transition. Returns true if the falling piece moved or
    /// rotated.
    ///
    /// Directional presses and releases re-issue a move with the current held flags, so
    /// the first press moves at once and releasing one side of a two-key hold moves
    /// toward the other. Ignored while not playing.
    pub fn handle_input(&mut self, input: PlayerInput) -> bool {
        if !self.playing {
            return false;
        }

        match input {
            PlayerInput::Press(Key::Left) => {
                self.left_held = true;
                self.shift()
            }
            PlayerInput::Release(Key::Left) => {
                self.left_held = false;
                self.shift()
            }
            PlayerInput::Press(Key::Right) => {
                self.right_held = true;
                self.shift()
            }
            PlayerInput::Release(Key::Right) => {
                self.right_held = false;
                self.shift()
            }
            PlayerInput::Press(Key::SoftDrop) => {
                self.soft_drop = true;
                false
            }
            PlayerInput::Release(Key::SoftDrop) => {
                self.soft_drop = false;
                false
            }
            PlayerInput::Press(Key::RotateCw) => {
                self.apply_move(GridCommand::rotate(RotateDirection::Clockwise))
            }
            PlayerInput::Press(Key::RotateCcw) => {
                self.apply_move(GridCommand::rotate(RotateDirection::CounterClockwise))
            }
            PlayerInput::Release(Key::RotateCw | Key::RotateCcw) => false,
        }
    }

    /// Auto-repeat tick: re-issue the held horizontal move
    pub fn repeat_tick(&mut self) -> bool {
        if !self.repeat_active() {
            return false;
        }
        self.shift()
    }

    fn shift(&mut self) -> bool {
        self.apply_move(GridCommand::shift(self.left_held, self.right_held))
    }

    fn apply_move(&mut self, command: GridCommand) -> bool {
        let next = self.grid.reduce(command);
        let moved = next.falling() != self.grid.falling();
        self.grid = next;
        moved
    }

    /// Write the renderer view into an existing snapshot
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.field().write_grid(&mut out.field);

        if self.playing {
            let falling = self.grid.falling();
            for (row, col) in falling.cells() {
                if let (Ok(r), Ok(c)) = (usize::try_from(row), usize::try_from(col)) {
                    if r < FIELD_HEIGHT && c < FIELD_WIDTH {
                        out.field[r][c] = Cell::Filled(falling.kind);
                    }
                }
            }
            out.active = Some(*falling);
        } else {
            out.active = None;
        }

        out.next = self.started.then(|| self.queue.peek());
        out.upcoming.clear();
        if self.started {
            out.upcoming.extend(self.queue.upcoming());
        }
        out.score = self.score;
        out.lines = self.lines;
        out.pieces_locked = self.pieces_locked;
        out.playing = self.playing;
        out.lock_pending = self.lock_pending;
        out.tick_speed = self.tick_speed();
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}
