//! RNG module - uniform random piece supply with a look-ahead queue
//!
//! Every piece is drawn independently and uniformly from the seven kinds; there is no
//! bag, so repeats are possible. The queue keeps a fixed number of upcoming kinds:
//! taking one pops the front and appends a fresh draw at the back.
//!
//! The generator is a seeded LCG so games are reproducible from their seed.

use std::collections::VecDeque;

use crate::types::{PieceKind, MAX_QUEUE_LEN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift so the result comes from the high bits; the low bits of a
    /// power-of-two LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Fixed-length queue of upcoming piece kinds
#[derive(Debug, Clone)]
pub struct PieceQueue {
    upcoming: VecDeque<PieceKind>,
    rng: SimpleRng,
    seed: u32,
}

impl PieceQueue {
    /// Create a queue of `len` upcoming pieces, clamped to 1..=MAX_QUEUE_LEN
    pub fn new(seed: u32, len: usize) -> Self {
        let len = len.clamp(1, MAX_QUEUE_LEN);
        let mut queue = Self {
            upcoming: VecDeque::with_capacity(len + 1),
            rng: SimpleRng::new(seed),
            seed,
        };
        for _ in 0..len {
            let kind = queue.random_kind();
            queue.upcoming.push_back(kind);
        }
        queue
    }

    /// Uniform independent draw
    fn random_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Take the front piece and append a fresh one, keeping the length fixed
    pub fn draw(&mut self) -> PieceKind {
        let fresh = self.random_kind();
        self.upcoming.push_back(fresh);
        // The queue is never empty: it starts with at least one piece and every pop
        // follows a push.
        self.upcoming.pop_front().unwrap_or(fresh)
    }

    /// The piece the next `draw` will return
    pub fn peek(&self) -> PieceKind {
        self.upcoming[0]
    }

    /// Upcoming pieces, front first
    pub fn upcoming(&self) -> impl ExactSizeIterator<Item = PieceKind> + '_ {
        self.upcoming.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// Seed the queue was created with (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Replace the upcoming pieces, front first (for scripted setups)
    pub fn set_upcoming(&mut self, kinds: &[PieceKind]) {
        for (slot, kind) in self.upcoming.iter_mut().zip(kinds) {
            *slot = *kind;
        }
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1, crate::types::DEFAULT_QUEUE_LEN)
    }
}
