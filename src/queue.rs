//! Upcoming piece queue
//!
//! Every shape is drawn independently and uniformly from the catalog, so
//! repeats and droughts are possible. The queue is topped back up to
//! [`LOOKAHEAD`] entries before each spawn.

use crate::tetromino::TetrominoType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Minimum queue length after a refill
pub const LOOKAHEAD: usize = 4;

/// Random supply of upcoming pieces
#[derive(Debug, Clone)]
pub struct PieceQueue {
    queue: VecDeque<TetrominoType>,
    rng: ChaCha8Rng,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceQueue {
    /// Create a queue seeded from the thread RNG
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a queue with a fixed seed (reproducible sequences)
    pub fn with_seed(seed: u64) -> Self {
        let mut queue = Self {
            queue: VecDeque::with_capacity(LOOKAHEAD),
            rng: ChaCha8Rng::seed_from_u64(seed),
        };
        queue.refill();
        queue
    }

    /// Append random shapes until the lookahead is satisfied
    pub fn refill(&mut self) {
        let all = TetrominoType::all();
        while self.queue.len() < LOOKAHEAD {
            let piece = all[self.rng.gen_range(0..all.len())];
            self.queue.push_back(piece);
        }
    }

    /// The shape that will spawn next, refilling first if needed
    pub fn peek(&mut self) -> TetrominoType {
        self.refill();
        self.queue[0]
    }

    /// Remove the front shape
    pub fn pop(&mut self) -> Option<TetrominoType> {
        self.queue.pop_front()
    }

    /// Front of the queue without refilling
    pub fn front(&self) -> Option<TetrominoType> {
        self.queue.front().copied()
    }

    /// Iterate over the queued shapes, front first
    pub fn iter(&self) -> impl Iterator<Item = TetrominoType> + '_ {
        self.queue.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
