//! Random Sampling Opponent
//!
//! The computer side of Retro Chess. Instead of searching, it samples one of
//! its own pieces at random, asks the move generator where that piece can
//! go, and picks a destination, leaning toward captures on harder tiers:
//! - easy: 5 samples, no capture preference
//! - medium: 10 samples, captures preferred on a fair coin flip
//! - hard: 20 samples, captures always preferred
//!
//! The first sampled piece with any destination decides the move. If every
//! sample lands on an immobile piece the opponent passes (returns `None`).

use chess_core::{generate_moves_into, Board, Color, Difficulty, Move, OpponentPolicy, Square};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};


/// An opponent that plays bounded random samples.
///
/// Generic over the random source so tests and replays can use a seeded
/// generator.
#[derive(Debug, Clone)]
pub struct RandomOpponent<R = StdRng> {
    difficulty: Difficulty,
    rng: R,
    samples: u64,
}

impl RandomOpponent<StdRng> {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_entropy())
    }

    /// Reproducible opponent: the same seed and board sequence yields the
    /// same moves.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomOpponent<R> {
    pub fn with_rng(difficulty: Difficulty, rng: R) -> Self {
        Self {
            difficulty,
            rng,
            samples: 0,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Pieces sampled during the most recent `choose_move` call.
    pub fn samples(&self) -> u64 {
        self.samples
    }

    fn pick_destination(&mut self, board: &Board, dests: &[Square]) -> Option<Square> {
        let captures: Vec<Square> = dests
            .iter()
            .copied()
            .filter(|&to| board.piece_at(to).is_some())
            .collect();

        let prefer_captures = match self.difficulty {
            Difficulty::Hard => !captures.is_empty(),
            Difficulty::Medium => !captures.is_empty() && self.rng.gen_bool(0.5),
            Difficulty::Easy => false,
        };

        if prefer_captures {
            captures.choose(&mut self.rng).copied()
        } else {
            dests.choose(&mut self.rng).copied()
        }
    }
}

impl<R: Rng + Send> OpponentPolicy for RandomOpponent<R> {
    fn choose_move(&mut self, board: &Board, side: Color) -> Option<Move> {
        self.samples = 0;

        let pieces = board.occupied_by(side);
        if pieces.is_empty() {
            return None;
        }

        let budget = self.difficulty.attempt_budget();
        let mut dests = Vec::with_capacity(28);
        for _ in 0..budget {
            self.samples += 1;
            let from = *pieces.choose(&mut self.rng)?;
            generate_moves_into(board, from, &mut dests);
            if dests.is_empty() {
                continue;
            }
            let to = self.pick_destination(board, &dests)?;
            debug!(
                "{} opponent picked {}{} after {} sample(s)",
                self.difficulty, from, to, self.samples
            );
            return Some(Move::new(from, to));
        }

        debug!(
            "{} opponent found no mobile piece in {} samples",
            self.difficulty, budget
        );
        None
    }

    fn name(&self) -> &str {
        "Random sampler"
    }

    fn new_game(&mut self) {
        self.samples = 0;
    }
}
