//! Retro Chess core: board model, move generation and the opponent interface

pub mod attacks;
pub mod board;
pub mod difficulty;
pub mod movegen;
pub mod types;

// Re-export core game logic (not opponent-specific)
pub use attacks::*;
pub use board::*;
pub use difficulty::*;
pub use movegen::*;
pub use types::*;

// =============================================================================
// Opponent trait: implemented by every computer player
// =============================================================================

/// Trait that all computer opponents must implement.
///
/// Policies only propose moves; the turn engine validates and applies them.
pub trait OpponentPolicy: Send {
    /// Choose a move for `side` on `board`.
    ///
    /// # Returns
    /// `None` when the policy declines to move this turn (for the random
    /// sampler: its attempt budget ran out). The caller must then leave the
    /// game state untouched.
    fn choose_move(&mut self, board: &Board, side: Color) -> Option<Move>;

    /// Returns the opponent's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
