//! Serializable view of a game for external front ends

use chess_core::{Color, Difficulty};
use serde::{Deserialize, Serialize};

use crate::game::{GameState, GameStatus};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Piece placement, FEN style, row 0 first
    pub board: String,
    pub side_to_move: Color,
    pub status: GameStatus,
    pub difficulty: Difficulty,
    /// Glyphs taken by white, in capture order
    pub captured_by_white: String,
    /// Glyphs taken by black, in capture order
    pub captured_by_black: String,
    pub selected: Option<String>,
    pub destinations: Vec<String>,
    pub last_move: Option<String>,
}

impl From<&GameState> for GameSnapshot {
    fn from(game: &GameState) -> Self {
        Self {
            board: game.board().to_diagram(),
            side_to_move: game.side_to_move(),
            status: game.status(),
            difficulty: game.difficulty(),
            captured_by_white: game.captured().white.iter().collect(),
            captured_by_black: game.captured().black.iter().collect(),
            selected: game.selected().map(|s| s.to_coord()),
            destinations: game.destinations().iter().map(|s| s.to_coord()).collect(),
            last_move: game.last_move().map(|m| m.to_string()),
        }
    }
}

impl GameSnapshot {
    /// Single-line JSON, one snapshot per line on a stream.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
