//! Text rendering of a game frame

use chess_core::{is_king_safe, Color, Square};
use chess_game::GameState;
use std::fmt::Write;

/// Draw the board with the selection in brackets and destinations marked
/// with `*` (or `x` over a capturable piece).
pub fn render_board(game: &GameState) -> String {
    let board = game.board();
    let mut out = String::new();
    for row in 0..8u8 {
        let _ = write!(out, "{} ", 8 - row);
        for col in 0..8u8 {
            let Some(sq) = Square::new(row, col) else {
                continue;
            };
            let cell = match board.piece_at(sq) {
                Some(pc) => pc.glyph(),
                None => '.',
            };
            let cell = if game.is_selected(sq) {
                format!("[{cell}]")
            } else if game.is_destination(sq) {
                if board.piece_at(sq).is_some() {
                    format!("x{cell} ")
                } else {
                    " * ".to_string()
                }
            } else {
                format!(" {cell} ")
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out.push_str("   a  b  c  d  e  f  g  h");
    out
}

/// Full frame: turn banner, level, tallies and board.
pub fn render_frame(game: &GameState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}    LEVEL: {}",
        game.status_line(),
        game.difficulty().to_string().to_uppercase()
    );
    let white: String = game.captured().white.iter().collect();
    let black: String = game.captured().black.iter().collect();
    let _ = writeln!(out, "CAPTURED  you: {white}  ai: {black}");
    if let Some(mv) = game.last_move() {
        let _ = writeln!(out, "last move: {mv}");
    }
    if !is_king_safe(game.board(), Color::White) {
        let _ = writeln!(out, "(your king is under attack)");
    }
    out.push_str(&render_board(game));
    out
}
