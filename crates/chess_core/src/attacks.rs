//! Attack detection.
//!
//! The turn engine applies moves without consulting these; front ends use
//! them to flag a king under attack.

use crate::board::Board;
use crate::movegen::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::types::*;

/// Whether any piece of color `by` attacks `target`.
///
/// Pawns attack diagonally forward even when the target square is empty,
/// unlike their generated moves.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    let is = |s: Option<Square>, kinds: &[PieceKind]| {
        matches!(s.and_then(|s| board.piece_at(s)), Some(pc) if pc.color == by && kinds.contains(&pc.kind))
    };

    // Pawn attacks: an attacking pawn sits one step "behind" the target
    // from its own point of view.
    let back = -by.forward();
    if is(target.offset(back, -1), &[PieceKind::Pawn])
        || is(target.offset(back, 1), &[PieceKind::Pawn])
    {
        return true;
    }

    if KNIGHT_DELTAS
        .iter()
        .any(|&(dr, dc)| is(target.offset(dr, dc), &[PieceKind::Knight]))
    {
        return true;
    }

    if KING_DELTAS
        .iter()
        .any(|&(dr, dc)| is(target.offset(dr, dc), &[PieceKind::King]))
    {
        return true;
    }

    // Sliding: bishop/rook/queen
    let rays = [
        (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
        (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
    ];
    for (dirs, kinds) in rays {
        for &(dr, dc) in dirs {
            let mut cur = target.offset(dr, dc);
            while let Some(s) = cur {
                if board.piece_at(s).is_some() {
                    if is(Some(s), &kinds) {
                        return true;
                    }
                    break;
                }
                cur = s.offset(dr, dc);
            }
        }
    }

    false
}

/// True when the king of color `c` is not attacked, or when `c` has no king.
pub fn is_king_safe(board: &Board, c: Color) -> bool {
    match board.king_sq(c) {
        Some(ksq) => !is_square_attacked(board, ksq, c.other()),
        None => true,
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
