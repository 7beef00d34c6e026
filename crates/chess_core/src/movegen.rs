use crate::{board::Board, types::*};

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Generate the destinations of the piece on `from`, returning a freshly
/// allocated vector. Empty squares yield no destinations.
pub fn generate_moves(board: &Board, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    generate_moves_into(board, from, &mut out);
    out
}

/// Generate destinations into the provided buffer, reusing it across calls.
///
/// Moves are pseudo-legal: nothing stops a piece from leaving its own king
/// attacked.
pub fn generate_moves_into(board: &Board, from: Square, out: &mut Vec<Square>) {
    out.clear();
    let pc = match board.piece_at(from) {
        Some(p) => p,
        None => return,
    };
    match pc.kind {
        PieceKind::Pawn => gen_pawn(board, from, pc.color, out),
        PieceKind::Knight => gen_steps(board, from, pc.color, out, &KNIGHT_DELTAS),
        PieceKind::Bishop => gen_slider(board, from, pc.color, out, &DIAGONALS),
        PieceKind::Rook => gen_slider(board, from, pc.color, out, &ORTHOGONALS),
        PieceKind::Queen => {
            gen_slider(board, from, pc.color, out, &DIAGONALS);
            gen_slider(board, from, pc.color, out, &ORTHOGONALS);
        }
        PieceKind::King => gen_steps(board, from, pc.color, out, &KING_DELTAS),
    }
}

/// Every move available to side `c`, origin squares in row order.
pub fn pseudo_moves(board: &Board, c: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    let mut dests = Vec::with_capacity(28);
    for from in board.occupied_by(c) {
        generate_moves_into(board, from, &mut dests);
        out.extend(dests.iter().map(|&to| Move::new(from, to)));
    }
    out
}

fn gen_pawn(board: &Board, from: Square, c: Color, out: &mut Vec<Square>) {
    let dir = c.forward();

    // forward 1
    if let Some(to) = from.offset(dir, 0) {
        if board.is_empty(to) {
            out.push(to);

            // forward 2 from the start row, regardless of move history
            if from.row() == c.pawn_start_row() {
                if let Some(to2) = from.offset(2 * dir, 0) {
                    if board.is_empty(to2) {
                        out.push(to2);
                    }
                }
            }
        }
    }

    // captures only, no en passant
    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc) {
            if let Some(tpc) = board.piece_at(to) {
                if tpc.color != c {
                    out.push(to);
                }
            }
        }
    }
}

fn gen_steps(board: &Board, from: Square, c: Color, out: &mut Vec<Square>, deltas: &[(i8, i8)]) {
    for &(dr, dc) in deltas {
        if let Some(to) = from.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => out.push(to),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, from: Square, c: Color, out: &mut Vec<Square>, dirs: &[(i8, i8)]) {
    for &(dr, dc) in dirs {
        let mut cur = from.offset(dr, dc);
        while let Some(to) = cur {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => {
                    out.push(to);
                    break;
                }
                _ => break,
            }
            cur = to.offset(dr, dc);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
