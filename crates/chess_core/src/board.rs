use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Piece placement of the standard starting position.
pub const START_DIAGRAM: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("expected 8 rows separated by '/', found {0}")]
    RowCount(usize),
    #[error("invalid piece character '{ch}' in row {row}")]
    InvalidPiece { row: usize, ch: char },
    #[error("row {row} describes {cols} columns, expected 8")]
    RowWidth { row: usize, cols: usize },
}

/// An 8x8 grid of optional pieces, indexed `[row][col]`.
///
/// Boards are plain values: every transition copies the grid, so two game
/// states never share cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty();

        // Pawns
        for col in 0..8 {
            b.cells[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            b.cells[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
        }
        // Back ranks
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            b.cells[0][col] = Some(Piece::new(Color::Black, kind));
            b.cells[7][col] = Some(Piece::new(Color::White, kind));
        }
        b
    }

    /// Parse the placement field of a FEN string. Rows are listed from row 0
    /// (black's side) to row 7.
    pub fn from_diagram(diagram: &str) -> Result<Self, BoardParseError> {
        let placement = diagram.split_whitespace().next().unwrap_or("");
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(BoardParseError::RowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, row_str) in rows.iter().enumerate() {
            let mut col = 0usize;
            for ch in row_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d as usize;
                } else {
                    let piece =
                        Piece::from_symbol(ch).ok_or(BoardParseError::InvalidPiece { row, ch })?;
                    if col >= 8 {
                        return Err(BoardParseError::RowWidth { row, cols: col + 1 });
                    }
                    board.cells[row][col] = Some(piece);
                    col += 1;
                }
            }
            if col != 8 {
                return Err(BoardParseError::RowWidth { row, cols: col });
            }
        }
        Ok(board)
    }

    pub fn to_diagram(&self) -> String {
        let mut out = String::with_capacity(72);
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                out.push('/');
            }
            let mut run = 0;
            for cell in cells {
                match cell {
                    Some(pc) => {
                        if run > 0 {
                            out.push_str(&run.to_string());
                            run = 0;
                        }
                        out.push(pc.symbol());
                    }
                    None => run += 1,
                }
            }
            if run > 0 {
                out.push_str(&run.to_string());
            }
        }
        out
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.cells[sq.row() as usize][sq.col() as usize] = pc;
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Squares holding a piece of `c`, row by row.
    pub fn occupied_by(&self, c: Color) -> Vec<Square> {
        Square::all()
            .filter(|&s| matches!(self.piece_at(s), Some(pc) if pc.color == c))
            .collect()
    }

    pub fn king_sq(&self, c: Color) -> Option<Square> {
        Square::all().find(|&s| self.piece_at(s) == Some(Piece::new(c, PieceKind::King)))
    }

    /// Relocate whatever sits on `from` to `to`, returning the previous
    /// occupant of `to`. No rule checks.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let captured = self.piece_at(to);
        let moving = self.piece_at(from);
        self.set_piece(to, moving);
        self.set_piece(from, None);
        captured
    }
}

/// Glyph grid with coordinates, white at the bottom.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for cell in cells {
                match cell {
                    Some(pc) => write!(f, "{} ", pc.glyph())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_startpos_layout() {
        let b = Board::startpos();
        assert_eq!(
            b.piece_at(Square::new(0, 4).unwrap()),
            Some(Piece::new(Color::Black, PieceKind::King))
        );
        assert_eq!(
            b.piece_at(Square::new(7, 3).unwrap()),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(b.occupied_by(Color::White).len(), 16);
        assert_eq!(b.occupied_by(Color::Black).len(), 16);
        for row in 2..6 {
            for col in 0..8 {
                assert!(b.is_empty(Square::new(row, col).unwrap()));
            }
        }
    }

    #[test]
    fn test_diagram_matches_startpos() {
        assert_eq!(Board::from_diagram(START_DIAGRAM).unwrap(), Board::startpos());
        assert_eq!(Board::startpos().to_diagram(), START_DIAGRAM);
    }

    #[test]
    fn test_diagram_accepts_full_fen() {
        let b = Board::from_diagram("8/8/8/8/8/8/8/R6k w - - 0 1").unwrap();
        assert_eq!(
            b.piece_at(Square::new(7, 0).unwrap()),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(b.to_diagram(), "8/8/8/8/8/8/8/R6k");
    }

    #[test]
    fn test_diagram_errors() {
        assert_eq!(Board::from_diagram("8/8/8"), Err(BoardParseError::RowCount(3)));
        assert_eq!(
            Board::from_diagram("8/8/8/8/8/8/8/7x"),
            Err(BoardParseError::InvalidPiece { row: 7, ch: 'x' })
        );
        assert_eq!(
            Board::from_diagram("8/8/8/8/8/8/8/7"),
            Err(BoardParseError::RowWidth { row: 7, cols: 7 })
        );
        assert_eq!(
            Board::from_diagram("8/8/8/8/8/8/8/8K"),
            Err(BoardParseError::RowWidth { row: 7, cols: 9 })
        );
    }

    #[test]
    fn test_relocate_returns_captured() {
        let mut b = Board::startpos();
        let from = Square::new(7, 0).unwrap();
        let to = Square::new(1, 0).unwrap();
        let captured = b.relocate(from, to);
        assert_eq!(captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        assert!(b.is_empty(from));
        assert_eq!(b.piece_at(to), Some(Piece::new(Color::White, PieceKind::Rook)));
    }

    #[test]
    fn test_king_squares() {
        let b = Board::startpos();
        assert_eq!(b.king_sq(Color::White), Square::new(7, 4));
        assert_eq!(b.king_sq(Color::Black), Square::new(0, 4));
        assert_eq!(Board::empty().king_sq(Color::White), None);
    }
}
