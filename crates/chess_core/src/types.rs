use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
    /// Row delta of a pawn step: white advances toward row 0.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
    /// Row a pawn of this color starts on.
    pub fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase letter used in board diagrams.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Diagram letter: uppercase for white, lowercase for black.
    pub fn symbol(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_symbol(c: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { color, kind })
    }

    /// Unicode glyph shown on the board and in the capture tallies.
    pub fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

/// A board coordinate. Row 0 is black's back rank, row 7 is white's.
///
/// Always on the board: every constructor, deserialization included, is
/// bounds-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Square {
    row: u8,
    col: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("square ({row}, {col}) is off the board")]
pub struct OffBoardSquare {
    pub row: u8,
    pub col: u8,
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            row: u8,
            col: u8,
        }

        let Raw { row, col } = Raw::deserialize(deserializer)?;
        Square::new(row, col).ok_or_else(|| de::Error::custom(OffBoardSquare { row, col }))
    }
}

impl Square {
    /// Checked constructor; `None` when either coordinate is off the board.
    pub fn new(row: u8, col: u8) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// Square reached by stepping `(dr, dc)`, if it stays on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        sq(self.row as i8 + dr, self.col as i8 + dc)
    }

    /// Iterate all 64 squares, row by row from row 0.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }

    /// Parse algebraic notation (`a8` is row 0 col 0, `h1` is row 7 col 7).
    pub fn from_coord(c: &str) -> Option<Square> {
        let b = c.as_bytes();
        if b.len() != 2 {
            return None;
        }
        let f = b[0].to_ascii_lowercase();
        let r = b[1];
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
            return None;
        }
        Some(Square {
            row: 7 - (r - b'1'),
            col: f - b'a',
        })
    }

    pub fn to_coord(self) -> String {
        let f = (b'a' + self.col) as char;
        let r = (b'8' - self.row) as char;
        format!("{f}{r}")
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_coord())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

// Helpers
pub fn sq(row: i8, col: i8) -> Option<Square> {
    if (0..8).contains(&row) && (0..8).contains(&col) {
        Some(Square {
            row: row as u8,
            col: col as u8,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_roundtrip_corners() {
        assert_eq!(Square::from_coord("a8"), Square::new(0, 0));
        assert_eq!(Square::from_coord("h1"), Square::new(7, 7));
        assert_eq!(Square::from_coord("e2"), Square::new(6, 4));
        assert_eq!(Square::new(4, 4).unwrap().to_coord(), "e4");
    }

    #[test]
    fn test_coord_rejects_garbage() {
        assert_eq!(Square::from_coord("i1"), None);
        assert_eq!(Square::from_coord("a9"), None);
        assert_eq!(Square::from_coord("a"), None);
        assert_eq!(Square::from_coord("e22"), None);
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Square::new(0, 0).unwrap();
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(1, 1), Square::new(1, 1));
        assert_eq!(Square::new(9, 0), None);
    }

    #[test]
    fn test_deserialize_rejects_off_board() {
        let e4: Square = serde_json::from_str(r#"{"row":4,"col":4}"#).unwrap();
        assert_eq!(Some(e4), Square::from_coord("e4"));
        assert_eq!(serde_json::to_string(&e4).unwrap(), r#"{"row":4,"col":4}"#);

        assert!(serde_json::from_str::<Square>(r#"{"row":8,"col":0}"#).is_err());
        assert!(serde_json::from_str::<Square>(r#"{"row":0,"col":200}"#).is_err());
        let mv = r#"{"from":{"row":6,"col":4},"to":{"row":8,"col":4}}"#;
        assert!(serde_json::from_str::<Move>(mv).is_err());
    }

    #[test]
    fn test_symbols_and_glyphs() {
        let wq = Piece::new(Color::White, PieceKind::Queen);
        let bn = Piece::new(Color::Black, PieceKind::Knight);
        assert_eq!(wq.symbol(), 'Q');
        assert_eq!(bn.symbol(), 'n');
        assert_eq!(wq.glyph(), '♕');
        assert_eq!(bn.glyph(), '♞');
        assert_eq!(Piece::from_symbol('Q'), Some(wq));
        assert_eq!(Piece::from_symbol('n'), Some(bn));
        assert_eq!(Piece::from_symbol('x'), None);
    }

    #[test]
    fn test_all_squares() {
        let all: Vec<Square> = Square::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], Square { row: 0, col: 0 });
        assert_eq!(all[63], Square { row: 7, col: 7 });
    }
}
