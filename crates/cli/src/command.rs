//! Parsing of input lines into front end commands

use chess_core::{Difficulty, Square};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Click one square
    Click(Square),
    /// Two clicks in a row, e.g. `e2e4`
    ClickPair(Square, Square),
    NewGame,
    SetDifficulty(Difficulty),
    /// List every move white has
    Moves,
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  e2          click a square (select a piece, or move the selected piece)
  6 4         click a square by row and column (row 0 is black's side)
  e2e4        select and move in one go
  moves       list every move white has
  level <d>   set difficulty: easy, medium, hard
  new         start a new game
  board       redraw the board
  help        show this text
  quit        leave";

/// Parse one input line. Keywords and coordinates are case-insensitive.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let lowered = line.to_ascii_lowercase();
    let parts: Vec<&str> = lowered.split_whitespace().collect();
    match parts.as_slice() {
        [] => Command::Show,
        ["quit"] | ["exit"] | ["q"] => Command::Quit,
        ["new"] | ["reset"] => Command::NewGame,
        ["board"] | ["show"] => Command::Show,
        ["help"] | ["?"] => Command::Help,
        ["moves"] => Command::Moves,
        ["level", d] | ["difficulty", d] => match d.parse() {
            Ok(d) => Command::SetDifficulty(d),
            Err(_) => Command::Unknown(line.to_string()),
        },
        [row, col] => match (row.parse::<u8>(), col.parse::<u8>()) {
            (Ok(r), Ok(c)) => Square::new(r, c)
                .map(Command::Click)
                .unwrap_or_else(|| Command::Unknown(line.to_string())),
            _ => Command::Unknown(line.to_string()),
        },
        [word] if word.len() == 2 => Square::from_coord(word)
            .map(Command::Click)
            .unwrap_or_else(|| Command::Unknown(line.to_string())),
        [word] if word.len() == 4 && word.is_ascii() => {
            match (Square::from_coord(&word[..2]), Square::from_coord(&word[2..])) {
                (Some(from), Some(to)) => Command::ClickPair(from, to),
                _ => Command::Unknown(line.to_string()),
            }
        }
        _ => Command::Unknown(line.to_string()),
    }
}
