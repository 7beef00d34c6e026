//! Game state management: selection, move application and opponent turns

use chess_core::{generate_moves, Board, Color, Difficulty, Move, OpponentPolicy, Piece, Square};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The side driven by square clicks.
pub const HUMAN: Color = Color::White;
/// The side driven by an [`OpponentPolicy`].
pub const OPPONENT: Color = Color::Black;

/// Game status. Only `Playing` is ever entered: nothing detects check,
/// mate or draws yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Playing,
    Check,
    Checkmate,
    Draw,
}

/// Glyphs of captured pieces, in capture order, keyed by the capturing side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureTally {
    /// Pieces taken by white
    pub white: Vec<char>,
    /// Pieces taken by black
    pub black: Vec<char>,
}

impl CaptureTally {
    pub fn by(&self, capturer: Color) -> &[char] {
        match capturer {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn record(&mut self, capturer: Color, piece: Piece) {
        match capturer {
            Color::White => self.white.push(piece.glyph()),
            Color::Black => self.black.push(piece.glyph()),
        }
    }
}

/// Why a move was refused. The state is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("game is not in progress")]
    NotPlaying,
    #[error("no piece on {0}")]
    EmptySquare(Square),
    #[error("piece on {square} belongs to {owner}, but {to_move} is to move")]
    WrongSide {
        square: Square,
        owner: Color,
        to_move: Color,
    },
    #[error("{to} is not a destination of the piece on {from}")]
    NotADestination { from: Square, to: Square },
}

/// Result of a square click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Not the human's turn, or the game is over.
    Ignored,
    /// A human piece is now selected with these destinations.
    Selected {
        square: Square,
        destinations: Vec<Square>,
    },
    /// No piece is selected any more.
    Cleared,
    /// The click completed a move.
    Moved { mv: Move, captured: Option<Piece> },
}

/// Result of asking the opponent to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentOutcome {
    Moved { mv: Move, captured: Option<Piece> },
    /// The policy returned no move; the turn does not advance.
    Stalled,
    /// The ticket was issued before a reset.
    Stale,
    /// It is not the opponent's turn, or the game is over.
    NotOpponentTurn,
    /// The policy proposed a move the generator does not allow.
    Rejected(MoveError),
}

/// Ticket for a scheduled opponent move. Resolving it after a reset is a
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTurn {
    generation: u64,
}

/// Represents the current state of a chess game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Current board
    board: Board,
    /// True while white (the human) is to move
    white_to_move: bool,
    /// Game status
    status: GameStatus,
    /// Captured glyphs per capturing side
    captured: CaptureTally,
    /// Currently selected square (for move input)
    selected: Option<Square>,
    /// Destinations of the selected piece
    destinations: Vec<Square>,
    /// Last move (for highlighting)
    last_move: Option<Move>,
    /// Opponent tier
    difficulty: Difficulty,
    /// Bumped on reset to invalidate pending opponent turns
    generation: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl GameState {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_board(Board::startpos(), difficulty)
    }

    /// Start from an arbitrary board, white to move.
    pub fn with_board(board: Board, difficulty: Difficulty) -> Self {
        Self {
            board,
            white_to_move: true,
            status: GameStatus::Playing,
            captured: CaptureTally::default(),
            selected: None,
            destinations: Vec::new(),
            last_move: None,
            difficulty,
            generation: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn white_to_move(&self) -> bool {
        self.white_to_move
    }

    pub fn side_to_move(&self) -> Color {
        if self.white_to_move {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn captured(&self) -> &CaptureTally {
        &self.captured
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn destinations(&self) -> &[Square] {
        &self.destinations
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Takes effect from the opponent's next turn.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn is_selected(&self, sq: Square) -> bool {
        self.selected == Some(sq)
    }

    pub fn is_destination(&self, sq: Square) -> bool {
        self.destinations.contains(&sq)
    }

    pub fn is_human_turn(&self) -> bool {
        self.white_to_move && self.status == GameStatus::Playing
    }

    /// Short banner for the turn indicator.
    pub fn status_line(&self) -> &'static str {
        if self.white_to_move {
            "YOUR TURN"
        } else {
            "AI THINKING..."
        }
    }

    /// Handle a click on `sq`: complete a pending move, (re)select a human
    /// piece, or clear the selection.
    pub fn select_square(&mut self, sq: Square) -> SelectOutcome {
        if !self.is_human_turn() {
            return SelectOutcome::Ignored;
        }

        // If a piece is selected and clicking on one of its destinations, make the move
        if let Some(from) = self.selected {
            if self.is_destination(sq) {
                return match self.apply_move(from, sq) {
                    Ok(captured) => SelectOutcome::Moved {
                        mv: Move::new(from, sq),
                        captured,
                    },
                    Err(e) => {
                        warn!("cached destination {from}->{sq} refused: {e}");
                        self.clear_selection();
                        SelectOutcome::Cleared
                    }
                };
            }
        }

        // If clicking on a piece of the human side, select it
        if let Some(piece) = self.board.piece_at(sq) {
            if piece.color == HUMAN {
                self.selected = Some(sq);
                self.destinations = generate_moves(&self.board, sq);
                debug!("selected {sq}: {} destination(s)", self.destinations.len());
                return SelectOutcome::Selected {
                    square: sq,
                    destinations: self.destinations.clone(),
                };
            }
        }

        self.clear_selection();
        SelectOutcome::Cleared
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.destinations.clear();
    }

    /// Apply a move for the side to move.
    ///
    /// `to` must be one of the generated destinations of the piece on
    /// `from`. Nothing checks whether the mover's king ends up attacked.
    /// Returns the captured piece, if any.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<Option<Piece>, MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::NotPlaying);
        }
        let mover = self.side_to_move();
        let piece = self.board.piece_at(from).ok_or(MoveError::EmptySquare(from))?;
        if piece.color != mover {
            return Err(MoveError::WrongSide {
                square: from,
                owner: piece.color,
                to_move: mover,
            });
        }
        if !generate_moves(&self.board, from).contains(&to) {
            return Err(MoveError::NotADestination { from, to });
        }

        // Build the next board on a copy and swap it in whole.
        let mut next = self.board;
        let captured = next.relocate(from, to);
        if let Some(victim) = captured {
            self.captured.record(mover, victim);
        }
        self.board = next;
        self.last_move = Some(Move::new(from, to));
        self.white_to_move = !self.white_to_move;
        self.clear_selection();

        match captured {
            Some(victim) => info!("{mover} {from}->{to} takes {}", victim.glyph()),
            None => info!("{mover} {from}->{to}"),
        }
        Ok(captured)
    }

    /// Let `policy` choose and play the opponent's move right away.
    ///
    /// If the policy comes back empty the state is left exactly as it was,
    /// so the turn stays with the opponent.
    pub fn apply_opponent_turn(&mut self, policy: &mut dyn OpponentPolicy) -> OpponentOutcome {
        if self.white_to_move || self.status != GameStatus::Playing {
            return OpponentOutcome::NotOpponentTurn;
        }

        let mv = match policy.choose_move(&self.board, OPPONENT) {
            Some(mv) => mv,
            None => {
                debug!("{} produced no move; turn stays with {}", policy.name(), OPPONENT);
                return OpponentOutcome::Stalled;
            }
        };

        match self.apply_move(mv.from, mv.to) {
            Ok(captured) => OpponentOutcome::Moved { mv, captured },
            Err(e) => {
                warn!("{} proposed {mv}: {e}", policy.name());
                OpponentOutcome::Rejected(e)
            }
        }
    }

    /// Issue a ticket for a delayed opponent move, if the opponent is due.
    pub fn begin_opponent_turn(&self) -> Option<PendingTurn> {
        if self.white_to_move || self.status != GameStatus::Playing {
            return None;
        }
        Some(PendingTurn {
            generation: self.generation,
        })
    }

    /// Resolve a ticket from [`begin_opponent_turn`](Self::begin_opponent_turn).
    /// Tickets issued before the last reset resolve to `Stale`.
    pub fn resolve_opponent_turn(
        &mut self,
        ticket: PendingTurn,
        policy: &mut dyn OpponentPolicy,
    ) -> OpponentOutcome {
        if ticket.generation != self.generation {
            debug!(
                "dropping opponent turn from generation {} (now {})",
                ticket.generation, self.generation
            );
            return OpponentOutcome::Stale;
        }
        self.apply_opponent_turn(policy)
    }

    /// Back to the starting position, white to move, nothing captured.
    /// Pending opponent turns become stale.
    pub fn reset(&mut self) {
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            generation,
            ..Self::new(self.difficulty)
        };
        info!("new game ({} opponent)", self.difficulty);
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
