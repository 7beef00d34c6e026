//! Retro Chess terminal front end
//!
//! Play white against the random-sampling opponent:
//! - type squares (`e2`, then `e4`) to select and move
//! - the opponent replies after a short, cancellable pause
//! - `new` restarts, and cancels a reply that has not happened yet
//!
//! # Usage
//!
//! ```bash
//! cargo run -p chess_cli -- --difficulty hard --delay-ms 300
//! cargo run -p chess_cli -- --config retro_chess.toml --json
//! ```

mod command;
mod config;
mod render;

use anyhow::{Context, Result};
use chess_core::{pseudo_moves, Color, Difficulty, OpponentPolicy};
use chess_game::{GameSnapshot, GameState, OpponentOutcome, PendingTurn, SelectOutcome};
use clap::Parser;
use command::{parse_command, Command, HELP};
use config::CliConfig;
use log::{info, warn};
use random_opponent::RandomOpponent;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{sleep_until, Instant};

#[derive(Parser, Debug)]
#[command(name = "chess_cli", about = "Play Retro Chess against the computer")]
struct Args {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Opponent difficulty: easy, medium or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Pause before the opponent replies, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Seed the opponent for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Print JSON snapshots instead of drawing the board
    #[arg(long)]
    json: bool,

    /// Starting placement, FEN style
    #[arg(long)]
    position: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> Result<CliConfig> {
        let mut cfg = match &self.config {
            Some(path) => CliConfig::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => CliConfig::default(),
        };
        if let Some(d) = self.difficulty {
            cfg.difficulty = d;
        }
        if let Some(ms) = self.delay_ms {
            cfg.opponent_delay_ms = ms;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.json {
            cfg.json = true;
        }
        if self.position.is_some() {
            cfg.position = self.position;
        }
        Ok(cfg)
    }
}

/// Front end session: the game, its opponent and the scheduled reply.
struct Session {
    cfg: CliConfig,
    game: GameState,
    opponent: RandomOpponent,
    /// Opponent reply waiting for its deadline
    pending: Option<(PendingTurn, Instant)>,
}

impl Session {
    fn new(cfg: CliConfig) -> Result<Self> {
        let board = cfg.starting_board()?;
        let game = GameState::with_board(board, cfg.difficulty);
        let opponent = match cfg.seed {
            Some(seed) => RandomOpponent::with_seed(cfg.difficulty, seed),
            None => RandomOpponent::new(cfg.difficulty),
        };
        Ok(Self {
            cfg,
            game,
            opponent,
            pending: None,
        })
    }

    fn show(&self) -> Result<()> {
        if self.cfg.json {
            let json = GameSnapshot::from(&self.game)
                .to_json()
                .context("serializing snapshot")?;
            println!("{json}");
        } else {
            println!("{}\n", render::render_frame(&self.game));
        }
        Ok(())
    }

    fn say(&self, msg: &str) {
        if !self.cfg.json {
            println!("{msg}");
        }
    }

    /// Schedule the opponent if the human just handed over the turn.
    fn schedule_opponent(&mut self) {
        if let Some(ticket) = self.game.begin_opponent_turn() {
            self.pending = Some((ticket, Instant::now() + self.cfg.opponent_delay()));
        }
    }

    fn click(&mut self, sq: chess_core::Square) {
        match self.game.select_square(sq) {
            SelectOutcome::Moved { .. } => self.schedule_opponent(),
            SelectOutcome::Ignored => self.say("wait for the opponent"),
            SelectOutcome::Selected { .. } | SelectOutcome::Cleared => {}
        }
    }

    /// Returns false when the session should end.
    fn handle(&mut self, cmd: Command) -> Result<bool> {
        match cmd {
            Command::Quit => return Ok(false),
            Command::Click(sq) => self.click(sq),
            Command::ClickPair(from, to) => {
                self.click(from);
                if self.game.is_selected(from) {
                    self.click(to);
                }
            }
            Command::NewGame => {
                // A pending reply stays scheduled; its ticket is stale now.
                self.game.reset();
                self.opponent.new_game();
            }
            Command::SetDifficulty(d) => {
                self.game.set_difficulty(d);
                self.opponent.set_difficulty(d);
                info!("difficulty set to {d}");
            }
            Command::Moves => {
                let moves: Vec<String> = pseudo_moves(self.game.board(), Color::White)
                    .iter()
                    .map(|m| m.to_string())
                    .collect();
                self.say(&moves.join(" "));
                return Ok(true);
            }
            Command::Show => {}
            Command::Help => {
                self.say(HELP);
                return Ok(true);
            }
            Command::Unknown(text) => {
                self.say(&format!("unrecognized input '{text}' (type help)"));
                return Ok(true);
            }
        }
        self.show()?;
        Ok(true)
    }

    fn opponent_due(&mut self, ticket: PendingTurn) -> Result<()> {
        match self.game.resolve_opponent_turn(ticket, &mut self.opponent) {
            OpponentOutcome::Moved { .. } => self.show()?,
            OpponentOutcome::Stalled => {
                warn!(
                    "{} found no move within {} samples; type `new` to restart",
                    self.opponent.name(),
                    self.game.difficulty().attempt_budget()
                );
                self.say("the opponent is stuck");
            }
            OpponentOutcome::Stale | OpponentOutcome::NotOpponentTurn => {}
            OpponentOutcome::Rejected(e) => warn!("opponent move refused: {e}"),
        }
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let cfg = args.into_config()?;
    info!(
        "starting: {} opponent, {} ms delay",
        cfg.difficulty, cfg.opponent_delay_ms
    );
    let mut session = Session::new(cfg)?;
    session.say("Retro Chess. You are white. Type help for commands.");
    session.show()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let deadline = session.pending.map(|(_, at)| at);
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                if !session.handle(parse_command(&line))? {
                    break;
                }
            }
            _ = async { sleep_until(deadline.unwrap_or_else(Instant::now)).await }, if deadline.is_some() => {
                if let Some((ticket, _)) = session.pending.take() {
                    session.opponent_due(ticket)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Board, Square};

    fn s(coord: &str) -> Square {
        Square::from_coord(coord).unwrap()
    }

    fn session() -> Session {
        Session::new(CliConfig {
            seed: Some(7),
            json: true,
            ..CliConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_click_pair_moves_and_schedules_reply() {
        let mut session = session();
        assert!(session.handle(parse_command("e2e4")).unwrap());

        assert!(session.game.board().is_empty(s("e2")));
        assert!(session.game.board().piece_at(s("e4")).is_some());
        assert!(!session.game.white_to_move());

        let (ticket, _) = session.pending.take().unwrap();
        session.opponent_due(ticket).unwrap();
        assert!(session.game.white_to_move());
    }

    #[test]
    fn test_click_pair_from_enemy_piece_does_nothing() {
        let mut session = session();
        session.handle(parse_command("e7e5")).unwrap();
        assert_eq!(session.game.board(), &Board::startpos());
        assert!(session.game.white_to_move());
        assert!(session.pending.is_none());
    }

    #[test]
    fn test_new_game_during_pending_reply() {
        let mut session = session();
        session.handle(parse_command("d2d4")).unwrap();
        session.handle(Command::NewGame).unwrap();

        // The reply stays scheduled but no longer applies.
        let (ticket, _) = session.pending.take().unwrap();
        session.opponent_due(ticket).unwrap();
        assert_eq!(session.game.board(), &Board::startpos());
        assert!(session.game.white_to_move());
        assert_eq!(session.game.last_move(), None);
    }

    #[test]
    fn test_level_and_quit() {
        let mut session = session();
        session.handle(parse_command("level easy")).unwrap();
        assert_eq!(session.game.difficulty(), Difficulty::Easy);
        assert_eq!(session.opponent.difficulty(), Difficulty::Easy);
        assert!(!session.handle(Command::Quit).unwrap());
    }
}
