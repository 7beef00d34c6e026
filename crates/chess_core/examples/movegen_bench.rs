//! Move generation benchmark for profiling with cargo-flamegraph.
//!
//! Runs `pseudo_moves` for both sides over a handful of boards, many times
//! each, and reports boards per second.
//!
//! Usage:
//!   cargo flamegraph --example movegen_bench -p chess_core

use chess_core::{pseudo_moves, Board, Color, START_DIAGRAM};
use std::time::Instant;

/// Boards covering different game phases
const TEST_BOARDS: &[(&str, &str)] = &[
    ("Start", START_DIAGRAM),
    ("e4", "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
    ),
    (
        "Open middlegame",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1",
    ),
    ("Rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8"),
    ("Lone queens", "3q4/8/8/8/8/8/8/3Q4"),
];

const ITERATIONS: usize = 100_000;

fn main() {
    println!("=== Move Generation Benchmark ===");
    println!("Iterations per board: {ITERATIONS}");
    println!();

    let mut total_moves = 0usize;
    let mut total_time = std::time::Duration::ZERO;

    for (name, diagram) in TEST_BOARDS {
        let board = match Board::from_diagram(diagram) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("{name}: {e}");
                continue;
            }
        };

        print!("{name:.<20}");

        let start = Instant::now();
        let mut moves_generated = 0usize;

        for _ in 0..ITERATIONS {
            moves_generated += pseudo_moves(&board, Color::White).len();
            moves_generated += pseudo_moves(&board, Color::Black).len();
        }

        let elapsed = start.elapsed();
        total_moves += moves_generated;
        total_time += elapsed;

        let moves_per_board = moves_generated as f64 / ITERATIONS as f64;
        let bps = if elapsed.as_secs_f64() > 0.0 {
            ITERATIONS as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        println!(" {moves_per_board:>5.1} moves/board, {bps:>10.0} boards/sec ({elapsed:>8.3?})");
    }

    println!();
    println!("{:=<70}", "");
    let avg = if total_time.as_secs_f64() > 0.0 {
        (ITERATIONS * TEST_BOARDS.len()) as f64 / total_time.as_secs_f64()
    } else {
        0.0
    };
    println!("TOTAL: {total_moves} moves in {total_time:.3?} ({avg:.0} boards/sec)");
}
