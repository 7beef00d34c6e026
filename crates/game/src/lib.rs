//! Retro Chess turn engine
//!
//! Owns the authoritative game state for a human (white) against a computer
//! opponent (black):
//! - square selection and destination highlighting
//! - validated move application with capture tallies
//! - opponent turns, including delayed turns that a reset cancels
//! - JSON-ready snapshots for front ends

mod game;
mod snapshot;

pub use game::*;
pub use snapshot::*;
