//! A move-selection engine for 'Sideways Four', a connection game on a 7x7
//! grid where markers are pushed into a row from its left or right end
//!
//! The engine picks a move for either player at one of three tiers: a
//! uniformly random legal move, or a depth-limited minimax search with
//! alpha-beta pruning over a heuristic evaluation.
//!
//! # Basic Usage
//!
//! ```
//! use sideways4_ai::{board::{Board, Move, Side, Symbol}, config::EngineConfig};
//! use sideways4_ai::difficulty::{BotPlayer, Difficulty};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::new();
//! board.play_checked(Move::new(3, Side::Left), Symbol::X)?;
//!
//! let mut bot = BotPlayer::new(EngineConfig::default().with_seed(1))?;
//! let reply = bot.choose_move(&board, Symbol::O, Difficulty::Medium);
//!
//! assert!(reply.is_some());
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod config;

pub mod difficulty;

pub mod error;

pub mod evaluation;

pub mod memo_cache;

pub mod search;

mod test;

pub use board::{Board, Cell, Move, Side, Symbol};
pub use difficulty::{BotPlayer, Difficulty};
pub use error::EngineError;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 7;

// a line of four has to fit in both directions
const_assert!(WIDTH >= board::LINE && HEIGHT >= board::LINE);

/// Pushes `symbol` into the board, `false` if the target row is full
pub fn apply_move(board: &mut Board, candidate: Move, symbol: Symbol) -> bool {
    board.apply_move(candidate, symbol)
}

/// Whether `symbol` has four in a row anywhere on the board
pub fn check_winner(board: &Board, symbol: Symbol) -> bool {
    board.has_four_in_a_row(symbol)
}

/// Whether no empty cell remains
pub fn board_full(board: &Board) -> bool {
    board.is_full()
}
