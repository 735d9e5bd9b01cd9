//! A computer opponent for the board game 'Connect 4'
//!
//! This agent picks its moves with a fixed-depth negamax search with
//! alpha-beta pruning, scoring the leaves of the game tree with a
//! heuristic built from every four-cell line on the board.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_negamax::{board::Board, solver::Solver};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one threatens the bottom row, player two is to move
//! let (board, player) = Board::from_moves("11223")?;
//! let mut solver = Solver::new(board, player, 1);
//!
//! assert_eq!(solver.find_best_move(), Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod window;

pub mod eval;

pub mod rules;

pub mod config;

pub mod solver;

pub use board::{Board, Cell, Player};
pub use config::SearchConfig;
pub use error::MoveError;
pub use rules::{is_game_over, is_winner, GameState};
pub use solver::{find_best_move, Solver};

mod test;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const LINE_LENGTH: usize = 4;

// a line of four must fit on the board in every direction
const_assert!(WIDTH >= LINE_LENGTH && HEIGHT >= LINE_LENGTH);
