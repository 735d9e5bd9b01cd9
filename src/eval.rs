//! Heuristic scoring of board positions

use crate::{
    board::{Board, Cell, Player},
    window::{windows, Window},
};

/// A completed line for the scoring player
pub const FOUR_SCORE: i32 = 1000;
/// Three of the scoring player's tiles and one free tile
pub const THREE_SCORE: i32 = 5;
/// Two of the scoring player's tiles and two free tiles
pub const TWO_SCORE: i32 = 2;
/// Three of the opponent's tiles and one free tile
pub const OPPONENT_THREE_PENALTY: i32 = -4;

/// Scores a single window for `player`
///
/// Only the best of the player's own patterns counts, while the opponent
/// penalty is added on top independently.
pub fn evaluate_window(window: &Window, player: Player) -> i32 {
    let own = window.count(player.cell());
    let opponent = window.count(player.opponent().cell());
    let empty = window.count(Cell::Empty);

    let mut score = match (own, empty) {
        (4, _) => FOUR_SCORE,
        (3, 1) => THREE_SCORE,
        (2, 2) => TWO_SCORE,
        _ => 0,
    };

    if opponent == 3 && empty == 1 {
        score += OPPONENT_THREE_PENALTY;
    }

    score
}

/// Scores the whole board for `player` by summing over every window
pub fn evaluate(board: &Board, player: Player) -> i32 {
    windows(board)
        .map(|window| evaluate_window(&window, player))
        .sum()
}
