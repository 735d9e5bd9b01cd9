use crate::{
    board::{Board, Player},
    window::windows,
};

/// The outcome of a position
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

/// true if `player` owns every tile of some window
pub fn is_winner(board: &Board, player: Player) -> bool {
    windows(board).any(|window| window.is_line_of(player.cell()))
}

pub fn is_game_over(board: &Board) -> bool {
    is_winner(board, Player::One) || is_winner(board, Player::Two) || board.is_full()
}

/// Classifies the position, checking player one's lines first
pub fn game_state(board: &Board) -> GameState {
    if is_winner(board, Player::One) {
        GameState::PlayerOneWin
    } else if is_winner(board, Player::Two) {
        GameState::PlayerTwoWin
    } else if board.is_full() {
        GameState::Draw
    } else {
        GameState::Playing
    }
}
