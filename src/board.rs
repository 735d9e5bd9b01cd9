use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};
use std::ops::Neg;

use crate::{error::MoveError, rules, HEIGHT, WIDTH};

/// The contents of a single tile
///
/// Tiles carry a signed value so that negating a cell swaps its owner:
/// player one is `+1`, player two is `-1` and an empty tile is `0`.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[repr(i8)]
pub enum Cell {
    PlayerTwo = -1,
    Empty = 0,
    PlayerOne = 1,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn value(self) -> i32 {
        self as i8 as i32
    }
}

impl Neg for Cell {
    type Output = Cell;

    fn neg(self) -> Self::Output {
        match self {
            Cell::PlayerOne => Cell::PlayerTwo,
            Cell::PlayerTwo => Cell::PlayerOne,
            Cell::Empty => Cell::Empty,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// One of the two sides of a game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// `+1` for player one, `-1` for player two
    pub fn sign(self) -> i32 {
        self.cell().value()
    }

    pub fn opponent(self) -> Self {
        -self
    }

    pub fn cell(self) -> Cell {
        Cell::from(self)
    }

    /// 1-indexed player number for display
    pub fn number(self) -> usize {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl Neg for Player {
    type Output = Player;

    fn neg(self) -> Self::Output {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// A Connect 4 board stored as a grid of cells
///
/// Row 0 is the top of the board and row `HEIGHT - 1` the bottom, so a
/// column is playable exactly when its row 0 cell is empty. Boards are
/// `Copy`: the search takes a fresh copy for every branch it explores.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Builds a board from a string of 1-indexed columns, players alternating
    /// from player one
    ///
    /// Returns the board and the player to move next.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<(Self, Player)> {
        let mut board = Self::new();
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    // abort if the position is decided at any point
                    if rules::is_game_over(&board) {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    board.play(column - 1, player)?;
                    player = -player;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok((board, player))
    }

    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    pub fn is_valid_move(&self, column: usize) -> bool {
        column < WIDTH && self.cells[0][column].is_empty()
    }

    /// Iterates the playable columns in ascending order
    pub fn legal_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&column| self.is_valid_move(column))
    }

    /// Returns a copy of this board with `player`'s tile dropped into `column`
    pub fn make_move(&self, column: usize, player: Player) -> Result<Self, MoveError> {
        let mut next = *self;
        next.play(column, player)?;
        Ok(next)
    }

    /// Drops `player`'s tile into `column`, returning the row it landed in
    pub fn play(&mut self, column: usize, player: Player) -> Result<usize, MoveError> {
        if column >= WIDTH {
            return Err(MoveError::ColumnOutOfRange { column });
        }
        // scan from the bottom up for the first free tile
        for row in (0..HEIGHT).rev() {
            if self.cells[row][column].is_empty() {
                self.cells[row][column] = player.cell();
                return Ok(row);
            }
        }
        Err(MoveError::ColumnFull { column })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    pub fn column_height(&self, column: usize) -> usize {
        (0..HEIGHT)
            .filter(|&row| !self.cells[row][column].is_empty())
            .count()
    }

    pub fn num_moves(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| !cell.is_empty()).count()
    }

    /// Returns the board with the owner of every tile swapped
    pub fn flipped(&self) -> Self {
        let mut flipped = *self;
        for cell in flipped.cells.iter_mut().flatten() {
            *cell = -*cell;
        }
        flipped
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..HEIGHT {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        // the cursor now sits on the line of the bottom row
        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for (row, cells) in self.cells.iter().enumerate() {
            for (column, cell) in cells.iter().enumerate() {
                let (pos_x, pos_y) = (
                    origin_x + column as u16,
                    origin_y - (HEIGHT - 1 - row) as u16,
                );

                stdout
                    .queue(MoveTo(pos_x, pos_y))?
                    .queue(PrintStyledContent(
                        style("O")
                            .attribute(Attribute::Bold)
                            .on(Color::DarkBlue)
                            .with(match cell {
                                Cell::PlayerOne => Color::Red,
                                Cell::PlayerTwo => Color::Yellow,
                                Cell::Empty => Color::DarkBlue,
                            }),
                    ))?;
            }
        }
        stdout
            .queue(MoveTo(origin_x + WIDTH as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
