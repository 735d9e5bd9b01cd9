//! Enumeration of every line of four tiles on the board
//!
//! Evaluation and win detection both read the board through [`windows`], so
//! the two always agree on which lines exist.

use crate::{
    board::{Board, Cell},
    HEIGHT, LINE_LENGTH, WIDTH,
};

/// The number of distinct lines of `LINE_LENGTH` tiles on the board
pub const NUM_WINDOWS: usize = HEIGHT * (WIDTH - (LINE_LENGTH - 1))
    + (HEIGHT - (LINE_LENGTH - 1)) * WIDTH
    + 2 * (HEIGHT - (LINE_LENGTH - 1)) * (WIDTH - (LINE_LENGTH - 1));

/// The (row, column) coordinates of the tiles in one line, anchor first
pub type Line = [(usize, usize); LINE_LENGTH];

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// bottom-left to top-right
    DiagonalUp,
    /// top-left to bottom-right
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalUp,
        Direction::DiagonalDown,
    ];

    /// (row, column) step between consecutive tiles, row 0 being the top
    pub const fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalUp => (-1, 1),
            Direction::DiagonalDown => (1, 1),
        }
    }
}

/// Builds the coordinates of every line, direction by direction, keeping only
/// anchors whose whole line stays on the board
const fn lines() -> [Line; NUM_WINDOWS] {
    let mut lines = [[(0, 0); LINE_LENGTH]; NUM_WINDOWS];
    let reach = LINE_LENGTH as isize - 1;
    let mut n = 0;
    let mut d = 0;
    while d < Direction::ALL.len() {
        let (dr, dc) = Direction::ALL[d].step();
        let mut row = 0;
        while row < HEIGHT {
            let mut column = 0;
            while column < WIDTH {
                let end_row = row as isize + dr * reach;
                let end_column = column as isize + dc * reach;
                if end_row >= 0 && end_row < HEIGHT as isize && end_column < WIDTH as isize {
                    let mut i = 0;
                    while i < LINE_LENGTH {
                        lines[n][i] = (
                            (row as isize + dr * i as isize) as usize,
                            (column as isize + dc * i as isize) as usize,
                        );
                        i += 1;
                    }
                    n += 1;
                }
                column += 1;
            }
            row += 1;
        }
        d += 1;
    }
    assert!(n == NUM_WINDOWS);
    lines
}

/// Every line on the board: horizontals, verticals, then both diagonals
pub static LINES: [Line; NUM_WINDOWS] = lines();

/// The contents of one line of tiles
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Window([Cell; LINE_LENGTH]);

impl Window {
    pub fn new(cells: [Cell; LINE_LENGTH]) -> Self {
        Self(cells)
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.0.iter().filter(|&&c| c == cell).count()
    }

    /// true if every tile of the window holds `cell`
    pub fn is_line_of(&self, cell: Cell) -> bool {
        self.0.iter().all(|&c| c == cell)
    }
}

/// Reads the tiles of `line` from `board`
pub fn window_at(board: &Board, line: &Line) -> Window {
    let mut cells = [Cell::Empty; LINE_LENGTH];
    for (cell, &(row, column)) in cells.iter_mut().zip(line.iter()) {
        *cell = board.get(row, column);
    }
    Window(cells)
}

/// Iterates every window of the board in the order of [`LINES`]
pub fn windows(board: &Board) -> impl Iterator<Item = Window> + '_ {
    LINES.iter().map(move |line| window_at(board, line))
}
