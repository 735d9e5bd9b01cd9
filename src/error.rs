use thiserror::Error;

use crate::WIDTH;

/// Errors raised when a move cannot be applied to a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Invalid move, column {} out of range. Columns must be between 1 and {}", .column + 1, WIDTH)]
    ColumnOutOfRange { column: usize },

    #[error("Invalid move, column {} full", .column + 1)]
    ColumnFull { column: usize },
}
