//! Error kinds for board operations.

use crate::geom::Point;

/// An error produced by a [`Board`](crate::board::Board) operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A coordinate outside `[0, width) x [0, height)` was used.
    ///
    /// Out-of-range access is a contract violation and is never clamped.
    #[error("cell {pos} out of bounds for {width}x{height} board")]
    OutOfBounds { pos: Point, width: i32, height: i32 },

    /// A spawn was requested but every cell is occupied.
    #[error("board is full")]
    Full,
}

/// Result alias for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = BoardError::OutOfBounds {
            pos: Point::new(4, 0),
            width: 4,
            height: 4,
        };
        assert_eq!(e.to_string(), "cell (4, 0) out of bounds for 4x4 board");
        assert_eq!(BoardError::Full.to_string(), "board is full");
    }
}
