//! Error taxonomy for move selection and configuration.
//!
//! Every error here is a recoverable, user-facing validation outcome: the
//! engine hands it back without touching any state and the caller re-prompts.
//! Contract violations (applying a move that was never generated, writing a
//! piece onto a non-playable cell) are not represented here; they panic.

use thiserror::Error;

/// Why a cell cannot be picked as the origin of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PieceChoiceError {
    /// The cell holds a piece of the side that is not to move.
    #[error("that piece belongs to the opponent")]
    WrongTurn,
    /// The cell is empty or not on the board.
    #[error("there is no piece there")]
    NotAPiece,
}

/// Why a cell cannot be the destination of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DestinationChoiceError {
    #[error("destination cell is occupied")]
    PieceInCell,
    #[error("destination is not on the board")]
    NotACell,
    #[error("destination is not a playable cell")]
    WrongCellColor,
}

/// Why an (origin, destination) pair does not resolve to a legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveChoiceError {
    /// A capture is available and captures are mandatory.
    #[error("a capture is available and must be taken")]
    CaptureAvailable,
    #[error("that piece cannot move there")]
    InvalidMoveForPiece,
    /// The game has already been won.
    #[error("the game is over")]
    GameOver,
}

/// Any rejection produced while playing a move from raw cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Piece(#[from] PieceChoiceError),
    #[error(transparent)]
    Destination(#[from] DestinationChoiceError),
    #[error(transparent)]
    Move(#[from] MoveChoiceError),
}

/// Invalid game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported board size {size}: must be even and between {min} and {max}")]
    InvalidSize { size: usize, min: usize, max: usize },
}
