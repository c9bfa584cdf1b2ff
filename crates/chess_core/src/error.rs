//! Error types for position text, move text and position commands.

use thiserror::Error;

use crate::types::Color;

/// Reasons a position text (FEN) is rejected. Parsing never yields a
/// partially built position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected 4 to 6 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("invalid piece placement: {0}")]
    Placement(String),

    #[error("invalid side to move: {0}")]
    SideToMove(String),

    #[error("invalid castling rights: {0}")]
    Castling(String),

    #[error("invalid en passant square: {0}")]
    EnPassant(String),

    #[error("invalid {field}: {value}")]
    Counter { field: &'static str, value: String },

    #[error("{color:?} must have exactly one king, found {count}")]
    KingCount { color: Color, count: u32 },
}

/// Reasons move text cannot be played in a position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("malformed move text: {0}")]
    Malformed(String),

    #[error("illegal move in this position: {0}")]
    Illegal(String),
}

/// Errors from protocol-level position setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("malformed position command: {0}")]
    Command(String),
}
