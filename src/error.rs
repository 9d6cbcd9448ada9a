use thiserror::Error;

use crate::types::{Position, Side};

/// Why the kernel rejected a move or pass. Rejections never change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("position ({x}, {y}) is off the board")]
    InvalidPosition { x: u8, y: u8 },
    #[error("it is not {0:?}'s turn")]
    NotYourTurn(Side),
    #[error("cell {0} is already occupied")]
    CellOccupied(Position),
    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Position, to: Position },
    #[error("game is already over")]
    GameAlreadyOver,
    #[error("no piece at {0}")]
    EmptySquare(Position),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown goal mode: {0:?} (expected easy, medium or hard)")]
pub struct ParseModeError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("invalid snapshot magic (expected CRNR)")]
    BadMagic,
    #[error("unsupported snapshot version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u32, actual: u32 },
    #[error("CRC32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    CrcMismatch { expected: u32, actual: u32 },
    #[error("corrupt snapshot: {0}")]
    Corrupt(&'static str),
}
