use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MoveError, ParseModeError};

pub const BOARD_SIZE: u8 = 8;
pub const NUM_SQUARES: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A board coordinate. Always within `0..8` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    pub fn new(x: u8, y: u8) -> Result<Self, MoveError> {
        if x >= BOARD_SIZE || y >= BOARD_SIZE {
            return Err(MoveError::InvalidPosition { x, y });
        }
        Ok(Self { x, y })
    }

    /// Signed variant used by the move generator; `None` when off the board.
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x as i8 + dx;
        let y = self.y as i8 + dy;
        let range = 0..BOARD_SIZE as i8;
        if range.contains(&x) && range.contains(&y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        if idx >= NUM_SQUARES {
            return None;
        }
        Some(Self {
            x: (idx % BOARD_SIZE as usize) as u8,
            y: (idx / BOARD_SIZE as usize) as u8,
        })
    }

    pub fn x(self) -> u8 {
        self.x
    }

    pub fn y(self) -> u8 {
        self.y
    }

    pub fn index(self) -> usize {
        (self.y as usize) * BOARD_SIZE as usize + self.x as usize
    }

    pub(crate) fn bit(self) -> u64 {
        1u64 << self.index()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the two players.
///
/// Side A starts in the low-index corner and heads for the high-index one,
/// Side B the other way round. Side B moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Wire code shared with the presentation layer: 1 = A, 2 = B.
    pub fn code(self) -> u8 {
        match self {
            Side::A => 1,
            Side::B => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Side::A),
            2 => Some(Side::B),
            _ => None,
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

/// Difficulty: selects starting layout, target regions and win threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalMode {
    Easy,
    Medium,
    Hard,
}

impl GoalMode {
    pub const ALL: [GoalMode; 3] = [GoalMode::Easy, GoalMode::Medium, GoalMode::Hard];

    pub fn name(self) -> &'static str {
        match self {
            GoalMode::Easy => "easy",
            GoalMode::Medium => "medium",
            GoalMode::Hard => "hard",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            GoalMode::Easy => 0,
            GoalMode::Medium => 1,
            GoalMode::Hard => 2,
        }
    }

    pub(crate) fn from_slot(slot: u8) -> Option<Self> {
        Self::ALL.get(slot as usize).copied()
    }
}

impl FromStr for GoalMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "classic" => Ok(GoalMode::Easy),
            "medium" => Ok(GoalMode::Medium),
            "hard" => Ok(GoalMode::Hard),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

impl fmt::Display for GoalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// 64 cells, row-major by `y`: 0 = empty, 1 = side A, 2 = side B.
    pub board: Vec<u8>,
    pub mode: GoalMode,
    /// Side to move; 0 once the game is over.
    pub active_side: u8,
    pub side_a_score: u32,
    pub side_b_score: u32,
    pub move_count: u32,
    pub is_game_over: bool,
    /// Contract:
    /// - 1 or 2 when a side has won.
    /// - 0 while the game runs or after a draw.
    pub winner: u8,
    pub is_draw: bool,
}

/// Result of one `applyMove`/`pass` call as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// One of `"continue"`, `"won"`, `"draw"`.
    pub outcome: String,
    /// Next side to move for `"continue"`, the winner for `"won"`, 0 for `"draw"`.
    pub side: u8,
    pub state: GameView,
}
