use once_cell::sync::Lazy;

use crate::board::Board;
use crate::config::RulesConfig;
use crate::types::{BOARD_SIZE, GoalMode, NUM_SQUARES, Position, Side};

const CORNER: u8 = 3;
const MEDIUM_WIDTH: u8 = 4;
const MEDIUM_HEIGHT: u8 = 3;
const HARD_DIAGONAL: u8 = 4;

/// Home region of each side per mode, indexed `[mode][side]`.
static HOME_REGIONS: Lazy<[[u64; 2]; 3]> = Lazy::new(|| {
    let mut regions = [[0u64; 2]; 3];
    for mode in GoalMode::ALL {
        for side in [Side::A, Side::B] {
            regions[mode.slot()][side.slot()] = build_mask(|x, y| in_home(mode, side, x, y));
        }
    }
    regions
});

/// 3x3 goal corners used for score keeping in every mode, indexed by side.
static GOAL_CORNERS: Lazy<[u64; 2]> = Lazy::new(|| {
    let far = BOARD_SIZE - CORNER;
    [
        build_mask(|x, y| x >= far && y >= far),
        build_mask(|x, y| x < CORNER && y < CORNER),
    ]
});

fn in_home(mode: GoalMode, side: Side, x: u8, y: u8) -> bool {
    let max = BOARD_SIZE - 1;
    // Side B's home is side A's home rotated by 180 degrees.
    let (x, y) = match side {
        Side::A => (x, y),
        Side::B => (max - x, max - y),
    };
    match mode {
        GoalMode::Easy => x < CORNER && y < CORNER,
        GoalMode::Medium => x < MEDIUM_WIDTH && y < MEDIUM_HEIGHT,
        GoalMode::Hard => x + y <= BOARD_SIZE - HARD_DIAGONAL,
    }
}

fn build_mask(contains: impl Fn(u8, u8) -> bool) -> u64 {
    (0..NUM_SQUARES)
        .filter_map(Position::from_index)
        .filter(|pos| contains(pos.x(), pos.y()))
        .fold(0u64, |mask, pos| mask | pos.bit())
}

/// Cells a side starts on.
pub fn home_region(side: Side, mode: GoalMode) -> u64 {
    HOME_REGIONS[mode.slot()][side.slot()]
}

/// Cells a side must fill to win: the opponent's home region.
pub fn target_region(side: Side, mode: GoalMode) -> u64 {
    home_region(side.opponent(), mode)
}

pub fn target_cells(side: Side, mode: GoalMode) -> Vec<Position> {
    crate::movegen::mask_to_positions(target_region(side, mode))
}

/// Pieces a side needs inside its target region.
pub fn win_threshold(mode: GoalMode, config: &RulesConfig) -> u8 {
    let pieces = home_region(Side::A, mode).count_ones() as u8;
    match mode {
        GoalMode::Medium => config
            .medium_threshold
            .map_or(pieces, |threshold| threshold.clamp(1, pieces)),
        GoalMode::Easy | GoalMode::Hard => pieces,
    }
}

/// Returns the side whose target region holds enough of its pieces.
///
/// Side A is reported first when both qualify.
pub fn check_win(board: &Board, mode: GoalMode, config: &RulesConfig) -> Option<Side> {
    let threshold = win_threshold(mode, config) as u32;
    [Side::A, Side::B].into_iter().find(|&side| {
        (board.mask(side) & target_region(side, mode)).count_ones() >= threshold
    })
}

/// Whether `pos` lies in the fixed 3x3 goal corner of `side`.
pub fn is_in_goal_corner(pos: Position, side: Side) -> bool {
    GOAL_CORNERS[side.slot()] & pos.bit() != 0
}

pub fn initial_board(mode: GoalMode) -> Board {
    Board::from_disjoint_masks(home_region(Side::A, mode), home_region(Side::B, mode))
}
