use crate::board::Board;
use crate::types::Position;

const DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Returns the destination mask for the piece standing on `from`.
///
/// A piece steps one cell orthogonally onto a free cell, or jumps two cells
/// over an occupied neighbour (either side, nothing is captured) onto a free
/// cell. Jumps do not chain. Returns 0 when `from` is empty.
pub fn destinations(board: &Board, from: Position) -> u64 {
    if board.piece_at(from).is_none() {
        return 0;
    }

    let mut moves = 0u64;
    for (dx, dy) in DIRECTIONS {
        let Some(step) = from.offset(dx, dy) else {
            continue;
        };
        if board.is_free(step) {
            moves |= step.bit();
        } else if let Some(landing) = from.offset(2 * dx, 2 * dy) {
            if board.is_free(landing) {
                moves |= landing.bit();
            }
        }
    }

    moves
}

/// Same as [`destinations`], expanded into positions ordered by board index.
pub fn legal_destinations(board: &Board, from: Position) -> Vec<Position> {
    mask_to_positions(destinations(board, from))
}

pub fn is_legal(board: &Board, from: Position, to: Position) -> bool {
    destinations(board, from) & to.bit() != 0
}

pub(crate) fn mask_to_positions(mask: u64) -> Vec<Position> {
    let mut bits = mask;
    let mut out = Vec::with_capacity(bits.count_ones() as usize);

    while bits != 0 {
        if let Some(pos) = Position::from_index(bits.trailing_zeros() as usize) {
            out.push(pos);
        }
        bits &= bits - 1;
    }

    out
}
