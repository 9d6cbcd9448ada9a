use crate::error::MoveError;
use crate::types::{NUM_SQUARES, Position, Side};

/// Board occupancy represented by one bitboard per side.
///
/// Bit `y * 8 + x` is set when a piece of that side stands on `(x, y)`.
/// The two masks never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    side_a: u64,
    side_b: u64,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw masks. Returns `None` when a cell is claimed twice.
    pub fn from_masks(side_a: u64, side_b: u64) -> Option<Self> {
        if side_a & side_b != 0 {
            return None;
        }
        Some(Self { side_a, side_b })
    }

    /// Builds a board from masks the caller knows to be disjoint.
    pub(crate) fn from_disjoint_masks(side_a: u64, side_b: u64) -> Self {
        assert_eq!(side_a & side_b, 0, "overlapping side masks");
        Self { side_a, side_b }
    }

    pub fn mask(&self, side: Side) -> u64 {
        match side {
            Side::A => self.side_a,
            Side::B => self.side_b,
        }
    }

    pub fn occupied(&self) -> u64 {
        self.side_a | self.side_b
    }

    pub fn piece_at(&self, pos: Position) -> Option<Side> {
        let square = pos.bit();
        if self.side_a & square != 0 {
            Some(Side::A)
        } else if self.side_b & square != 0 {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn is_free(&self, pos: Position) -> bool {
        self.occupied() & pos.bit() == 0
    }

    /// Adds a piece for `side` on an empty cell.
    pub fn place(&mut self, pos: Position, side: Side) -> Result<(), MoveError> {
        if !self.is_free(pos) {
            return Err(MoveError::CellOccupied(pos));
        }
        *self.mask_mut(side) |= pos.bit();
        Ok(())
    }

    /// Relocates the piece on `from` to `to` without checking game rules.
    ///
    /// Returns the side that owns the moved piece.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Result<Side, MoveError> {
        let side = self.piece_at(from).ok_or(MoveError::EmptySquare(from))?;
        if !self.is_free(to) {
            return Err(MoveError::CellOccupied(to));
        }
        let mask = self.mask_mut(side);
        *mask &= !from.bit();
        *mask |= to.bit();
        Ok(side)
    }

    pub fn clear(&mut self) {
        self.side_a = 0;
        self.side_b = 0;
    }

    pub fn count(&self, side: Side) -> u8 {
        self.mask(side).count_ones() as u8
    }

    /// Snapshot of every piece; order is by board index.
    pub fn all_pieces(&self) -> Vec<(Position, Side)> {
        (0..NUM_SQUARES)
            .filter_map(Position::from_index)
            .filter_map(|pos| self.piece_at(pos).map(|side| (pos, side)))
            .collect()
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=side A, 2=side B.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (idx, cell) in board.iter_mut().enumerate() {
            let square = 1u64 << idx;
            *cell = if self.side_a & square != 0 {
                Side::A.code()
            } else if self.side_b & square != 0 {
                Side::B.code()
            } else {
                0
            };
        }
        board
    }

    fn mask_mut(&mut self, side: Side) -> &mut u64 {
        match side {
            Side::A => &mut self.side_a,
            Side::B => &mut self.side_b,
        }
    }
}
