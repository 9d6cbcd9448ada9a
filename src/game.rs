use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::config::{RulesConfig, ScoringPolicy};
use crate::error::MoveError;
use crate::movegen;
use crate::rules;
use crate::types::{GameView, GoalMode, Position, Side};

/// Side that moves first after `new` and `reset`.
pub const FIRST_SIDE: Side = Side::B;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    AwaitingMove(Side),
    GameOver(Outcome),
}

/// What an accepted move or pass led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Play goes on with the given side to move.
    Continue(Side),
    Won(Side),
    Draw,
}

impl From<Outcome> for MoveOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner(side) => MoveOutcome::Won(side),
            Outcome::Draw => MoveOutcome::Draw,
        }
    }
}

/// One game: board, side to move, counters and the rules it was created with.
///
/// Every mutating call either fails without touching the state or leaves a
/// fully updated state behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    mode: GoalMode,
    config: RulesConfig,
    status: Status,
    scores: [u32; 2],
    move_count: u32,
}

impl GameState {
    pub fn new(mode: GoalMode) -> Self {
        Self::with_config(mode, RulesConfig::default())
    }

    pub fn with_config(mode: GoalMode, config: RulesConfig) -> Self {
        Self {
            board: rules::initial_board(mode),
            mode,
            config: config.normalized(),
            status: Status::AwaitingMove(FIRST_SIDE),
            scores: [0; 2],
            move_count: 0,
        }
    }

    pub(crate) fn from_parts(
        board: Board,
        mode: GoalMode,
        config: RulesConfig,
        status: Status,
        scores: [u32; 2],
        move_count: u32,
    ) -> Self {
        Self {
            board,
            mode,
            config,
            status,
            scores,
            move_count,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> GoalMode {
        self.mode
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Side to move, or `None` once the game is over.
    pub fn active_side(&self) -> Option<Side> {
        match self.status {
            Status::AwaitingMove(side) => Some(side),
            Status::GameOver(_) => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, Status::GameOver(_))
    }

    /// Returns `(side_a, side_b)` score counters.
    pub fn score(&self) -> (u32, u32) {
        (self.scores[Side::A.slot()], self.scores[Side::B.slot()])
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Destinations for the piece on `from`. Empty when the cell is empty,
    /// the piece belongs to the inactive side, or the game is over.
    pub fn legal_moves(&self, from: Position) -> Vec<Position> {
        match self.active_side() {
            Some(side) if self.board.piece_at(from) == Some(side) => {
                movegen::legal_destinations(&self.board, from)
            }
            _ => Vec::new(),
        }
    }

    #[instrument(level = "debug", skip(self), fields(mode = %self.mode))]
    pub fn apply_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome, MoveError> {
        let side = self.active_side().ok_or(MoveError::GameAlreadyOver)?;
        let owner = self.board.piece_at(from).ok_or(MoveError::EmptySquare(from))?;
        if owner != side {
            return Err(MoveError::NotYourTurn(owner));
        }
        if !self.board.is_free(to) {
            return Err(MoveError::CellOccupied(to));
        }
        if !movegen::is_legal(&self.board, from, to) {
            return Err(MoveError::IllegalMove { from, to });
        }

        self.board.move_piece(from, to)?;
        match self.config.scoring {
            ScoringPolicy::PerSide => self.add_score(side, 1),
            ScoringPolicy::GoalCorner => {
                let bonus = u32::from(rules::is_in_goal_corner(to, side));
                self.add_score(side, 1 + bonus);
            }
            ScoringPolicy::Mirrored => {
                self.add_score(Side::A, 1);
                self.add_score(Side::B, 1);
            }
        }
        self.move_count = self.move_count.saturating_add(1);
        debug!(?side, %from, %to, move_count = self.move_count, "move applied");

        if let Some(winner) = rules::check_win(&self.board, self.mode, &self.config) {
            return Ok(self.finish(Outcome::Winner(winner)));
        }
        Ok(self.advance(side))
    }

    /// Hands the turn to the other side without moving a piece.
    #[instrument(level = "debug", skip(self), fields(mode = %self.mode))]
    pub fn pass(&mut self) -> Result<MoveOutcome, MoveError> {
        let side = self.active_side().ok_or(MoveError::GameAlreadyOver)?;

        self.add_score(side, 1);
        self.move_count = self.move_count.saturating_add(1);
        debug!(?side, move_count = self.move_count, "turn passed");

        Ok(self.advance(side))
    }

    /// Starts over in `mode`, keeping this game's rules config.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self, mode: GoalMode) {
        *self = Self::with_config(mode, self.config);
        info!(%mode, "game reset");
    }

    pub fn to_view(&self) -> GameView {
        let (side_a_score, side_b_score) = self.score();
        let (winner, is_draw) = match self.status {
            Status::GameOver(Outcome::Winner(side)) => (side.code(), false),
            Status::GameOver(Outcome::Draw) => (0, true),
            Status::AwaitingMove(_) => (0, false),
        };
        GameView {
            board: self.board.to_array().to_vec(),
            mode: self.mode,
            active_side: self.active_side().map_or(0, Side::code),
            side_a_score,
            side_b_score,
            move_count: self.move_count,
            is_game_over: self.is_game_over(),
            winner,
            is_draw,
        }
    }

    fn add_score(&mut self, side: Side, points: u32) {
        let score = &mut self.scores[side.slot()];
        *score = score.saturating_add(points);
    }

    fn advance(&mut self, mover: Side) -> MoveOutcome {
        if self.move_count >= self.config.move_limit {
            return self.finish(Outcome::Draw);
        }
        let next = mover.opponent();
        self.status = Status::AwaitingMove(next);
        MoveOutcome::Continue(next)
    }

    fn finish(&mut self, outcome: Outcome) -> MoveOutcome {
        self.status = Status::GameOver(outcome);
        info!(?outcome, move_count = self.move_count, "game over");
        outcome.into()
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, active: Side) {
        self.board = board;
        self.status = Status::AwaitingMove(active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: u8, y: u8) -> Position {
        Position::new(x, y).unwrap()
    }

    #[test]
    fn initial_state_is_correct() {
        let game = GameState::new(GoalMode::Easy);

        assert_eq!(game.status(), Status::AwaitingMove(Side::B));
        assert_eq!(game.score(), (0, 0));
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.board().count(Side::A), 9);
        assert_eq!(game.board().count(Side::B), 9);
    }

    #[test]
    fn first_move_for_side_b_is_applied() {
        let mut game = GameState::new(GoalMode::Easy);

        let outcome = game.apply_move(pos(5, 7), pos(4, 7)).unwrap();

        assert_eq!(outcome, MoveOutcome::Continue(Side::A));
        assert_eq!(game.active_side(), Some(Side::A));
        assert_eq!(game.move_count(), 1);
        assert_eq!(game.board().piece_at(pos(4, 7)), Some(Side::B));
        assert!(game.board().is_free(pos(5, 7)));
    }

    #[test]
    fn legal_moves_only_for_active_side() {
        let game = GameState::new(GoalMode::Easy);

        assert!(game.legal_moves(pos(0, 0)).is_empty());
        assert!(game.legal_moves(pos(4, 4)).is_empty());
        assert_eq!(game.legal_moves(pos(5, 7)), vec![pos(4, 7)]);
        assert_eq!(game.legal_moves(pos(7, 7)), Vec::<Position>::new());
        assert_eq!(game.legal_moves(pos(6, 7)), vec![pos(4, 7)]);
    }

    #[test]
    fn rejections_are_typed_and_leave_state_unchanged() {
        let mut game = GameState::new(GoalMode::Easy);
        let before = game.clone();

        assert_eq!(
            game.apply_move(pos(2, 2), pos(3, 2)),
            Err(MoveError::NotYourTurn(Side::A))
        );
        assert_eq!(
            game.apply_move(pos(4, 4), pos(4, 3)),
            Err(MoveError::EmptySquare(pos(4, 4)))
        );
        assert_eq!(
            game.apply_move(pos(7, 7), pos(6, 7)),
            Err(MoveError::CellOccupied(pos(6, 7)))
        );
        assert_eq!(
            game.apply_move(pos(5, 5), pos(3, 3)),
            Err(MoveError::IllegalMove {
                from: pos(5, 5),
                to: pos(3, 3)
            })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn repeated_rejection_is_stable() {
        let mut game = GameState::new(GoalMode::Medium);
        let before = game.clone();

        let first = game.apply_move(pos(4, 5), pos(4, 2));
        let second = game.apply_move(pos(4, 5), pos(4, 2));

        assert!(first.is_err());
        assert_eq!(first, second);
        assert_eq!(game, before);
    }

    #[test]
    fn jump_over_own_piece_is_applied() {
        let mut game = GameState::new(GoalMode::Easy);

        game.apply_move(pos(6, 7), pos(4, 7)).unwrap();

        assert_eq!(game.board().piece_at(pos(4, 7)), Some(Side::B));
        assert!(game.board().is_free(pos(6, 7)));
    }

    #[test]
    fn per_side_scoring_counts_mover_only() {
        let mut game = GameState::new(GoalMode::Easy);

        game.apply_move(pos(5, 7), pos(4, 7)).unwrap();
        assert_eq!(game.score(), (0, 1));

        game.apply_move(pos(2, 0), pos(3, 0)).unwrap();
        assert_eq!(game.score(), (1, 1));

        game.pass().unwrap();
        assert_eq!(game.score(), (1, 2));
    }

    #[test]
    fn mirrored_scoring_counts_both_sides_on_moves_only() {
        let config = RulesConfig::default().with_scoring(ScoringPolicy::Mirrored);
        let mut game = GameState::with_config(GoalMode::Easy, config);

        game.apply_move(pos(5, 7), pos(4, 7)).unwrap();
        assert_eq!(game.score(), (1, 1));

        game.pass().unwrap();
        assert_eq!(game.score(), (2, 1));
    }

    #[test]
    fn goal_corner_scoring_adds_bonus_inside_corner() {
        let config = RulesConfig::default().with_scoring(ScoringPolicy::GoalCorner);
        let mut game = GameState::with_config(GoalMode::Easy, config);
        let mut board = Board::new();
        board.place(pos(3, 2), Side::B).unwrap();
        board.place(pos(7, 0), Side::A).unwrap();
        game.set_board_for_test(board, Side::B);

        game.apply_move(pos(3, 2), pos(2, 2)).unwrap();
        assert_eq!(game.score(), (0, 2));

        game.apply_move(pos(7, 0), pos(6, 0)).unwrap();
        assert_eq!(game.score(), (1, 2));
    }

    #[test]
    fn winning_move_ends_game() {
        let mut game = GameState::new(GoalMode::Easy);
        let mut board = Board::new();
        let corner = rules::target_cells(Side::A, GoalMode::Easy);
        assert_eq!(corner[0], pos(5, 5));
        for &cell in &corner[1..] {
            board.place(cell, Side::A).unwrap();
        }
        board.place(pos(5, 4), Side::A).unwrap();
        board.place(pos(0, 0), Side::B).unwrap();
        game.set_board_for_test(board, Side::A);

        let outcome = game.apply_move(pos(5, 4), pos(5, 5)).unwrap();

        assert_eq!(outcome, MoveOutcome::Won(Side::A));
        assert_eq!(game.status(), Status::GameOver(Outcome::Winner(Side::A)));
        assert_eq!(game.active_side(), None);
        assert_eq!(game.apply_move(pos(0, 0), pos(1, 0)), Err(MoveError::GameAlreadyOver));
        assert_eq!(game.pass(), Err(MoveError::GameAlreadyOver));
        assert!(game.legal_moves(pos(0, 0)).is_empty());
    }

    #[test]
    fn winner_takes_precedence_over_move_limit() {
        let config = RulesConfig::default().with_move_limit(1);
        let mut game = GameState::with_config(GoalMode::Easy, config);
        let mut board = Board::new();
        let corner = rules::target_cells(Side::B, GoalMode::Easy);
        assert_eq!(corner.last(), Some(&pos(2, 2)));
        for &cell in &corner[..8] {
            board.place(cell, Side::B).unwrap();
        }
        board.place(pos(2, 3), Side::B).unwrap();
        game.set_board_for_test(board, Side::B);

        let outcome = game.apply_move(pos(2, 3), pos(2, 2)).unwrap();

        assert_eq!(outcome, MoveOutcome::Won(Side::B));
    }

    #[test]
    fn eighty_passes_draw_never_earlier() {
        let mut game = GameState::new(GoalMode::Hard);

        for turn in 1..80 {
            let outcome = game.pass().unwrap();
            assert!(matches!(outcome, MoveOutcome::Continue(_)), "turn {turn}");
        }

        assert_eq!(game.pass(), Ok(MoveOutcome::Draw));
        assert_eq!(game.status(), Status::GameOver(Outcome::Draw));
        assert_eq!(game.move_count(), 80);
        assert_eq!(game.pass(), Err(MoveError::GameAlreadyOver));
    }

    #[test]
    fn moves_count_toward_draw_limit() {
        let config = RulesConfig::default().with_move_limit(2);
        let mut game = GameState::with_config(GoalMode::Easy, config);

        game.apply_move(pos(5, 7), pos(4, 7)).unwrap();
        let outcome = game.apply_move(pos(2, 0), pos(3, 0)).unwrap();

        assert_eq!(outcome, MoveOutcome::Draw);
        assert!(game.is_game_over());
    }

    #[test]
    fn counters_saturate_instead_of_overflowing() {
        let config = RulesConfig::default().with_move_limit(u32::MAX);
        let mut game = GameState::from_parts(
            rules::initial_board(GoalMode::Easy),
            GoalMode::Easy,
            config,
            Status::AwaitingMove(Side::B),
            [u32::MAX, u32::MAX],
            u32::MAX - 1,
        );

        assert_eq!(game.pass(), Ok(MoveOutcome::Draw));
        assert_eq!(game.score(), (u32::MAX, u32::MAX));
        assert_eq!(game.move_count(), u32::MAX);
    }

    #[test]
    fn config_is_normalized_for_the_whole_game() {
        let raw = RulesConfig {
            move_limit: 0,
            medium_threshold: Some(0),
            scoring: ScoringPolicy::PerSide,
        };
        let mut game = GameState::with_config(GoalMode::Medium, raw);

        assert_eq!(game.config().medium_threshold, Some(1));
        assert_eq!(game.pass(), Ok(MoveOutcome::Draw));
    }

    #[test]
    fn reset_reproduces_new_game_and_keeps_config() {
        let config = RulesConfig::legacy();
        let mut game = GameState::with_config(GoalMode::Easy, config);
        game.apply_move(pos(5, 7), pos(4, 7)).unwrap();
        game.pass().unwrap();

        game.reset(GoalMode::Hard);

        assert_eq!(game, GameState::with_config(GoalMode::Hard, config));
        assert_eq!(game.active_side(), Some(Side::B));
    }

    #[test]
    fn view_reports_board_and_counters() {
        let mut game = GameState::new(GoalMode::Medium);
        game.apply_move(pos(4, 5), pos(4, 4)).unwrap();

        let view = game.to_view();

        assert_eq!(view.board.len(), 64);
        assert_eq!(view.board[pos(4, 4).index()], 2);
        assert_eq!(view.board[pos(4, 5).index()], 0);
        assert_eq!(view.active_side, 1);
        assert_eq!(view.side_b_score, 1);
        assert_eq!(view.move_count, 1);
        assert!(!view.is_game_over);
        assert_eq!(view.winner, 0);
    }
}
