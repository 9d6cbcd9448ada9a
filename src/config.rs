use serde::{Deserialize, Serialize};

pub const DEFAULT_MOVE_LIMIT: u32 = 80;

/// How the per-side score counters advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// The side that moved or passed gains one point.
    #[default]
    PerSide,
    /// The mover gains one point, plus one more when the moved piece ends
    /// inside its 3x3 goal corner. Passing still counts one.
    GoalCorner,
    /// Both counters gain one point on every move; a pass counts for the
    /// passing side only.
    Mirrored,
}

/// Rule knobs fixed for the lifetime of a game. Survives `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Cumulative moves and passes after which the game is drawn.
    pub move_limit: u32,
    /// Pieces needed in the target region to win in medium mode.
    /// `None` requires the whole side.
    pub medium_threshold: Option<u8>,
    pub scoring: ScoringPolicy,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            move_limit: DEFAULT_MOVE_LIMIT,
            medium_threshold: None,
            scoring: ScoringPolicy::default(),
        }
    }
}

impl RulesConfig {
    /// Rules as the legacy desktop game played them: a single piece in the
    /// target wins medium mode, and scoring includes the goal-corner bonus.
    pub fn legacy() -> Self {
        Self {
            move_limit: DEFAULT_MOVE_LIMIT,
            medium_threshold: Some(1),
            scoring: ScoringPolicy::GoalCorner,
        }
    }

    /// Folds values that mean the same rule onto one representation:
    /// a medium threshold of 0 plays as 1, and the move limit is at least 1.
    pub fn normalized(mut self) -> Self {
        self.move_limit = self.move_limit.max(1);
        self.medium_threshold = self.medium_threshold.map(|threshold| threshold.max(1));
        self
    }

    pub fn with_move_limit(mut self, move_limit: u32) -> Self {
        self.move_limit = move_limit;
        self.normalized()
    }

    pub fn with_medium_threshold(mut self, threshold: Option<u8>) -> Self {
        self.medium_threshold = threshold;
        self.normalized()
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }
}
