//! Search and match configuration.
//!
//! [`SearchConfig`] carries every knob of the search; [`Difficulty`] maps
//! friendly presets onto it. [`MatchConfig`] drives the orchestrator.

use crate::agent::ai::Replacement;

/// Default probability that a move at a chance node backfires.
pub const BACKFIRE_PROBABILITY: f64 = 0.1;

/// How the two outcomes of a chance move share the alpha-beta window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChancePruning {
    /// Both outcomes are searched with an open window, so their values and
    /// the expectation are exact. Pruning still applies between sibling
    /// moves.
    #[default]
    Exact,
    /// Both outcomes reuse the node's window. Cheaper, but an outcome cut
    /// off by the window only yields a bound, which then gets averaged as if
    /// it were exact.
    SharedWindow,
}

/// AI difficulty levels that map to search depth and time controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    /// Depth 2, no time limit
    Easy,
    /// Depth 4, no time limit
    Medium,
    /// Depth 6, no time limit
    Hard,
    /// Depth 10, 5 second time limit
    Expert,
}

impl Difficulty {
    /// Maximum search depth in plies
    pub fn max_depth(&self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Expert => 10,
        }
    }

    /// Time limit in milliseconds, None for unlimited
    pub fn time_limit_ms(&self) -> Option<u64> {
        match self {
            Difficulty::Expert => Some(5000),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
        ]
    }
}

/// Everything the search needs besides the game and the scoring function.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Depth of a single search, or the last iteration of iterative deepening.
    pub max_depth: u32,
    /// Values at or beyond `±win_score` count as solved. Also the root window.
    pub win_score: f64,
    pub backfire_probability: f64,
    pub chance_pruning: ChancePruning,
    /// Checked between iterative-deepening iterations only.
    pub time_limit_ms: Option<u64>,
    pub use_table: bool,
    pub table_capacity: usize,
    pub replacement: Replacement,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            win_score: f64::INFINITY,
            backfire_probability: BACKFIRE_PROBABILITY,
            chance_pruning: ChancePruning::default(),
            time_limit_ms: None,
            use_table: true,
            table_capacity: 1_000_000,
            replacement: Replacement::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            max_depth: difficulty.max_depth(),
            time_limit_ms: difficulty.time_limit_ms(),
            ..Self::default()
        }
    }

    pub fn win_score(mut self, win_score: f64) -> Self {
        self.win_score = win_score;
        self
    }

    pub fn without_table(mut self) -> Self {
        self.use_table = false;
        self
    }

    pub fn chance_pruning(mut self, chance_pruning: ChancePruning) -> Self {
        self.chance_pruning = chance_pruning;
        self
    }

    /// Root window `(alpha, beta)`.
    pub fn window(&self) -> (f64, f64) {
        (-self.win_score, self.win_score)
    }
}

/// Settings for a full game between two players.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    /// Upper bound on plies before the match is abandoned.
    pub max_moves: u32,
    pub backfire_probability: f64,
    /// Seed for the backfire dice; None draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_moves: 1000,
            backfire_probability: BACKFIRE_PROBABILITY,
            seed: None,
        }
    }
}
