//! Errors surfaced by the search engine and the games driving it.

/// Everything that can go wrong between the caller and the search.
///
/// Configuration problems are reported on the first call, before any
/// recursion happens. Contract violations that a game can cause mid-search
/// (an empty move list on a live position, a chance node without a backfired
/// outcome) propagate out of the recursion unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    #[error("no scoring function supplied and the game does not score itself")]
    MissingScoring,

    #[error("a transposition table was supplied but the game has no fingerprint")]
    MissingFingerprint,

    #[error("chance node reached but the game defines no backfired outcome for {0}")]
    MissingChanceOutcome(String),

    #[error("scoring function returned a non-numeric value ({0})")]
    MalformedScore(f64),

    #[error("position is not over but has no legal moves")]
    NoLegalMoves,

    #[error("cached move {0} is not legal in the probed position")]
    ForeignTableMove(String),

    #[error("invalid move: {0}")]
    InvalidMove(String),
}
