// Scoring functions
//
// A scoring function maps a position to a number from the point of view of
// the player to move. Any `Fn(&G) -> f64` closure is one; `GameScoring`
// falls back to the game's own `scoring` method.

use crate::error::SearchError;
use crate::game_repr::Game;

pub trait Scoring<G: Game> {
    fn score(&self, state: &G) -> f64;

    /// Whether `state` can be scored at all. Called once before searching.
    fn check(&self, _state: &G) -> Result<(), SearchError> {
        Ok(())
    }
}

impl<G: Game, F: Fn(&G) -> f64> Scoring<G> for F {
    fn score(&self, state: &G) -> f64 {
        self(state)
    }
}

/// Uses [`Game::scoring`]. Fails the check for a game without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameScoring;

impl<G: Game> Scoring<G> for GameScoring {
    fn score(&self, state: &G) -> f64 {
        state.scoring().unwrap_or(f64::NAN)
    }

    fn check(&self, state: &G) -> Result<(), SearchError> {
        state.scoring().map(|_| ()).ok_or(SearchError::MissingScoring)
    }
}

/// Leaf value with the depth tie-break applied.
///
/// `depth` is the depth still left to search, so it is larger the sooner the
/// leaf is reached: a win found sooner scores higher and a loss pushed
/// further away scores less badly.
pub fn leaf_value<G: Game, S: Scoring<G> + ?Sized>(
    scoring: &S,
    state: &G,
    depth: u32,
) -> Result<f64, SearchError> {
    let score = scoring.score(state);
    if score.is_nan() {
        return Err(SearchError::MalformedScore(score));
    }
    Ok(score * (1.0 + 0.001 * depth as f64))
}
