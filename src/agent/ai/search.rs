// Iterative Deepening Search Orchestrator
//
// Searches depth 1, 2, 3, ... up to max_depth with one transposition table,
// so every iteration starts from the previous one's best moves. The time
// budget is only checked between iterations; an iteration that has started
// always completes.

use super::evaluation::Scoring;
use super::negamax::Search;
use super::transposition_table::TranspositionTable;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::game_repr::Game;
use std::ops::RangeInclusive;
use std::time::Instant;

/// Result of a search operation
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<M> {
    pub best_move: Option<M>,
    /// Value of the root from the point of view of the player to move
    pub score: f64,
    /// Depth of the deepest completed iteration
    pub depth: u32,
    pub nodes_searched: u64,
    pub time_ms: u64,
    pub table_hits: u64,
    pub table_misses: u64,
}

impl<M> SearchResult<M> {
    /// Create a new search result with no move found
    pub fn new() -> Self {
        Self {
            best_move: None,
            score: 0.0,
            depth: 0,
            nodes_searched: 0,
            time_ms: 0,
            table_hits: 0,
            table_misses: 0,
        }
    }

    /// Whether the score is a forced win or loss under `win_score`.
    pub fn is_solved(&self, win_score: f64) -> bool {
        self.score.abs() >= win_score
    }
}

impl<M> Default for SearchResult<M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Perform iterative deepening search to find the best move
///
/// # Arguments
/// * `state` - Position to search; left as it was found
/// * `scoring` - Leaf scoring function
/// * `config` - Depth, window, time budget and chance settings
/// * `table` - Table shared by all iterations; `None` searches without one
///
/// # Returns
/// SearchResult of the deepest completed iteration
pub fn iterative_deepening_search<G, S>(
    state: &mut G,
    scoring: &S,
    config: &SearchConfig,
    table: Option<&mut TranspositionTable<G::Move>>,
) -> Result<SearchResult<G::Move>, SearchError>
where
    G: Game,
    S: Scoring<G> + ?Sized,
{
    deepen(state, scoring, config, 1..=config.max_depth.max(1), table)
}

fn deepen<G, S>(
    state: &mut G,
    scoring: &S,
    config: &SearchConfig,
    depths: RangeInclusive<u32>,
    mut table: Option<&mut TranspositionTable<G::Move>>,
) -> Result<SearchResult<G::Move>, SearchError>
where
    G: Game,
    S: Scoring<G> + ?Sized,
{
    let start_time = Instant::now();
    let mut best_result = SearchResult::new();
    let (alpha, beta) = config.window();

    for depth in depths {
        if let Some(time_limit) = config.time_limit_ms {
            if best_result.depth > 0 && is_time_up(&start_time, time_limit) {
                log::warn!(
                    "time budget of {}ms spent, stopping after depth {}",
                    time_limit,
                    best_result.depth
                );
                break;
            }
        }

        let mut search = Search::with_config(scoring, config).with_table(table.as_deref_mut());
        let (score, best_move) = search.run(state, depth, alpha, beta)?;

        best_result.best_move = best_move;
        best_result.score = score;
        best_result.depth = depth;
        best_result.nodes_searched += search.nodes;
        best_result.time_ms = start_time.elapsed().as_millis() as u64;
        if let Some(tt) = table.as_deref() {
            best_result.table_hits = tt.hits;
            best_result.table_misses = tt.misses;
        }

        log_search_info(&best_result);

        // A forced win or loss won't change with more depth
        if best_result.is_solved(config.win_score) {
            break;
        }
    }

    Ok(best_result)
}

/// Outcome of [`solve_with_iterative_deepening`] for the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solution<M> {
    pub outcome: Outcome,
    /// Depth at which the outcome was established (or the last one tried)
    pub depth: u32,
    pub best_move: Option<M>,
    pub score: f64,
}

/// Try to solve a game: deepen over `depths` until the root is a certain
/// win or loss under `win_score`.
pub fn solve_with_iterative_deepening<G, S>(
    state: &mut G,
    scoring: &S,
    depths: RangeInclusive<u32>,
    win_score: f64,
    table: Option<&mut TranspositionTable<G::Move>>,
) -> Result<Solution<G::Move>, SearchError>
where
    G: Game,
    S: Scoring<G> + ?Sized,
{
    let config = SearchConfig {
        max_depth: *depths.end(),
        win_score,
        ..SearchConfig::default()
    };
    let result = deepen(state, scoring, &config, depths, table)?;

    let outcome = if result.score >= win_score {
        Outcome::Win
    } else if result.score <= -win_score {
        Outcome::Loss
    } else {
        Outcome::Unknown
    };

    Ok(Solution {
        outcome,
        depth: result.depth,
        best_move: result.best_move,
        score: result.score,
    })
}

/// Check if time limit has been exceeded
fn is_time_up(start_time: &Instant, time_limit_ms: u64) -> bool {
    start_time.elapsed().as_millis() as u64 >= time_limit_ms
}

/// Log search information for a completed depth
fn log_search_info<M: std::fmt::Debug>(result: &SearchResult<M>) {
    let nps = if result.time_ms > 0 {
        (result.nodes_searched as f64 / result.time_ms as f64 * 1000.0) as u64
    } else {
        result.nodes_searched
    };

    log::debug!(
        "depth {} score {:.4} nodes {} time {} nps {} tt {}/{} move {:?}",
        result.depth,
        result.score,
        result.nodes_searched,
        result.time_ms,
        nps,
        result.table_hits,
        result.table_hits + result.table_misses,
        result.best_move
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ai::evaluation::GameScoring;
    use crate::game_repr::{Nim, NimMove};

    #[test]
    fn test_search_finds_move() {
        let mut nim = Nim::new(vec![3, 4, 5]);
        let mut tt = TranspositionTable::new();
        let result =
            iterative_deepening_search(&mut nim, &GameScoring, &SearchConfig::with_depth(3), Some(&mut tt))
                .unwrap();

        assert!(result.best_move.is_some());
        assert_eq!(result.depth, 3);
        assert!(result.nodes_searched > 0);
        assert!(result.table_hits + result.table_misses > 0);
    }

    #[test]
    fn test_stops_once_solved() {
        // [1, 2] is a win in two plies
        let mut nim = Nim::new(vec![1, 2]);
        let config = SearchConfig::with_depth(10).win_score(100.0);
        let mut tt = TranspositionTable::new();

        let result = iterative_deepening_search(&mut nim, &GameScoring, &config, Some(&mut tt)).unwrap();

        assert_eq!(result.best_move, Some(NimMove::new(1, 2)));
        assert!(result.score >= 100.0);
        assert_eq!(result.depth, 2);
    }

    #[test]
    fn test_matches_fixed_depth_search() {
        let config = SearchConfig::with_depth(5);

        let mut nim = Nim::new(vec![2, 2, 3]);
        let mut tt = TranspositionTable::new();
        let deepened = iterative_deepening_search(&mut nim, &GameScoring, &config, Some(&mut tt)).unwrap();
        let (score, _) = Search::new(&GameScoring)
            .run(&mut nim, 5, f64::NEG_INFINITY, f64::INFINITY)
            .unwrap();
        assert!((deepened.score - score).abs() < 1e-9);

        // Unique best move, so the table hint cannot pick a different one
        let mut nim = Nim::new(vec![1, 2]);
        let mut tt = TranspositionTable::new();
        let deepened = iterative_deepening_search(&mut nim, &GameScoring, &config, Some(&mut tt)).unwrap();
        let (score, best_move) = Search::new(&GameScoring)
            .run(&mut nim, 5, f64::NEG_INFINITY, f64::INFINITY)
            .unwrap();
        assert!((deepened.score - score).abs() < 1e-9);
        assert_eq!(deepened.best_move, best_move);
        assert_eq!(best_move, Some(NimMove::new(1, 2)));
    }

    #[test]
    fn test_zero_time_budget_still_completes_depth_one() {
        let mut nim = Nim::new(vec![4, 4, 4, 4]);
        let config = SearchConfig {
            time_limit_ms: Some(0),
            ..SearchConfig::with_depth(8)
        };

        let result = iterative_deepening_search(&mut nim, &GameScoring, &config, None).unwrap();
        assert_eq!(result.depth, 1);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_solve_win_and_loss() {
        let mut winning = Nim::new(vec![1, 2]);
        let solution =
            solve_with_iterative_deepening(&mut winning, &GameScoring, 1..=8, 100.0, None).unwrap();
        assert_eq!(solution.outcome, Outcome::Win);
        assert_eq!(solution.best_move, Some(NimMove::new(1, 2)));

        let mut losing = Nim::new(vec![1, 1, 1]);
        let mut tt = TranspositionTable::new();
        let solution =
            solve_with_iterative_deepening(&mut losing, &GameScoring, 1..=8, 100.0, Some(&mut tt))
                .unwrap();
        assert_eq!(solution.outcome, Outcome::Loss);
        assert_eq!(solution.depth, 3);
    }

    #[test]
    fn test_solve_unknown_when_too_shallow() {
        let mut nim = Nim::new(vec![5, 5, 5, 5]);
        let solution =
            solve_with_iterative_deepening(&mut nim, &GameScoring, 1..=2, 100.0, None).unwrap();
        assert_eq!(solution.outcome, Outcome::Unknown);
        assert_eq!(solution.depth, 2);
    }
}
