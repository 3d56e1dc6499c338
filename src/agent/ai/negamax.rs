// Expectiminimax Search with Alpha-Beta Pruning
//
// Negamax formulation: every value is from the point of view of the player
// to move, and a child's value is negated to read it from the parent's side.
// On top of plain negamax:
// - Alpha-beta pruning over the [alpha, beta] window
// - Transposition table probing, bound tightening and storing
// - Cached best move tried first
// - Chance nodes: a move either succeeds or backfires, and the node's value
//   for that move is the probability-weighted sum of both outcomes
//
// The value of the root is returned; the move chosen at the root is recorded
// on the side, exactly when `depth == root_depth`.

use super::evaluation::{leaf_value, Scoring};
use super::move_ordering::order_moves;
use super::transposition_table::{NodeType, TranspositionTable};
use crate::config::{ChancePruning, SearchConfig, BACKFIRE_PROBABILITY};
use crate::error::SearchError;
use crate::game_repr::{Branching, Game};

/// One search invocation: the scoring function, the optional table and the
/// move picked at the root.
pub struct Search<'a, G: Game, S: Scoring<G> + ?Sized> {
    scoring: &'a S,
    table: Option<&'a mut TranspositionTable<G::Move>>,
    backfire_probability: f64,
    chance_pruning: ChancePruning,
    root_depth: u32,
    root_move: Option<G::Move>,
    /// Positions visited, including table hits and leaves.
    pub nodes: u64,
}

impl<'a, G: Game, S: Scoring<G> + ?Sized> Search<'a, G, S> {
    pub fn new(scoring: &'a S) -> Self {
        Self {
            scoring,
            table: None,
            backfire_probability: BACKFIRE_PROBABILITY,
            chance_pruning: ChancePruning::default(),
            root_depth: 0,
            root_move: None,
            nodes: 0,
        }
    }

    /// Chance settings from `config`. The table is passed separately since
    /// the caller owns it.
    pub fn with_config(scoring: &'a S, config: &SearchConfig) -> Self {
        Self {
            backfire_probability: config.backfire_probability,
            chance_pruning: config.chance_pruning,
            ..Self::new(scoring)
        }
    }

    pub fn with_table(mut self, table: Option<&'a mut TranspositionTable<G::Move>>) -> Self {
        self.table = table;
        self
    }

    /// Search `state` to `depth` plies inside `(alpha, beta)`.
    ///
    /// Returns the value of the position and the move chosen for it. The
    /// move is `None` only when nothing was searched: `depth == 0` or the
    /// game is already over.
    pub fn run(
        &mut self,
        state: &mut G,
        depth: u32,
        alpha: f64,
        beta: f64,
    ) -> Result<(f64, Option<G::Move>), SearchError> {
        if self.table.is_some() && state.fingerprint().is_none() {
            return Err(SearchError::MissingFingerprint);
        }
        self.scoring.check(state)?;

        self.root_depth = depth;
        self.root_move = None;
        let value = self.expectiminimax(state, depth, alpha, beta)?;
        Ok((value, self.root_move.take()))
    }

    fn expectiminimax(
        &mut self,
        state: &mut G,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64, SearchError> {
        self.nodes += 1;
        let alpha_orig = alpha;
        let at_root = depth == self.root_depth;

        // Transposition table lookup
        let cached = match self.table.as_deref_mut() {
            Some(tt) => tt.lookup(&*state)?,
            None => None,
        };

        if let Some(entry) = &cached {
            // Only trust entries searched at least as deep as we need
            if entry.depth >= depth {
                match entry.node_type {
                    NodeType::Exact => {
                        if at_root {
                            self.root_move = Some(entry.best_move.clone());
                        }
                        return Ok(entry.value);
                    }
                    NodeType::LowerBound => alpha = alpha.max(entry.value),
                    NodeType::UpperBound => beta = beta.min(entry.value),
                }

                if alpha >= beta {
                    if at_root {
                        self.root_move = Some(entry.best_move.clone());
                    }
                    return Ok(entry.value);
                }
            }
        }

        if depth == 0 || state.is_over() {
            return leaf_value(self.scoring, &*state, depth);
        }

        let mut moves = state.possible_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        // Hash move first, whatever depth it was found at
        order_moves(&mut moves, cached.as_ref().map(|entry| &entry.best_move))?;

        let mut best_move = moves[0].clone();
        if at_root {
            self.root_move = Some(best_move.clone());
        }
        let mut best_value = f64::NEG_INFINITY;
        let deterministic = state.is_deterministic();

        for mv in &moves {
            let expected = if deterministic {
                self.child_value(state, mv, depth, alpha, beta)?
            } else {
                self.chance_value(state, mv, depth, alpha, beta)?
            };

            if best_value < expected {
                best_value = expected;
                best_move = mv.clone();
            }

            if alpha < expected {
                alpha = expected;
                if at_root {
                    self.root_move = Some(mv.clone());
                }
                if alpha >= beta {
                    break;
                }
            }
        }

        if let Some(tt) = self.table.as_deref_mut() {
            assert!(
                moves.contains(&best_move),
                "best move {:?} is not in the legal move list",
                best_move
            );

            let node_type = if best_value <= alpha_orig {
                NodeType::UpperBound
            } else if best_value >= beta {
                NodeType::LowerBound
            } else {
                NodeType::Exact
            };
            tt.store_state(&*state, depth, best_value, best_move, node_type)?;
        }

        Ok(best_value)
    }

    /// Value of `mv` for the player to move: play it, search the reply with
    /// the negated window, negate back.
    fn child_value(
        &mut self,
        state: &mut G,
        mv: &G::Move,
        depth: u32,
        alpha: f64,
        beta: f64,
    ) -> Result<f64, SearchError> {
        let value = <G::Strategy as Branching<G>>::branch(state, mv, |child| {
            self.expectiminimax(child, depth - 1, -beta, -alpha)
        })?;
        Ok(-value)
    }

    /// Expected value of `mv` at a chance node.
    fn chance_value(
        &mut self,
        state: &mut G,
        mv: &G::Move,
        depth: u32,
        alpha: f64,
        beta: f64,
    ) -> Result<f64, SearchError> {
        let backfired = state
            .backfired_move(mv)
            .ok_or_else(|| SearchError::MissingChanceOutcome(format!("{:?}", mv)))?;

        let (alpha, beta) = match self.chance_pruning {
            ChancePruning::Exact => (f64::NEG_INFINITY, f64::INFINITY),
            ChancePruning::SharedWindow => (alpha, beta),
        };

        let p = self.backfire_probability;
        let intended = self.child_value(state, mv, depth, alpha, beta)?;
        let slipped = self.child_value(state, &backfired, depth, alpha, beta)?;
        Ok((1.0 - p) * intended + p * slipped)
    }
}

/// Single search with default chance settings.
///
/// `alpha`/`beta` double as a "certain win/loss" clamp: pass
/// `(-win_score, win_score)` to stop distinguishing between wins.
pub fn expectiminimax<G, S>(
    state: &mut G,
    depth: u32,
    scoring: &S,
    alpha: f64,
    beta: f64,
    table: Option<&mut TranspositionTable<G::Move>>,
) -> Result<(f64, Option<G::Move>), SearchError>
where
    G: Game,
    S: Scoring<G> + ?Sized,
{
    Search::new(scoring).with_table(table).run(state, depth, alpha, beta)
}
