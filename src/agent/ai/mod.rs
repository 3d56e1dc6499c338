// AI Agent - Expectiminimax with Alpha-Beta Pruning
//
// Game-agnostic search over anything implementing `Game`, in the negamax
// formulation with alpha-beta pruning, an optional transposition table and
// chance nodes whose moves may backfire.
//
// Key features:
// - Deterministic (same position and settings always give the same move)
// - Transposition table for caching positions, shared across iterations
// - Cached best move tried first
// - Iterative deepening with a time budget and early stop on solved roots

mod evaluation;
mod move_ordering;
mod negamax;
mod negamax_player;
mod search;
mod transposition_table;

#[cfg(test)]
mod tests;

pub use negamax_player::NegamaxPlayer;

// Re-export useful types
pub use evaluation::{leaf_value, GameScoring, Scoring};
pub use move_ordering::order_moves;
pub use negamax::{expectiminimax, Search};
pub use search::{
    iterative_deepening_search, solve_with_iterative_deepening, Outcome, SearchResult, Solution,
};
pub use transposition_table::{NodeType, Replacement, TranspositionTable, TranspositionTableEntry};
