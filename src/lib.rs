//! Expectiminimax game-tree search.
//!
//! A game describes itself through [`game_repr::Game`]; the search in
//! [`agent::ai`] then finds the best move with negamax, alpha-beta pruning,
//! a transposition table and chance nodes. [`orchestrator::Match`] plays
//! whole games between two [`agent::Player`]s.

pub mod agent;
pub mod config;
pub mod error;
pub mod game_repr;
pub mod orchestrator;

pub use agent::ai::{expectiminimax, iterative_deepening_search, solve_with_iterative_deepening};
pub use error::SearchError;
