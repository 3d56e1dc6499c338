pub mod player;
pub use player::*;

pub mod ai;
pub use ai::{GameScoring, NegamaxPlayer, Scoring, SearchResult, TranspositionTable};
