//! NegamaxPlayer - game AI backed by the expectiminimax search
//!
//! Holds everything that stays the same from one move to the next: the
//! search configuration, the scoring function and the transposition table.
//! The table is kept across moves, so later searches start from what earlier
//! ones learnt.
//!
//! Without a time limit every move is one fixed-depth search inside the
//! `[-win_score, win_score]` window. With a time limit the player deepens
//! iteratively and plays the move of the deepest completed iteration.
//!
//! # Examples
//!
//! ```
//! use expectiminimax::agent::ai::NegamaxPlayer;
//! use expectiminimax::agent::Player;
//! use expectiminimax::config::SearchConfig;
//! use expectiminimax::game_repr::{Nim, NimMove};
//!
//! let config = SearchConfig::with_depth(4).win_score(100.0);
//! let mut ai: NegamaxPlayer<Nim> = NegamaxPlayer::new(config);
//! let mv = ai.get_move(&Nim::new(vec![1, 2])).unwrap();
//! assert_eq!(mv, NimMove::new(1, 2));
//! ```

use super::evaluation::{GameScoring, Scoring};
use super::negamax::Search;
use super::search::{iterative_deepening_search, SearchResult};
use super::transposition_table::TranspositionTable;
use crate::agent::player::Player;
use crate::config::{Difficulty, SearchConfig};
use crate::error::SearchError;
use crate::game_repr::Game;
use std::time::Instant;

pub struct NegamaxPlayer<G: Game> {
    config: SearchConfig,
    /// None uses the game's own scoring, checked on the first search.
    scoring: Option<Box<dyn Scoring<G>>>,
    table: Option<TranspositionTable<G::Move>>,
    name: String,
    last_result: Option<SearchResult<G::Move>>,
}

impl<G: Game + Clone> NegamaxPlayer<G> {
    pub fn new(config: SearchConfig) -> Self {
        let table = config.use_table.then(|| {
            TranspositionTable::with_capacity(config.table_capacity)
                .with_replacement(config.replacement)
        });
        let name = format!("Negamax({})", config.max_depth);

        Self {
            config,
            scoring: None,
            table,
            name,
            last_result: None,
        }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(SearchConfig::from_difficulty(difficulty)).with_name(difficulty.name())
    }

    pub fn with_scoring(mut self, scoring: impl Scoring<G> + 'static) -> Self {
        self.scoring = Some(Box::new(scoring));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn table(&self) -> Option<&TranspositionTable<G::Move>> {
        self.table.as_ref()
    }

    /// Statistics of the search behind the last move.
    pub fn last_result(&self) -> Option<&SearchResult<G::Move>> {
        self.last_result.as_ref()
    }

    fn search(&mut self, state: &G) -> Result<SearchResult<G::Move>, SearchError> {
        let scoring: &dyn Scoring<G> = match &self.scoring {
            Some(scoring) => scoring.as_ref(),
            None => &GameScoring,
        };

        // Search on a copy; the caller's game is only read
        let mut search_state = state.clone();

        if self.config.time_limit_ms.is_some() {
            return iterative_deepening_search(
                &mut search_state,
                scoring,
                &self.config,
                self.table.as_mut(),
            );
        }

        let start_time = Instant::now();
        let depth = self.config.max_depth.max(1);
        let (alpha, beta) = self.config.window();
        let mut search = Search::with_config(scoring, &self.config).with_table(self.table.as_mut());
        let (score, best_move) = search.run(&mut search_state, depth, alpha, beta)?;
        let nodes_searched = search.nodes;

        let (table_hits, table_misses) = self
            .table
            .as_ref()
            .map_or((0, 0), |tt| (tt.hits, tt.misses));

        Ok(SearchResult {
            best_move,
            score,
            depth,
            nodes_searched,
            time_ms: start_time.elapsed().as_millis() as u64,
            table_hits,
            table_misses,
        })
    }
}

impl<G: Game + Clone> Player<G> for NegamaxPlayer<G> {
    fn get_move(&mut self, state: &G) -> Result<G::Move, SearchError> {
        let result = self.search(state)?;
        log::debug!(
            "{} chose {:?} (score {:.4}, depth {}, {} nodes)",
            self.name,
            result.best_move,
            result.score,
            result.depth,
            result.nodes_searched
        );

        // Only a finished game has nothing to search
        let best_move = result.best_move.clone().ok_or(SearchError::NoLegalMoves)?;
        self.last_result = Some(result);
        Ok(best_move)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
