use crate::error::SearchError;
use crate::game_repr::Game;
use std::collections::HashMap;

/// Node type for transposition table entries
///
/// This is crucial for alpha-beta pruning:
/// - Exact: The exact value for this position
/// - LowerBound: Value is at least this (beta cutoff)
/// - UpperBound: Value is at most this (all moves failed low)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Exact value - position was fully searched inside the window
    Exact,
    /// Lower bound - beta cutoff occurred
    LowerBound,
    /// Upper bound - no move raised alpha
    UpperBound,
}

/// What to do when a key that is already present gets stored again.
///
/// Neither policy verifies the full position behind a key: two states with
/// the same fingerprint share one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Replacement {
    /// The newest result always wins.
    #[default]
    AlwaysReplace,
    /// Keep the deeper result, unless the new one is exact and the old one
    /// only a bound.
    DepthPreferred,
}

/// Entry in the transposition table
#[derive(Debug, Clone, PartialEq)]
pub struct TranspositionTableEntry<M> {
    /// Fingerprint of the position
    pub hash: u64,
    /// Remaining depth the position was searched with
    pub depth: u32,
    /// Value from the point of view of the player to move
    pub value: f64,
    /// Best move found in this position
    pub best_move: M,
    /// Type of node (exact, lower bound, upper bound)
    pub node_type: NodeType,
}

/// Transposition Table for storing previously searched positions
///
/// Keyed by [`Game::fingerprint`]. Lives exactly as long as the caller keeps
/// it; nothing is persisted.
#[derive(Debug)]
pub struct TranspositionTable<M> {
    /// HashMap storing entries by fingerprint
    table: HashMap<u64, TranspositionTableEntry<M>>,
    /// Maximum number of entries allowed
    max_size: usize,
    replacement: Replacement,
    /// Statistics: number of successful probes
    pub hits: u64,
    /// Statistics: number of failed probes
    pub misses: u64,
}

impl<M: Clone> TranspositionTable<M> {
    /// Create a transposition table with default size (1 million entries)
    pub fn new() -> Self {
        Self::with_capacity(1_000_000)
    }

    /// Create a new transposition table with specified maximum size
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries
    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            table: HashMap::with_capacity(max_size.min(100_000)),
            max_size,
            replacement: Replacement::default(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }

    pub fn replacement(&self) -> Replacement {
        self.replacement
    }

    /// Probe the transposition table for a fingerprint
    ///
    /// Returns a copy of the entry if found, None otherwise.
    /// Updates hit/miss statistics.
    pub fn probe(&mut self, hash: u64) -> Option<TranspositionTableEntry<M>> {
        match self.table.get(&hash) {
            Some(entry) => {
                self.hits += 1;
                Some(entry.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Probe by position.
    pub fn lookup<G>(&mut self, state: &G) -> Result<Option<TranspositionTableEntry<M>>, SearchError>
    where
        G: Game<Move = M>,
    {
        let hash = state.fingerprint().ok_or(SearchError::MissingFingerprint)?;
        Ok(self.probe(hash))
    }

    /// Store an entry in the transposition table
    ///
    /// Existing keys are replaced according to the table's [`Replacement`]
    /// policy. When the table is full, positions not yet present are dropped.
    pub fn store(&mut self, entry: TranspositionTableEntry<M>) {
        if let Some(existing) = self.table.get(&entry.hash) {
            if !self.should_replace(existing, &entry) {
                return;
            }
        } else if self.table.len() >= self.max_size {
            return;
        }

        self.table.insert(entry.hash, entry);
    }

    /// Store by position.
    pub fn store_state<G>(
        &mut self,
        state: &G,
        depth: u32,
        value: f64,
        best_move: M,
        node_type: NodeType,
    ) -> Result<(), SearchError>
    where
        G: Game<Move = M>,
    {
        let hash = state.fingerprint().ok_or(SearchError::MissingFingerprint)?;
        self.store(TranspositionTableEntry {
            hash,
            depth,
            value,
            best_move,
            node_type,
        });
        Ok(())
    }

    fn should_replace(
        &self,
        existing: &TranspositionTableEntry<M>,
        entry: &TranspositionTableEntry<M>,
    ) -> bool {
        match self.replacement {
            Replacement::AlwaysReplace => true,
            Replacement::DepthPreferred => {
                entry.depth >= existing.depth
                    || (entry.node_type == NodeType::Exact
                        && existing.node_type != NodeType::Exact)
            }
        }
    }

    /// Clear the transposition table
    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
    }

    /// Get current table size
    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Get hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl<M: Clone> Default for TranspositionTable<M> {
    fn default() -> Self {
        Self::new()
    }
}
