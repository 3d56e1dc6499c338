//! Nim: the reference game used by the binary, the tests and the benches.
//!
//! Players take turns removing one or more sticks from a single pile. The
//! player who takes the last stick loses, so a finished position scores 100
//! for the player to move. In stochastic mode every move is a chance node:
//! one time in ten the player's hand slips and one stick fewer is taken.

use super::{Game, InPlace, MoveList, Reversible};
use crate::error::SearchError;
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Score of a finished game for the player to move.
pub const WIN_SCORE: f64 = 100.0;

/// Take `count` sticks from `pile` (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NimMove {
    pub pile: usize,
    pub count: u32,
}

impl NimMove {
    pub fn new(pile: usize, count: u32) -> Self {
        Self { pile, count }
    }
}

/// Written as `pile,count` with a 1-based pile, e.g. `2,3`.
impl fmt::Display for NimMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.pile + 1, self.count)
    }
}

impl FromStr for NimMove {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SearchError::InvalidMove(s.to_string());
        let (pile, count) = s.split_once(',').ok_or_else(invalid)?;
        let pile: usize = pile.trim().parse().map_err(|_| invalid())?;
        let count: u32 = count.trim().parse().map_err(|_| invalid())?;
        if pile == 0 {
            return Err(invalid());
        }
        Ok(Self::new(pile - 1, count))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nim {
    piles: Vec<u32>,
    /// 1 or 2.
    current_player: u8,
    /// Plies played so far.
    nmove: u32,
    deterministic: bool,
}

impl Nim {
    pub fn new(piles: Vec<u32>) -> Self {
        Self {
            piles,
            current_player: 1,
            nmove: 0,
            deterministic: true,
        }
    }

    /// Nim where every move may backfire.
    pub fn stochastic(piles: Vec<u32>) -> Self {
        Self::new(piles).with_deterministic(false)
    }

    pub fn with_deterministic(mut self, deterministic: bool) -> Self {
        self.deterministic = deterministic;
        self
    }

    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    pub fn current_player(&self) -> u8 {
        self.current_player
    }

    pub fn nmove(&self) -> u32 {
        self.nmove
    }

    /// The player to move once the last stick is gone.
    pub fn winner(&self) -> Option<u8> {
        self.is_over().then_some(self.current_player)
    }

    /// Check that `mv` is in the legal move list.
    pub fn validate(&self, mv: &NimMove) -> Result<(), SearchError> {
        let legal = self
            .piles
            .get(mv.pile)
            .is_some_and(|&sticks| mv.count >= 1 && mv.count <= sticks);
        if legal {
            Ok(())
        } else {
            Err(SearchError::InvalidMove(mv.to_string()))
        }
    }

    /// Play a checked move and hand the turn over.
    pub fn play(&mut self, mv: &NimMove) -> Result<(), SearchError> {
        self.validate(mv)?;
        self.make_move(mv);
        self.switch_player();
        Ok(())
    }
}

impl Default for Nim {
    fn default() -> Self {
        Self::new(vec![5, 5, 5, 5])
    }
}

impl fmt::Display for Nim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let piles: Vec<String> = self.piles.iter().map(u32::to_string).collect();
        write!(f, "{}", piles.join(" "))
    }
}

impl Game for Nim {
    type Move = NimMove;
    type Strategy = InPlace;

    fn possible_moves(&self) -> MoveList<NimMove> {
        self.piles
            .iter()
            .enumerate()
            .flat_map(|(pile, &sticks)| (1..=sticks).map(move |count| NimMove::new(pile, count)))
            .collect()
    }

    fn make_move(&mut self, mv: &NimMove) {
        self.piles[mv.pile] = self.piles[mv.pile].saturating_sub(mv.count);
        self.nmove += 1;
    }

    fn is_over(&self) -> bool {
        self.piles.iter().all(|&sticks| sticks == 0)
    }

    fn switch_player(&mut self) {
        self.current_player = if self.current_player == 1 { 2 } else { 1 };
    }

    fn is_deterministic(&self) -> bool {
        self.deterministic
    }

    fn backfired_move(&self, mv: &NimMove) -> Option<NimMove> {
        Some(NimMove::new(mv.pile, mv.count.saturating_sub(1)))
    }

    fn scoring(&self) -> Option<f64> {
        Some(if self.is_over() { WIN_SCORE } else { 0.0 })
    }

    /// The ply count is part of the key: two positions only share an entry
    /// when they sit at the same distance from the root, which keeps the
    /// depth tie-break of cached values identical to a fresh search.
    fn fingerprint(&self) -> Option<u64> {
        let mut hasher = DefaultHasher::new();
        self.piles.hash(&mut hasher);
        self.current_player.hash(&mut hasher);
        self.nmove.hash(&mut hasher);
        Some(hasher.finish())
    }
}

impl Reversible for Nim {
    /// Stick count of the touched pile before the move.
    type Undo = u32;

    fn make_move_undoable(&mut self, mv: &NimMove) -> u32 {
        let before = self.piles[mv.pile];
        self.make_move(mv);
        before
    }

    fn unmake_move(&mut self, mv: &NimMove, undo: u32) {
        self.piles[mv.pile] = undo;
        self.nmove -= 1;
    }
}
