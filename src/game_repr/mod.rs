//! Capability interface a game must implement to be searched.
//!
//! The engine never looks inside a position. Everything it needs (move
//! enumeration, applying and reverting moves, the terminal test, whose turn
//! it is, chance outcomes, scoring and a position key) goes through [`Game`].
//!
//! How a position is branched during the search is decided once per game
//! type through [`Game::Strategy`]:
//! - [`InPlace`]: one state is mutated and restored with an undo record
//!   (requires [`Reversible`]).
//! - [`CopyOnBranch`]: every explored move works on its own clone.
//!
//! [`Copied`] turns any cloneable game into its copy-on-branch twin so the two
//! strategies can be compared on identical rules.

mod nim;

#[cfg(test)]
mod tests;

pub use nim::*;

use smallvec::SmallVec;
use std::fmt::Debug;

/// Move list returned by [`Game::possible_moves`]. Most games fit inline.
pub type MoveList<M> = SmallVec<[M; 32]>;

pub trait Game: Sized {
    type Move: Clone + PartialEq + Debug;

    /// Branching strategy used by the search for this game type.
    type Strategy: Branching<Self>;

    /// All legal moves for the player to move, in the order they should be
    /// tried. Order matters for pruning, not for the result.
    fn possible_moves(&self) -> MoveList<Self::Move>;

    fn make_move(&mut self, mv: &Self::Move);

    fn is_over(&self) -> bool;

    /// Hand the turn to the other player.
    fn switch_player(&mut self);

    /// `false` marks a chance node: every move may backfire.
    fn is_deterministic(&self) -> bool {
        true
    }

    /// The outcome of `mv` when it backfires at a chance node.
    fn backfired_move(&self, _mv: &Self::Move) -> Option<Self::Move> {
        None
    }

    /// Score from the point of view of the player to move.
    fn scoring(&self) -> Option<f64> {
        None
    }

    /// Position key for the transposition table.
    fn fingerprint(&self) -> Option<u64> {
        None
    }
}

/// Games whose moves can be taken back exactly.
pub trait Reversible: Game {
    /// Whatever `make_move_undoable` needs to remember to restore the state.
    type Undo;

    fn make_move_undoable(&mut self, mv: &Self::Move) -> Self::Undo;

    /// Must leave no trace of the matching `make_move_undoable`.
    fn unmake_move(&mut self, mv: &Self::Move, undo: Self::Undo);
}

/// Explores one move: builds the child position (move applied, turn handed
/// over), runs `visit` on it and makes sure the parent looks untouched
/// afterwards.
pub trait Branching<G: Game> {
    const NAME: &'static str;

    fn branch<R>(state: &mut G, mv: &G::Move, visit: impl FnOnce(&mut G) -> R) -> R;
}

/// Mutate the shared state and undo afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InPlace {}

/// Clone the state for every explored move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOnBranch {}

impl<G: Reversible> Branching<G> for InPlace {
    const NAME: &'static str = "in-place";

    fn branch<R>(state: &mut G, mv: &G::Move, visit: impl FnOnce(&mut G) -> R) -> R {
        let undo = state.make_move_undoable(mv);
        state.switch_player();
        let result = visit(state);
        state.switch_player();
        state.unmake_move(mv, undo);
        result
    }
}

impl<G: Game + Clone> Branching<G> for CopyOnBranch {
    const NAME: &'static str = "copy-on-branch";

    fn branch<R>(state: &mut G, mv: &G::Move, visit: impl FnOnce(&mut G) -> R) -> R {
        let mut child = state.clone();
        child.make_move(mv);
        child.switch_player();
        visit(&mut child)
    }
}

/// Runs `G` with [`CopyOnBranch`] whatever strategy `G` itself declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Copied<G>(pub G);

impl<G> Copied<G> {
    pub fn into_inner(self) -> G {
        self.0
    }
}

impl<G: Game + Clone> Game for Copied<G> {
    type Move = G::Move;
    type Strategy = CopyOnBranch;

    fn possible_moves(&self) -> MoveList<Self::Move> {
        self.0.possible_moves()
    }

    fn make_move(&mut self, mv: &Self::Move) {
        self.0.make_move(mv)
    }

    fn is_over(&self) -> bool {
        self.0.is_over()
    }

    fn switch_player(&mut self) {
        self.0.switch_player()
    }

    fn is_deterministic(&self) -> bool {
        self.0.is_deterministic()
    }

    fn backfired_move(&self, mv: &Self::Move) -> Option<Self::Move> {
        self.0.backfired_move(mv)
    }

    fn scoring(&self) -> Option<f64> {
        self.0.scoring()
    }

    fn fingerprint(&self) -> Option<u64> {
        self.0.fingerprint()
    }
}
