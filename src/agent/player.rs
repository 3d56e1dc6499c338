//! Player trait for entities that pick moves in a game.
//!
//! The orchestrator asks the player to move for a move, executes it and hands
//! the turn over. Players never mutate the game they are shown; a searching
//! player works on its own copy.
//!
//! # Synchronous Design
//!
//! `get_move()` blocks until a move is chosen. The search is synchronous and
//! single-threaded, so there is nothing to await.

use crate::error::SearchError;
use crate::game_repr::Game;

pub trait Player<G: Game> {
    /// Choose a move for the player to move in `state`.
    ///
    /// Errors from the underlying search (configuration problems, a broken
    /// game contract) are passed through untouched.
    fn get_move(&mut self, state: &G) -> Result<G::Move, SearchError>;

    /// Display name used in logs and reports.
    fn name(&self) -> &str {
        "Player"
    }
}

impl<G: Game, P: Player<G> + ?Sized> Player<G> for Box<P> {
    fn get_move(&mut self, state: &G) -> Result<G::Move, SearchError> {
        (**self).get_move(state)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
