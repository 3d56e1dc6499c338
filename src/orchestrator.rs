//! Match orchestration between two players.
//!
//! [`Match`] owns nothing but the two players, the match settings and the
//! dice for chance nodes. It drives the game loop:
//!
//! ```text
//! [Request Move] -> [Player provides move] -> [Roll for backfire]
//!   -> [Execute Move] -> [Check End] -> [Switch Turn] -> [Request Move] ...
//! ```
//!
//! The player to move is asked for a move on a read-only view of the game;
//! the orchestrator is the only one that mutates it.

use crate::agent::player::Player;
use crate::config::MatchConfig;
use crate::error::SearchError;
use crate::game_repr::Game;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// One ply of a finished or abandoned match.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayedMove<M> {
    /// 0 for the player who moved first, 1 for the other.
    pub player: usize,
    /// The move the player asked for.
    pub chosen: M,
    /// The move that was executed; differs from `chosen` after a backfire.
    pub played: M,
    pub backfired: bool,
    pub think_time: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameReport<M> {
    pub moves: Vec<PlayedMove<M>>,
    /// False when the match hit `max_moves` first.
    pub finished: bool,
    /// Index of the player to move once the match stopped.
    pub player_to_move: usize,
    pub backfires: u32,
    /// Mean time each player spent in `get_move`.
    pub mean_think_time: [Duration; 2],
}

impl<M> GameReport<M> {
    pub fn plies(&self) -> usize {
        self.moves.len()
    }
}

/// A game between two players. Index 0 moves first.
pub struct Match<'a, G: Game> {
    players: [&'a mut dyn Player<G>; 2],
    config: MatchConfig,
    rng: StdRng,
}

impl<'a, G: Game> Match<'a, G> {
    pub fn new(
        first: &'a mut dyn Player<G>,
        second: &'a mut dyn Player<G>,
        config: MatchConfig,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            players: [first, second],
            config,
            rng,
        }
    }

    /// Play `state` until the game is over or `max_moves` plies were made.
    ///
    /// A player returning a move that is not legal in the current position
    /// ends the match with [`SearchError::InvalidMove`].
    pub fn play(&mut self, state: &mut G) -> Result<GameReport<G::Move>, SearchError> {
        let backfire_probability = self.config.backfire_probability.clamp(0.0, 1.0);
        let mut moves = Vec::new();
        let mut think_time = [Duration::ZERO; 2];
        let mut turns = [0u32; 2];
        let mut backfires = 0;
        let mut current = 0;

        while !state.is_over() && moves.len() < self.config.max_moves as usize {
            let player = &mut self.players[current];

            // Request move
            let start = Instant::now();
            let chosen = player.get_move(state)?;
            let elapsed = start.elapsed();
            think_time[current] += elapsed;
            turns[current] += 1;

            if !state.possible_moves().contains(&chosen) {
                return Err(SearchError::InvalidMove(format!("{:?}", chosen)));
            }

            // Roll for backfire
            let backfired = !state.is_deterministic() && self.rng.gen_bool(backfire_probability);
            let played = if backfired {
                backfires += 1;
                state
                    .backfired_move(&chosen)
                    .ok_or_else(|| SearchError::MissingChanceOutcome(format!("{:?}", chosen)))?
            } else {
                chosen.clone()
            };

            // Execute move
            state.make_move(&played);
            log::info!(
                "{} plays {:?}: {}",
                player.name(),
                chosen,
                if backfired { "backfired" } else { "succeeded" }
            );

            moves.push(PlayedMove {
                player: current,
                chosen,
                played,
                backfired,
                think_time: elapsed,
            });

            // Switch turn
            state.switch_player();
            current = 1 - current;
        }

        let finished = state.is_over();
        if !finished {
            log::warn!("match abandoned after {} plies", moves.len());
        }

        let mean_think_time = [0, 1].map(|i| match turns[i] {
            0 => Duration::ZERO,
            n => think_time[i] / n,
        });

        Ok(GameReport {
            moves,
            finished,
            player_to_move: current,
            backfires,
            mean_think_time,
        })
    }
}
