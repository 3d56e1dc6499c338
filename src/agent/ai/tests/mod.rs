// Search tests on small hand-made games
//
// `TreeGame` is an explicit game graph with a score on every node, so search
// results can be checked against a brute-force negamax. Nodes are shared
// between parents of the same level, which gives the table transpositions. The other games here
// each break one part of the `Game` contract.


use crate::game_repr::{CopyOnBranch, Game, MoveList, Nim, NimMove, Reversible};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::rc::Rc;

#[derive(Debug)]
struct Tree {
    children: Vec<Vec<usize>>,
    /// Score of each node for the player to move there.
    scores: Vec<f64>,
}

/// Walks an explicit game graph. A move is the id of the child node.
#[derive(Debug, Clone)]
pub struct TreeGame {
    tree: Rc<Tree>,
    path: Vec<usize>,
}

impl TreeGame {
    /// Random layered graph of the given height. Inner nodes get up to
    /// `branching` children, one in three of them taken over from an earlier
    /// node of the same level; roughly one in eight inner nodes ends the game
    /// early. A shared node sits at the same depth from every parent, so it
    /// stands for the same position wherever it is reached.
    pub fn random(seed: u64, height: u32, branching: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tree = Tree {
            children: vec![Vec::new()],
            scores: vec![rng.gen_range(-50..=50) as f64],
        };

        let mut level = vec![0];
        for _ in 0..height {
            let mut next = Vec::new();
            for &node in &level {
                if node != 0 && rng.gen_ratio(1, 8) {
                    continue;
                }
                for _ in 0..rng.gen_range(1..=branching) {
                    if !next.is_empty() && rng.gen_ratio(1, 3) {
                        let shared = next[rng.gen_range(0..next.len())];
                        if !tree.children[node].contains(&shared) {
                            tree.children[node].push(shared);
                        }
                        continue;
                    }

                    let id = tree.scores.len();
                    tree.scores.push(rng.gen_range(-50..=50) as f64);
                    tree.children.push(Vec::new());
                    tree.children[node].push(id);
                    next.push(id);
                }
            }
            level = next;
        }

        Self {
            tree: Rc::new(tree),
            path: vec![0],
        }
    }

    pub fn node(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    pub fn is_root(&self) -> bool {
        self.path.len() == 1
    }
}

impl Game for TreeGame {
    type Move = usize;
    type Strategy = crate::game_repr::InPlace;

    fn possible_moves(&self) -> MoveList<usize> {
        self.tree.children[self.node()].iter().copied().collect()
    }

    fn make_move(&mut self, mv: &usize) {
        self.path.push(*mv);
    }

    fn is_over(&self) -> bool {
        self.tree.children[self.node()].is_empty()
    }

    // Scores are already stored from the mover's side
    fn switch_player(&mut self) {}

    fn scoring(&self) -> Option<f64> {
        Some(self.tree.scores[self.node()])
    }

    fn fingerprint(&self) -> Option<u64> {
        Some(self.node() as u64)
    }
}

impl Reversible for TreeGame {
    type Undo = ();

    fn make_move_undoable(&mut self, mv: &usize) {
        self.make_move(mv);
    }

    fn unmake_move(&mut self, _mv: &usize, _undo: ()) {
        self.path.pop();
    }
}

/// Plain negamax without pruning, table or move ordering.
pub fn brute_force(game: &TreeGame, depth: u32) -> f64 {
    if depth == 0 || game.is_over() {
        return game.scoring().unwrap_or(f64::NAN) * (1.0 + 0.001 * depth as f64);
    }

    game.possible_moves()
        .iter()
        .map(|mv| {
            let mut child = game.clone();
            child.make_move(mv);
            -brute_force(&child, depth - 1)
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Plain expectiminimax over stochastic Nim.
pub fn brute_force_chance(
    game: &Nim,
    depth: u32,
    scoring: &dyn Fn(&Nim) -> f64,
    backfire_probability: f64,
) -> f64 {
    if depth == 0 || game.is_over() {
        return scoring(game) * (1.0 + 0.001 * depth as f64);
    }

    let child_value = |mv: &NimMove| {
        let mut child = game.clone();
        child.make_move(mv);
        child.switch_player();
        -brute_force_chance(&child, depth - 1, scoring, backfire_probability)
    };

    game.possible_moves()
        .iter()
        .map(|mv| {
            if game.is_deterministic() {
                child_value(mv)
            } else {
                let backfired = game.backfired_move(mv).unwrap_or(*mv);
                (1.0 - backfire_probability) * child_value(mv)
                    + backfire_probability * child_value(&backfired)
            }
        })
        .fold(f64::NEG_INFINITY, f64::max)
}

pub fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

/// Not over, yet no move to play.
#[derive(Debug, Clone)]
pub struct Stuck;

impl Game for Stuck {
    type Move = u8;
    type Strategy = CopyOnBranch;

    fn possible_moves(&self) -> MoveList<u8> {
        MoveList::new()
    }
    fn make_move(&mut self, _mv: &u8) {}
    fn is_over(&self) -> bool {
        false
    }
    fn switch_player(&mut self) {}
    fn scoring(&self) -> Option<f64> {
        Some(0.0)
    }
    fn fingerprint(&self) -> Option<u64> {
        Some(0)
    }
}

/// Nim with some of its capabilities taken away.
#[derive(Debug, Clone)]
pub struct Crippled {
    pub nim: Nim,
    pub fingerprint: bool,
    pub backfire: bool,
}

impl Crippled {
    pub fn without_fingerprint(nim: Nim) -> Self {
        Self {
            nim,
            fingerprint: false,
            backfire: true,
        }
    }

    pub fn without_backfire(nim: Nim) -> Self {
        Self {
            nim,
            fingerprint: true,
            backfire: false,
        }
    }
}

impl Game for Crippled {
    type Move = NimMove;
    type Strategy = CopyOnBranch;

    fn possible_moves(&self) -> MoveList<NimMove> {
        self.nim.possible_moves()
    }
    fn make_move(&mut self, mv: &NimMove) {
        self.nim.make_move(mv)
    }
    fn is_over(&self) -> bool {
        self.nim.is_over()
    }
    fn switch_player(&mut self) {
        self.nim.switch_player()
    }
    fn is_deterministic(&self) -> bool {
        self.nim.is_deterministic()
    }
    fn backfired_move(&self, mv: &NimMove) -> Option<NimMove> {
        self.backfire.then(|| self.nim.backfired_move(mv)).flatten()
    }
    fn scoring(&self) -> Option<f64> {
        self.nim.scoring()
    }
    fn fingerprint(&self) -> Option<u64> {
        self.fingerprint.then(|| self.nim.fingerprint()).flatten()
    }
}
