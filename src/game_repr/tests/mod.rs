use super::*;

// ==================== HELPER FUNCTIONS ====================

/// Every position reachable from `game` in at most `depth` plies, walked
/// with the game's own branching strategy. Each entry is the visited state's
/// `Debug` rendering, so two walks can be compared move for move.
pub fn walk<G: Game + Debug>(game: &mut G, depth: u32, out: &mut Vec<String>) {
    out.push(format!("{:?}", game));
    if depth == 0 || game.is_over() {
        return;
    }
    for mv in game.possible_moves() {
        <G::Strategy as Branching<G>>::branch(game, &mv, |child| walk(child, depth - 1, out));
    }
}

// ==================== TEST MODULES ====================
