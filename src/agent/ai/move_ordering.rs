// Move ordering from the transposition table hint
//
// The only ordering the search uses: if the table remembers a best move for
// the position, try it first, then the game's natural order.

use crate::error::SearchError;
use crate::game_repr::MoveList;
use std::fmt::Debug;

/// Move `hint` to the front of `moves`, keeping the others in order.
///
/// A hint that is not in the list means the cached entry belongs to another
/// position (fingerprint collision) or move generation is unstable. That is
/// reported, never patched over.
pub fn order_moves<M: PartialEq + Debug>(
    moves: &mut MoveList<M>,
    hint: Option<&M>,
) -> Result<(), SearchError> {
    let Some(hint) = hint else {
        return Ok(());
    };

    let index = moves
        .iter()
        .position(|mv| mv == hint)
        .ok_or_else(|| SearchError::ForeignTableMove(format!("{:?}", hint)))?;
    moves[..=index].rotate_right(1);
    Ok(())
}
