use std::cmp::Reverse;

use crate::model::Game;

/// Order games for placement: higher game-type priority first, then earlier bracket
/// round, then lower bracket position. The sort is stable, so games that tie keep
/// their input order; round-robin games therefore stay in pairing order.
///
/// A game missing a numeric round or a position sorts after those that have one
/// within its priority band.
pub fn prioritize(games: &[Game]) -> Vec<&Game> {
    let mut ordered: Vec<&Game> = games.iter().collect();
    ordered.sort_by_key(|g| {
        // One total key: a game with a round or position outranks one without it,
        // instead of comparing those fields only when both games carry them.
        (
            Reverse(g.game_type.priority()),
            g.round_number().unwrap_or(u32::MAX),
            g.bracket_position.unwrap_or(u32::MAX),
        )
    });
    ordered
}
