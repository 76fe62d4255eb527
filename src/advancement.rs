use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::BracketSlot;

/// Sent when a bracket game finishes, so its winner can be written into the next round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameCompleted {
    pub game_id: String,
    pub bracket_id: String,
    pub round: u32,
    pub position: u32,
    pub winner_team_id: String,
}

/// Fills later-round slots from completed games. This crate builds the empty slots;
/// moving winners into them belongs to whoever implements this trait.
pub trait BracketAdvancer {
    fn advance(&mut self, completed: &GameCompleted) -> Result<Option<BracketSlot>>;
}

/// The slot a winner of `(round, position)` moves into, or `None` after the final.
pub fn next_slot(round: u32, position: u32, rounds: u32) -> Option<(u32, u32)> {
    if round == 0 || position == 0 || round >= rounds {
        return None;
    }
    Some((round + 1, position.div_ceil(2)))
}
