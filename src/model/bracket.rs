use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BracketType {
    RoundRobin,
    PoolPlay,
    SingleElim,
}

/// Recognised options for pool and bracket generation. Anything else in the
/// incoming JSON is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BracketSettings {
    pub team_count: Option<u32>,
    /// Filled in by single-elimination generation.
    pub rounds: Option<u32>,
    /// Team ids in seed order. Defaults to the order teams were supplied in.
    pub seed_order: Option<Vec<String>>,
    pub pool_code: Option<String>,
    /// Recorded for display; pairings are always a full round robin.
    pub games_per_team: Option<u32>,
    pub division: Option<String>,
    pub age_group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: String,
    pub event_id: String,
    #[serde(rename = "type")]
    pub bracket_type: BracketType,
    pub name: String,
    pub settings: BracketSettings,
}

/// One (round, position) cell of a bracket. `game_id` is empty for a bye or for a
/// later-round slot whose teams are not decided yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlot {
    pub bracket_id: String,
    pub round: u32,
    pub position: u32,
    pub game_id: Option<String>,
    /// Team that advances without playing, when this slot is a bye with a team in it.
    pub bye_team_id: Option<String>,
}

impl BracketSlot {
    /// Any round-one slot without a game: either a lone team advancing (`bye_team_id` set)
    /// or an empty seat with no team at all.
    pub fn is_bye(&self) -> bool {
        self.round == 1 && self.game_id.is_none()
    }
}
