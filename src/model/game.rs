use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::game_type::GameType;
use crate::model::team::Team;

/// Round identifier carried on bracket games. Older records store a computed label
/// ("Semifinal") instead of the round number; only numbers take part in ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BracketRound {
    Number(u32),
    Label(String),
}

impl BracketRound {
    pub fn number(&self) -> Option<u32> {
        match self {
            BracketRound::Number(n) => Some(*n),
            BracketRound::Label(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub event_id: Option<String>,
    pub home_team: Team,
    pub away_team: Team,
    pub game_type: GameType,
    pub division: Option<String>,
    // Set for bracket games: (bracket_id, bracket_round, bracket_position) names the slot it fills
    pub bracket_id: Option<String>,
    pub bracket_round: Option<BracketRound>,
    pub bracket_position: Option<u32>,
    pub court_id: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Game {
    /// An unscheduled game between two teams with no bracket metadata.
    pub fn new(id: impl Into<String>, home_team: Team, away_team: Team, game_type: GameType) -> Self {
        Self {
            id: id.into(),
            event_id: None,
            home_team,
            away_team,
            game_type,
            division: None,
            bracket_id: None,
            bracket_round: None,
            bracket_position: None,
            court_id: None,
            scheduled_at: None,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.court_id.is_some()
    }

    pub fn round_number(&self) -> Option<u32> {
        self.bracket_round.as_ref().and_then(BracketRound::number)
    }
}
