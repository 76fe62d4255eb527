use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameType {
    Pool,
    Bracket,
    Consolation,
    Championship,
    Exhibition,
    #[serde(other)]
    Unknown,
}

impl GameType {
    /// Competitive weight used to order games before placement; higher goes first.
    pub fn priority(self) -> u8 {
        match self {
            GameType::Championship => 5,
            GameType::Consolation => 4,
            GameType::Bracket => 3,
            GameType::Pool => 2,
            GameType::Exhibition => 1,
            GameType::Unknown => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameType::Pool => "Pool",
            GameType::Bracket => "Bracket",
            GameType::Consolation => "Consolation",
            GameType::Championship => "Championship",
            GameType::Exhibition => "Exhibition",
            GameType::Unknown => "Game",
        }
    }
}
