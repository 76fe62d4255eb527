pub mod bracket;
pub mod court;
pub mod game;
pub mod game_type;
pub mod team;
pub mod time_slot;

pub use bracket::{Bracket, BracketSettings, BracketSlot, BracketType};
pub use court::{Court, Venue};
pub use game::{BracketRound, Game};
pub use game_type::GameType;
pub use team::Team;
pub use time_slot::TimeSlot;
