use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::{Result, SchedulerError};
use crate::model::{Bracket, BracketRound, BracketSettings, BracketSlot, BracketType, Game, GameType, Team};

/// Shape of a single-elimination bracket for a given field size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketTopology {
    team_count: u32,
    total_slots: u32,
    rounds: u32,
}

impl BracketTopology {
    pub fn for_teams(team_count: u32) -> Result<Self> {
        if team_count < 2 {
            return Err(SchedulerError::invalid(format!(
                "a bracket needs at least 2 teams, got {}",
                team_count
            )));
        }
        let total_slots = team_count.next_power_of_two();
        Ok(Self { team_count, total_slots, rounds: total_slots.trailing_zeros() })
    }

    pub fn team_count(&self) -> u32 {
        self.team_count
    }

    /// Smallest power of two that seats every team.
    pub fn total_slots(&self) -> u32 {
        self.total_slots
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Slot count of round `round` (1-based); zero outside the bracket.
    pub fn slots_in_round(&self, round: u32) -> u32 {
        if round == 0 || round > self.rounds {
            return 0;
        }
        self.total_slots >> round
    }

    /// Seats in the full draw that have no team.
    pub fn empty_seats(&self) -> u32 {
        self.total_slots - self.team_count
    }

    /// Round-one games under sequential pairing: every complete pair of seeds plays.
    pub fn first_round_games(&self) -> u32 {
        self.team_count / 2
    }

    /// Round-one slots left without a game.
    pub fn first_round_byes(&self) -> u32 {
        self.slots_in_round(1) - self.first_round_games()
    }

    pub fn round_name(&self, round: u32) -> String {
        round_name(round, self.rounds)
    }
}

/// Name a round by its distance from the final; early rounds keep their absolute number.
pub fn round_name(round: u32, rounds: u32) -> String {
    match rounds.checked_sub(round) {
        Some(0) => "Championship".to_string(),
        Some(1) => "Semifinal".to_string(),
        Some(2) => "Quarterfinal".to_string(),
        _ => format!("Round {}", round),
    }
}

/// Result of pool or bracket generation: the bracket record, the games to be
/// scheduled and, for single elimination, every slot of the draw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedBracket {
    pub bracket: Bracket,
    pub games: Vec<Game>,
    pub slots: Vec<BracketSlot>,
}

/// Reject fields that are too small or that name the same team twice.
pub(crate) fn validate_teams(teams: &[Team]) -> Result<()> {
    if teams.len() < 2 {
        return Err(SchedulerError::invalid(format!("at least 2 teams are required, got {}", teams.len())));
    }
    let mut seen = HashSet::with_capacity(teams.len());
    for team in teams {
        if !seen.insert(team.id.as_str()) {
            return Err(SchedulerError::invalid(format!("team {} is listed more than once", team.id)));
        }
    }
    Ok(())
}

/// Order teams by an explicit seed list. Teams the list omits follow in their given order.
fn seeded_teams(teams: &[Team], seed_order: Option<&[String]>) -> Result<Vec<Team>> {
    let Some(seed_order) = seed_order else {
        return Ok(teams.to_vec());
    };

    let mut used = HashSet::with_capacity(seed_order.len());
    let mut seeded = Vec::with_capacity(teams.len());
    for id in seed_order {
        if !used.insert(id.as_str()) {
            return Err(SchedulerError::invalid(format!("seed {} appears more than once", id)));
        }
        let team = teams
            .iter()
            .find(|t| &t.id == id)
            .ok_or_else(|| SchedulerError::not_found("team", id.clone()))?;
        seeded.push(team.clone());
    }
    seeded.extend(teams.iter().filter(|t| !used.contains(t.id.as_str())).cloned());
    Ok(seeded)
}

/// Build a single-elimination bracket: round-one games from sequential seed pairs,
/// byes where a pair is incomplete, and empty slots for every later round.
///
/// Seeds are paired 1v2, 3v4, ... in the order given; no standard seeding is applied.
#[instrument(skip(teams, settings), fields(teams = teams.len()))]
pub fn generate_single_elimination(
    event_id: &str,
    name: &str,
    teams: &[Team],
    settings: BracketSettings,
) -> Result<GeneratedBracket> {
    validate_teams(teams)?;
    let seeded = seeded_teams(teams, settings.seed_order.as_deref())?;
    let topology = BracketTopology::for_teams(seeded.len() as u32)?;

    let bracket_id = Uuid::new_v4().to_string();
    let first_round_type = if topology.rounds() == 1 { GameType::Championship } else { GameType::Bracket };

    let mut games = Vec::with_capacity(topology.first_round_games() as usize);
    let mut slots = Vec::with_capacity(topology.total_slots() as usize - 1);

    for index in 0..topology.slots_in_round(1) as usize {
        let position = index as u32 + 1;
        let mut slot = BracketSlot {
            bracket_id: bracket_id.clone(),
            round: 1,
            position,
            game_id: None,
            bye_team_id: None,
        };
        match (seeded.get(2 * index), seeded.get(2 * index + 1)) {
            (Some(home), Some(away)) => {
                let mut game = Game::new(Uuid::new_v4().to_string(), home.clone(), away.clone(), first_round_type);
                game.event_id = Some(event_id.to_string());
                game.division = settings.division.clone();
                game.bracket_id = Some(bracket_id.clone());
                game.bracket_round = Some(BracketRound::Number(1));
                game.bracket_position = Some(position);
                slot.game_id = Some(game.id.clone());
                games.push(game);
            }
            (Some(lone), None) => slot.bye_team_id = Some(lone.id.clone()),
            _ => {}
        }
        slots.push(slot);
    }

    for round in 2..=topology.rounds() {
        for position in 1..=topology.slots_in_round(round) {
            slots.push(BracketSlot {
                bracket_id: bracket_id.clone(),
                round,
                position,
                game_id: None,
                bye_team_id: None,
            });
        }
    }

    let bracket = Bracket {
        id: bracket_id,
        event_id: event_id.to_string(),
        bracket_type: BracketType::SingleElim,
        name: name.to_string(),
        settings: BracketSettings {
            team_count: Some(topology.team_count()),
            rounds: Some(topology.rounds()),
            seed_order: Some(seeded.iter().map(|t| t.id.clone()).collect()),
            ..settings
        },
    };

    info!(
        bracket_id = %bracket.id,
        rounds = topology.rounds(),
        games = games.len(),
        byes = topology.first_round_byes(),
        "Generated single-elimination bracket"
    );
    Ok(GeneratedBracket { bracket, games, slots })
}
