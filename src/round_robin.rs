use tracing::{info, instrument};
use uuid::Uuid;

use crate::bracket::{GeneratedBracket, validate_teams};
use crate::error::Result;
use crate::model::{Bracket, BracketSettings, BracketType, Game, GameType, Team};

/// Every unordered pair of `teams` exactly once, as `(home, away)`.
///
/// Pairs come out with the lower index outer and the higher index inner. For indices
/// `i < j` the earlier team hosts when `i + j` is even, otherwise the later one does,
/// which spreads home games without promising an exact split.
pub fn pairings<T>(teams: &[T]) -> Vec<(&T, &T)> {
    let n = teams.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            if (i + j) % 2 == 0 {
                pairs.push((&teams[i], &teams[j]));
            } else {
                pairs.push((&teams[j], &teams[i]));
            }
        }
    }
    pairs
}

/// Create a pool: one POOL game per pairing, in pairing order.
#[instrument(skip(teams, settings), fields(teams = teams.len()))]
pub fn generate_round_robin(
    event_id: &str,
    name: &str,
    teams: &[Team],
    settings: BracketSettings,
) -> Result<GeneratedBracket> {
    validate_teams(teams)?;

    let bracket_id = Uuid::new_v4().to_string();
    let bracket_type = if settings.pool_code.is_some() { BracketType::PoolPlay } else { BracketType::RoundRobin };

    let games: Vec<Game> = pairings(teams)
        .into_iter()
        .map(|(home, away)| {
            let mut game = Game::new(Uuid::new_v4().to_string(), home.clone(), away.clone(), GameType::Pool);
            game.event_id = Some(event_id.to_string());
            game.division = settings.division.clone();
            game.bracket_id = Some(bracket_id.clone());
            game
        })
        .collect();

    let bracket = Bracket {
        id: bracket_id,
        event_id: event_id.to_string(),
        bracket_type,
        name: name.to_string(),
        settings: BracketSettings { team_count: Some(teams.len() as u32), ..settings },
    };

    info!(bracket_id = %bracket.id, pool = ?bracket.settings.pool_code, games = games.len(), "Generated round robin");
    Ok(GeneratedBracket { bracket, games, slots: Vec::new() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_follows_index_parity() {
        let pairs = pairings(&[0, 1, 2, 3]);
        let as_values: Vec<(i32, i32)> = pairs.into_iter().map(|(h, a)| (*h, *a)).collect();
        assert_eq!(as_values, vec![(1, 0), (0, 2), (3, 0), (2, 1), (1, 3), (3, 2)]);
    }

    #[test]
    fn fewer_than_two_teams_yields_nothing() {
        assert!(pairings::<u8>(&[]).is_empty());
        assert!(pairings(&[7]).is_empty());
    }
}
