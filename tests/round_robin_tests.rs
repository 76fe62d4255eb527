use std::collections::HashSet;

use tournament_scheduler_lambda_rust::model::{BracketSettings, BracketType, GameType, Team};
use tournament_scheduler_lambda_rust::round_robin::{generate_round_robin, pairings};

fn numbered_teams(n: usize) -> Vec<Team> {
    (1..=n).map(|i| Team::new(format!("t{}", i), format!("Team {}", i))).collect()
}

#[test]
fn every_pair_appears_exactly_once() {
    for n in 2..=12usize {
        let ids: Vec<usize> = (0..n).collect();
        let pairs = pairings(&ids);
        assert_eq!(pairs.len(), n * (n - 1) / 2, "n = {}", n);

        let mut seen = HashSet::new();
        for (home, away) in &pairs {
            assert_ne!(home, away, "team paired with itself for n = {}", n);
            let key = ((**home).min(**away), (**home).max(**away));
            assert!(seen.insert(key), "pair {:?} repeated for n = {}", key, n);
        }
    }
}

#[test]
fn pairs_come_out_in_index_order() {
    let ids = ["a", "b", "c"];
    let pairs: Vec<(&str, &str)> = pairings(&ids).into_iter().map(|(h, a)| (*h, *a)).collect();
    // (0,1) odd -> later hosts, (0,2) even -> earlier hosts, (1,2) odd -> later hosts
    assert_eq!(pairs, vec![("b", "a"), ("a", "c"), ("c", "b")]);
}

#[test]
fn generates_pool_games_in_pairing_order() {
    let field = numbered_teams(4);
    let settings = BracketSettings {
        pool_code: Some("A".to_string()),
        division: Some("U10".to_string()),
        games_per_team: Some(3),
        ..Default::default()
    };
    let generated = generate_round_robin("evt-3", "Pool A", &field, settings).unwrap();

    assert_eq!(generated.bracket.bracket_type, BracketType::PoolPlay);
    assert_eq!(generated.bracket.settings.team_count, Some(4));
    assert_eq!(generated.bracket.settings.games_per_team, Some(3));
    assert!(generated.slots.is_empty());
    assert_eq!(generated.games.len(), 6);
    assert!(generated.games.iter().all(|g| g.game_type == GameType::Pool));
    assert!(generated.games.iter().all(|g| g.division.as_deref() == Some("U10")));
    assert!(generated.games.iter().all(|g| g.bracket_id.as_deref() == Some(generated.bracket.id.as_str())));

    let expected: Vec<(String, String)> = pairings(&field)
        .into_iter()
        .map(|(h, a)| (h.id.clone(), a.id.clone()))
        .collect();
    let actual: Vec<(String, String)> = generated
        .games
        .iter()
        .map(|g| (g.home_team.id.clone(), g.away_team.id.clone()))
        .collect();
    assert_eq!(actual, expected);

    let ids: HashSet<&str> = generated.games.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids.len(), 6, "game ids should be unique");
}

#[test]
fn plain_round_robin_without_pool_code() {
    let generated = generate_round_robin("evt", "League", &numbered_teams(3), BracketSettings::default()).unwrap();
    assert_eq!(generated.bracket.bracket_type, BracketType::RoundRobin);
    assert_eq!(generated.games.len(), 3);
}

#[test]
fn needs_two_distinct_teams() {
    let err = generate_round_robin("evt", "x", &numbered_teams(1), BracketSettings::default()).unwrap_err();
    assert!(err.is_invalid_input(), "error was: {}", err);
    assert!(err.to_string().contains("at least 2 teams"), "error was: {}", err);

    let dup = vec![Team::new("a", "A"), Team::new("a", "A")];
    assert!(generate_round_robin("evt", "x", &dup, BracketSettings::default()).is_err());
}
