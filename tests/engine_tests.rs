use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::America::Los_Angeles;

use tournament_scheduler_lambda_rust::engine::{NO_SLOTS_REASON, ScheduleRequest, Scheduler};
use tournament_scheduler_lambda_rust::model::{BracketSettings, Court, Game, GameType, Team, Venue};
use tournament_scheduler_lambda_rust::round_robin::generate_round_robin;
use tournament_scheduler_lambda_rust::settings::SchedulerSettings;
use tournament_scheduler_lambda_rust::store::InMemoryStore;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()
}

fn courts(n: usize) -> Vec<Court> {
    let venue = Venue { id: "v1".into(), name: "Eastside Rec Center".into() };
    (1..=n)
        .map(|i| Court { id: format!("c{}", i), name: format!("Court {}", i), venue: venue.clone() })
        .collect()
}

fn numbered_teams(n: usize) -> Vec<Team> {
    (1..=n).map(|i| Team::new(format!("t{}", i), format!("Team {}", i))).collect()
}

fn pool_games(n: usize) -> Vec<Game> {
    generate_round_robin("evt", "Pool", &numbered_teams(n), BracketSettings::default())
        .unwrap()
        .games
}

fn game(id: &str, home: &str, away: &str, game_type: GameType) -> Game {
    Game::new(id, Team::new(home, home.to_uppercase()), Team::new(away, away.to_uppercase()), game_type)
}

fn request(games: Vec<Game>, courts: Vec<Court>, start: &str, end: &str, rest: u32) -> ScheduleRequest {
    ScheduleRequest::new(games, courts, date(), Los_Angeles, SchedulerSettings::new(start, end, 60, rest))
}

/// 08:00 local (PDT) on the test date.
fn local(h: u32, m: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 14, h + 7, m, 0).unwrap()
}

#[test]
fn four_team_pool_on_one_court_fills_the_morning() {
    let games = pool_games(4);
    let proposal = Scheduler::preview(&request(games.clone(), courts(1), "08:00", "12:00", 60)).unwrap();

    assert_eq!(proposal.stats.total_games, 6);
    assert_eq!(proposal.stats.scheduled, 4);
    assert_eq!(proposal.stats.unscheduled, 2);
    assert_eq!(proposal.stats.available_slots, 4);
    assert_eq!(proposal.stats.utilization, 100);

    let placed: Vec<&str> = proposal.assignments.iter().map(|a| a.game_id.as_str()).collect();
    let first_four: Vec<&str> = games.iter().take(4).map(|g| g.id.as_str()).collect();
    assert_eq!(placed, first_four);

    let labels: Vec<&str> = proposal.assignments.iter().map(|a| a.time_slot.as_str()).collect();
    assert_eq!(labels, ["8:00 AM", "9:00 AM", "10:00 AM", "11:00 AM"]);
    assert_eq!(proposal.assignments[0].scheduled_at, local(8, 0));
    assert_eq!(proposal.assignments[0].venue_name, "Eastside Rec Center");

    for u in &proposal.unscheduled {
        assert_eq!(u.reason, NO_SLOTS_REASON);
    }
}

#[test]
fn no_cell_is_double_booked_and_no_team_overlaps() {
    let games = pool_games(6);
    let proposal = Scheduler::preview(&request(games.clone(), courts(2), "08:00", "14:00", 60)).unwrap();
    assert_eq!(proposal.stats.total_games, 15);
    assert!(proposal.stats.scheduled > 0);
    assert_eq!(proposal.stats.scheduled + proposal.stats.unscheduled, 15);

    let mut cells = HashSet::new();
    for a in &proposal.assignments {
        assert!(cells.insert((a.court_id.clone(), a.scheduled_at)), "double booked: {:?}", a);
    }

    let by_id: HashMap<&str, &Game> = games.iter().map(|g| (g.id.as_str(), g)).collect();
    let mut starts: HashMap<&str, Vec<chrono::DateTime<Utc>>> = HashMap::new();
    for a in &proposal.assignments {
        let g = by_id[a.game_id.as_str()];
        starts.entry(g.home_team.id.as_str()).or_default().push(a.scheduled_at);
        starts.entry(g.away_team.id.as_str()).or_default().push(a.scheduled_at);
    }
    for (team, times) in &starts {
        for (i, a) in times.iter().enumerate() {
            for b in &times[i + 1..] {
                assert!((*a - *b).abs() >= Duration::minutes(60), "team {} overlaps: {:?}", team, times);
            }
        }
    }
}

#[test]
fn championship_wins_the_only_slot() {
    let games = vec![
        game("pool-1", "a", "b", GameType::Pool),
        game("final", "c", "d", GameType::Championship),
    ];
    let proposal = Scheduler::preview(&request(games, courts(1), "08:00", "09:00", 60)).unwrap();

    assert_eq!(proposal.assignments.len(), 1);
    assert_eq!(proposal.assignments[0].game_id, "final");
    assert_eq!(proposal.assignments[0].game_type, GameType::Championship);
    assert_eq!(proposal.unscheduled.len(), 1);
    assert_eq!(proposal.unscheduled[0].game_id, "pool-1");
    assert_eq!(proposal.unscheduled[0].reason, NO_SLOTS_REASON);
}

#[test]
fn identical_inputs_give_identical_output() {
    let req = request(pool_games(7), courts(3), "08:00", "13:00", 90);
    let first = serde_json::to_string(&Scheduler::preview(&req).unwrap()).unwrap();
    let second = serde_json::to_string(&Scheduler::preview(&req).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn fills_one_court_before_the_next() {
    let games = vec![
        game("g1", "a", "b", GameType::Pool),
        game("g2", "c", "d", GameType::Pool),
        game("g3", "e", "f", GameType::Pool),
    ];
    let proposal = Scheduler::preview(&request(games, courts(2), "08:00", "10:00", 60)).unwrap();
    let cells: Vec<(&str, &str)> = proposal
        .assignments
        .iter()
        .map(|a| (a.court_id.as_str(), a.time_slot.as_str()))
        .collect();
    assert_eq!(cells, [("c1", "8:00 AM"), ("c1", "9:00 AM"), ("c2", "8:00 AM")]);
    assert_eq!(proposal.stats.utilization, 75);
}

#[test]
fn team_conflict_pushes_game_to_a_later_slot() {
    let games = vec![game("g1", "x", "y", GameType::Pool), game("g2", "x", "z", GameType::Pool)];
    let proposal = Scheduler::preview(&request(games, courts(2), "08:00", "10:00", 60)).unwrap();

    assert!(proposal.unscheduled.is_empty(), "unscheduled: {:?}", proposal.unscheduled);
    let second = &proposal.assignments[1];
    assert_eq!(second.game_id, "g2");
    // court-major scan reaches c1 at 9:00 before c2 at 8:00
    assert_eq!((second.court_id.as_str(), second.scheduled_at), ("c1", local(9, 0)));
}

#[test]
fn team_conflict_is_reported_by_name_when_no_slot_works() {
    let games = vec![
        game("g1", "x", "y", GameType::Pool),
        game("g2", "z", "x", GameType::Pool),
        game("g3", "x", "y", GameType::Pool),
    ];
    let proposal = Scheduler::preview(&request(games, courts(3), "08:00", "09:00", 60)).unwrap();

    assert_eq!(proposal.assignments.len(), 1);
    let reasons: HashMap<&str, &str> = proposal
        .unscheduled
        .iter()
        .map(|u| (u.game_id.as_str(), u.reason.as_str()))
        .collect();
    // away team X is the only conflict
    assert!(reasons["g2"].starts_with("X "), "reason was: {}", reasons["g2"]);
    // both teams conflict; home is checked first
    assert!(reasons["g3"].starts_with("X "), "reason was: {}", reasons["g3"]);
    assert!(reasons["g3"].contains("8:00 AM"), "reason was: {}", reasons["g3"]);
}

#[test]
fn long_rest_requirement_spaces_out_a_team() {
    let games = vec![game("g1", "x", "y", GameType::Pool), game("g2", "x", "z", GameType::Pool)];
    let proposal = Scheduler::preview(&request(games, courts(1), "08:00", "12:00", 150)).unwrap();

    let times: Vec<_> = proposal.assignments.iter().map(|a| a.scheduled_at).collect();
    assert_eq!(times, vec![local(8, 0), local(10, 0)]);
}

#[test]
fn no_capacity_reports_every_game_unscheduled() {
    let proposal = Scheduler::preview(&request(pool_games(3), courts(2), "12:00", "12:30", 60)).unwrap();
    assert_eq!(proposal.stats.available_slots, 0);
    assert_eq!(proposal.stats.scheduled, 0);
    assert_eq!(proposal.stats.unscheduled, 3);
    assert_eq!(proposal.stats.utilization, 0);
    assert!(proposal.unscheduled.iter().all(|u| u.reason == NO_SLOTS_REASON));
}

#[test]
fn already_scheduled_games_are_left_alone() {
    let mut games = pool_games(3);
    games[0].court_id = Some("c9".into());
    games[0].scheduled_at = Some(local(7, 0));
    let proposal = Scheduler::preview(&request(games.clone(), courts(1), "08:00", "12:00", 60)).unwrap();
    assert_eq!(proposal.stats.total_games, 2);
    assert!(proposal.assignments.iter().all(|a| a.game_id != games[0].id));
}

#[test]
fn existing_bookings_hold_their_court_and_teams() {
    let mut old = game("old", "a", "b", GameType::Pool);
    old.court_id = Some("c1".into());
    old.scheduled_at = Some(local(8, 0));
    let games = vec![old, game("new", "a", "d", GameType::Pool)];
    let req = request(games.clone(), courts(1), "08:00", "10:00", 60);

    let proposal = Scheduler::preview(&req).unwrap();
    assert_eq!(proposal.stats.total_games, 1);
    assert_eq!(proposal.assignments.len(), 1, "proposal was: {:?}", proposal);
    let placed = &proposal.assignments[0];
    assert_eq!(placed.game_id, "new");
    assert_eq!(placed.court_id, "c1");
    assert_eq!(placed.scheduled_at, local(9, 0));

    let mut store = InMemoryStore::new(games);
    let report = Scheduler::apply(&req, &mut store).unwrap();
    assert_eq!(report.applied, 1);
    assert_eq!(store.get("old").unwrap().scheduled_at, Some(local(8, 0)));
    assert_eq!(store.get("new").unwrap().scheduled_at, Some(local(9, 0)));
}

#[test]
fn existing_booking_blocks_its_team_on_another_court() {
    let mut old = game("old", "a", "b", GameType::Pool);
    old.court_id = Some("c2".into());
    old.scheduled_at = Some(local(8, 0));
    let games = vec![old, game("new", "a", "d", GameType::Pool)];

    let proposal = Scheduler::preview(&request(games, courts(2), "08:00", "10:00", 60)).unwrap();
    let placed = &proposal.assignments[0];
    // c1 is free at 08:00 but team a is not
    assert_eq!((placed.court_id.as_str(), placed.scheduled_at), ("c1", local(9, 0)));
}

#[test]
fn rejects_runs_without_courts_or_games() {
    let err = Scheduler::preview(&request(pool_games(3), Vec::new(), "08:00", "12:00", 60)).unwrap_err();
    assert!(err.is_invalid_input(), "error was: {}", err);

    let err = Scheduler::preview(&request(Vec::new(), courts(1), "08:00", "12:00", 60)).unwrap_err();
    assert!(err.is_invalid_input(), "error was: {}", err);

    let err = Scheduler::preview(&request(pool_games(3), courts(1), "8 o'clock", "12:00", 60)).unwrap_err();
    assert!(err.is_invalid_input(), "error was: {}", err);

    let mut dup_courts = courts(1);
    dup_courts.extend(courts(1));
    let err = Scheduler::preview(&request(pool_games(3), dup_courts, "08:00", "12:00", 60)).unwrap_err();
    assert!(err.to_string().contains("c1"), "error was: {}", err);
}

#[test]
fn apply_commits_every_assignment_to_the_store() {
    let games = pool_games(4);
    let req = request(games.clone(), courts(1), "08:00", "12:00", 60);
    let mut store = InMemoryStore::new(games.clone());

    let report = Scheduler::apply(&req, &mut store).unwrap();
    assert!(report.committed);
    assert_eq!(report.applied, 4);
    assert_eq!(report.unscheduled.len(), 2);

    let scheduled: Vec<&Game> = store.games().into_iter().filter(|g| g.is_scheduled()).collect();
    assert_eq!(scheduled.len(), 4);
    let first = store.get(&games[0].id).unwrap();
    assert_eq!(first.court_id.as_deref(), Some("c1"));
    assert_eq!(first.scheduled_at, Some(local(8, 0)));
}
