use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{Result, SchedulerError};
use crate::model::{Court, Game, GameType, Team, TimeSlot};
use crate::priority::prioritize;
use crate::rest::RestConstraintTracker;
use crate::settings::{DayWindow, SchedulerSettings};
use crate::store::ScheduleStore;
use crate::time_slots::TimeSlotGenerator;

pub const NO_SLOTS_REASON: &str = "No available time slots";

/// Everything one scheduling run needs, supplied by the caller.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub games: Vec<Game>,
    pub courts: Vec<Court>,
    pub date: NaiveDate,
    pub timezone: Tz,
    pub settings: SchedulerSettings,
}

impl ScheduleRequest {
    pub fn new(games: Vec<Game>, courts: Vec<Court>, date: NaiveDate, timezone: Tz, settings: SchedulerSettings) -> Self {
        Self { games, courts, date, timezone, settings }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub game_id: String,
    pub court_id: String,
    pub court_name: String,
    pub venue_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub time_slot: String,
    pub game_type: GameType,
    pub division: Option<String>,
    pub home_team: String,
    pub away_team: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnscheduledGame {
    pub game_id: String,
    pub home_team: String,
    pub away_team: String,
    pub game_type: GameType,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub total_games: usize,
    pub scheduled: usize,
    pub unscheduled: usize,
    /// courts x time slots
    pub available_slots: usize,
    /// Whole-number percentage of available slots filled, rounded.
    pub utilization: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleProposal {
    pub date: NaiveDate,
    pub timezone: String,
    pub assignments: Vec<Assignment>,
    pub unscheduled: Vec<UnscheduledGame>,
    pub stats: ScheduleStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyReport {
    pub stats: ScheduleStats,
    pub applied: usize,
    pub committed: bool,
    pub unscheduled: Vec<UnscheduledGame>,
}

/// One (court, time slot) cell. Cells are laid out court-major and only ever go from
/// free to occupied.
#[derive(Debug, Clone, Copy)]
struct ResourceSlot {
    court: usize,
    slot: usize,
    occupied: bool,
}

/// Greedy first-fit placement of games onto court/time cells.
///
/// Games are taken in priority order and each is put in the first free cell where both
/// teams pass the rest check. Nothing placed is ever moved, so a run can leave cells
/// empty that a different order would have filled.
pub struct AssignmentEngine<'a> {
    courts: &'a [Court],
    slots: &'a [TimeSlot],
    cells: Vec<ResourceSlot>,
    tracker: RestConstraintTracker,
    window: DayWindow,
}

impl<'a> AssignmentEngine<'a> {
    pub fn new(courts: &'a [Court], slots: &'a [TimeSlot], window: DayWindow) -> Self {
        let cells = (0..courts.len())
            .flat_map(|court| (0..slots.len()).map(move |slot| ResourceSlot { court, slot, occupied: false }))
            .collect();
        Self {
            courts,
            slots,
            cells,
            tracker: RestConstraintTracker::new(window.game_duration, window.min_rest),
            window,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Account for a game that already has a court and start time: its teams are
    /// committed to the rest ledger and every cell it overlaps on its court is taken.
    pub fn reserve(&mut self, game: &Game) {
        let Some(start) = game.scheduled_at else {
            return;
        };
        self.tracker.commit(&game.home_team.id, start);
        self.tracker.commit(&game.away_team.id, start);

        let end = start + self.window.game_duration;
        let Some(court) = game.court_id.as_deref().and_then(|id| self.courts.iter().position(|c| c.id == id)) else {
            return;
        };
        for cell in self.cells.iter_mut().filter(|c| c.court == court) {
            let slot = &self.slots[cell.slot];
            if slot.start < end && slot.end > start {
                cell.occupied = true;
            }
        }
        debug!(game_id = %game.id, court_id = ?game.court_id, "Reserved existing booking");
    }

    /// Place every game it can; returns the placements and the games left over with a reason.
    pub fn run(mut self, games: &[Game]) -> (Vec<Assignment>, Vec<UnscheduledGame>) {
        let mut assignments = Vec::new();
        let mut unscheduled = Vec::new();

        for game in prioritize(games) {
            match self.place(game) {
                Ok(assignment) => {
                    debug!(
                        game_id = %assignment.game_id,
                        court_id = %assignment.court_id,
                        time = %assignment.time_slot,
                        "Placed game"
                    );
                    assignments.push(assignment);
                }
                Err(reason) => {
                    warn!(game_id = %game.id, reason = %reason, "Could not place game");
                    unscheduled.push(UnscheduledGame {
                        game_id: game.id.clone(),
                        home_team: game.home_team.name.clone(),
                        away_team: game.away_team.name.clone(),
                        game_type: game.game_type,
                        reason,
                    });
                }
            }
        }

        (assignments, unscheduled)
    }

    /// Scan cells in order for the first free one both teams can play in. On failure the
    /// reason is the last rejection seen, home team checked before away.
    fn place(&mut self, game: &Game) -> std::result::Result<Assignment, String> {
        let mut last_rejection: Option<String> = None;

        for cell in self.cells.iter_mut() {
            if cell.occupied {
                continue;
            }
            let slot = &self.slots[cell.slot];
            if !self.tracker.can_play_at(&game.home_team.id, slot.start) {
                last_rejection = Some(conflict_reason(&game.home_team, slot));
                continue;
            }
            if !self.tracker.can_play_at(&game.away_team.id, slot.start) {
                last_rejection = Some(conflict_reason(&game.away_team, slot));
                continue;
            }

            cell.occupied = true;
            self.tracker.commit(&game.home_team.id, slot.start);
            self.tracker.commit(&game.away_team.id, slot.start);

            let court = &self.courts[cell.court];
            return Ok(Assignment {
                game_id: game.id.clone(),
                court_id: court.id.clone(),
                court_name: court.name.clone(),
                venue_name: court.venue.name.clone(),
                scheduled_at: slot.start,
                ends_at: slot.start + self.window.game_duration,
                time_slot: slot.label.clone(),
                game_type: game.game_type,
                division: game.division.clone(),
                home_team: game.home_team.name.clone(),
                away_team: game.away_team.name.clone(),
            });
        }

        Err(last_rejection.unwrap_or_else(|| NO_SLOTS_REASON.to_string()))
    }
}

fn conflict_reason(team: &Team, slot: &TimeSlot) -> String {
    format!("{} has an overlapping game or too little rest for {}", team.name, slot.label)
}

fn utilization(scheduled: usize, capacity: usize) -> u32 {
    if capacity == 0 {
        return 0;
    }
    ((scheduled * 100 + capacity / 2) / capacity) as u32
}

/// Entry points for preview and apply runs.
pub struct Scheduler;

impl Scheduler {
    /// Compute a proposed schedule without touching any store.
    #[instrument(skip(request), fields(games = request.games.len(), courts = request.courts.len(), date = %request.date))]
    pub fn preview(request: &ScheduleRequest) -> Result<ScheduleProposal> {
        let window = request.settings.window()?;
        let (games, booked) = validate(request)?;

        let slots = TimeSlotGenerator::new(window, request.timezone).slots_for(request.date);
        let mut engine = AssignmentEngine::new(&request.courts, &slots, window);
        for game in booked {
            engine.reserve(game);
        }
        let capacity = engine.capacity();
        let (assignments, unscheduled) = engine.run(&games);

        let stats = ScheduleStats {
            total_games: games.len(),
            scheduled: assignments.len(),
            unscheduled: unscheduled.len(),
            available_slots: capacity,
            utilization: utilization(assignments.len(), capacity),
        };
        info!(
            scheduled = stats.scheduled,
            unscheduled = stats.unscheduled,
            utilization = stats.utilization,
            "Computed schedule"
        );

        Ok(ScheduleProposal {
            date: request.date,
            timezone: request.timezone.name().to_string(),
            assignments,
            unscheduled,
            stats,
        })
    }

    /// Compute a schedule and hand every assignment to `store` as one batch. Either the
    /// whole batch lands or none of it does.
    #[instrument(skip(request, store), fields(games = request.games.len(), date = %request.date))]
    pub fn apply<S: ScheduleStore>(request: &ScheduleRequest, store: &mut S) -> Result<ApplyReport> {
        let proposal = Self::preview(request)?;
        let applied = store.apply_batch(&proposal.assignments).map_err(|e| {
            error!(error = %e, "Schedule batch was not applied");
            e
        })?;
        info!(applied, "Applied schedule");
        Ok(ApplyReport {
            stats: proposal.stats,
            applied,
            committed: true,
            unscheduled: proposal.unscheduled,
        })
    }
}

/// Check run preconditions and split the games into those waiting for a slot and
/// those already booked.
fn validate(request: &ScheduleRequest) -> Result<(Vec<Game>, Vec<&Game>)> {
    if request.courts.is_empty() {
        return Err(SchedulerError::invalid("at least one court is required"));
    }
    let mut court_ids = HashSet::with_capacity(request.courts.len());
    for court in &request.courts {
        if !court_ids.insert(court.id.as_str()) {
            return Err(SchedulerError::invalid(format!("court {} is listed more than once", court.id)));
        }
    }

    let mut game_ids = HashSet::with_capacity(request.games.len());
    let mut games = Vec::with_capacity(request.games.len());
    let mut booked = Vec::new();
    for game in &request.games {
        if !game_ids.insert(game.id.as_str()) {
            return Err(SchedulerError::invalid(format!("game {} is listed more than once", game.id)));
        }
        if game.is_scheduled() {
            booked.push(game);
            continue;
        }
        games.push(game.clone());
    }
    if games.is_empty() {
        return Err(SchedulerError::invalid("no unscheduled games to schedule"));
    }
    Ok((games, booked))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utilization_rounds_and_handles_no_capacity() {
        assert_eq!(utilization(0, 0), 0);
        assert_eq!(utilization(4, 4), 100);
        assert_eq!(utilization(1, 3), 33);
        assert_eq!(utilization(2, 3), 67);
    }
}
