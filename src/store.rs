use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::engine::Assignment;
use crate::error::{Result, SchedulerError};
use crate::model::Game;

/// Where applied schedules are written. Implementations must apply a batch
/// all-or-nothing: on error, no game in the batch may have changed.
pub trait ScheduleStore {
    /// Persist every assignment and return how many games were updated.
    fn apply_batch(&mut self, assignments: &[Assignment]) -> Result<usize>;
}

/// Games held in memory, keyed by id. Exclusive access through `&mut self` serialises
/// writers; share one across tasks behind a `tokio::sync::Mutex`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    games: HashMap<String, Game>,
}

impl InMemoryStore {
    pub fn new(games: impl IntoIterator<Item = Game>) -> Self {
        Self { games: games.into_iter().map(|g| (g.id.clone(), g)).collect() }
    }

    pub fn get(&self, game_id: &str) -> Option<&Game> {
        self.games.get(game_id)
    }

    /// All games, sorted by id.
    pub fn games(&self) -> Vec<&Game> {
        let mut games: Vec<&Game> = self.games.values().collect();
        games.sort_by(|a, b| a.id.cmp(&b.id));
        games
    }

    fn booked_cells(&self) -> HashSet<(&str, DateTime<Utc>)> {
        self.games
            .values()
            .filter_map(|g| match (&g.court_id, g.scheduled_at) {
                (Some(court), Some(at)) => Some((court.as_str(), at)),
                _ => None,
            })
            .collect()
    }

    fn check_batch(&self, assignments: &[Assignment]) -> Result<()> {
        let mut booked = self.booked_cells();
        let mut in_batch = HashSet::with_capacity(assignments.len());

        for a in assignments {
            let game = self
                .games
                .get(&a.game_id)
                .ok_or_else(|| SchedulerError::PersistenceFailure(format!("game {} does not exist", a.game_id)))?;
            if game.is_scheduled() {
                return Err(SchedulerError::PersistenceFailure(format!("game {} is already scheduled", a.game_id)));
            }
            if !in_batch.insert(a.game_id.as_str()) {
                return Err(SchedulerError::PersistenceFailure(format!("game {} appears twice in batch", a.game_id)));
            }
            if !booked.insert((a.court_id.as_str(), a.scheduled_at)) {
                return Err(SchedulerError::PersistenceFailure(format!(
                    "court {} is already booked at {}",
                    a.court_id, a.scheduled_at
                )));
            }
        }
        Ok(())
    }
}

impl ScheduleStore for InMemoryStore {
    #[instrument(skip(self, assignments), fields(batch = assignments.len()))]
    fn apply_batch(&mut self, assignments: &[Assignment]) -> Result<usize> {
        if let Err(e) = self.check_batch(assignments) {
            warn!(error = %e, "Rejected schedule batch; nothing applied");
            return Err(e);
        }

        for a in assignments {
            if let Some(game) = self.games.get_mut(&a.game_id) {
                game.court_id = Some(a.court_id.clone());
                game.scheduled_at = Some(a.scheduled_at);
            }
        }
        info!(applied = assignments.len(), "Applied schedule batch");
        Ok(assignments.len())
    }
}
