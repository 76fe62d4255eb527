use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

/// Start times already committed to each team during one scheduling run.
///
/// Built fresh for every run and owned by it; nothing is shared between runs.
#[derive(Debug, Clone)]
pub struct RestConstraintTracker {
    game_duration: Duration,
    min_rest: Duration,
    starts: HashMap<String, Vec<DateTime<Utc>>>,
}

impl RestConstraintTracker {
    pub fn new(game_duration: Duration, min_rest: Duration) -> Self {
        Self { game_duration, min_rest, starts: HashMap::new() }
    }

    /// Whether `team_id` may start a game at `proposed_start`.
    ///
    /// Checked against every committed game of the team. A slot is refused when it
    /// overlaps a committed game, or when neither the gap after that game
    /// (`|proposed_start - existing_end|`) nor the gap before it
    /// (`|existing_start - proposed_end|`) reaches the minimum rest.
    pub fn can_play_at(&self, team_id: &str, proposed_start: DateTime<Utc>) -> bool {
        let Some(starts) = self.starts.get(team_id) else {
            return true;
        };
        let proposed_end = proposed_start + self.game_duration;

        starts.iter().all(|&existing_start| {
            let existing_end = existing_start + self.game_duration;
            if proposed_start < existing_end && proposed_end > existing_start {
                return false;
            }
            let gap_after = (proposed_start - existing_end).abs();
            let gap_before = (existing_start - proposed_end).abs();
            gap_after >= self.min_rest || gap_before >= self.min_rest
        })
    }

    pub fn commit(&mut self, team_id: &str, start: DateTime<Utc>) {
        self.starts.entry(team_id.to_string()).or_default().push(start);
    }

    /// Committed starts for a team, in commit order.
    pub fn starts_for(&self, team_id: &str) -> &[DateTime<Utc>] {
        self.starts.get(team_id).map(Vec::as_slice).unwrap_or(&[])
    }
}
