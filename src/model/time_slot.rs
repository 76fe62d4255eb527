use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)` produced per scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Local wall-clock label, e.g. "8:00 AM".
    pub label: String,
}
