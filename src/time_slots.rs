use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::model::TimeSlot;
use crate::settings::DayWindow;

/// Produces the fixed-length slots of one tournament day in the tournament's own timezone.
#[derive(Debug, Clone, Copy)]
pub struct TimeSlotGenerator {
    window: DayWindow,
    tz: Tz,
}

impl TimeSlotGenerator {
    pub fn new(window: DayWindow, tz: Tz) -> Self {
        Self { window, tz }
    }

    /// Slots covering `[start_time, end_time)` on `date`, in order. A trailing slot that
    /// would run past the end of the day is dropped.
    ///
    /// Wall-clock times are read as local to the configured timezone, so a 08:00 slot is
    /// 08:00 at the venue whatever the host clock says. On a spring-forward date, a slot
    /// whose local start does not exist is skipped; on fall-back, the earlier of the two
    /// instants is used.
    pub fn slots_for(&self, date: NaiveDate) -> Vec<TimeSlot> {
        let duration = self.window.game_duration;
        let day_end = date.and_time(self.window.end);
        let mut local_start = date.and_time(self.window.start);
        let mut slots = Vec::new();

        while local_start + duration <= day_end {
            match self.tz.from_local_datetime(&local_start).earliest() {
                Some(start_local) => {
                    let start = start_local.with_timezone(&Utc);
                    slots.push(TimeSlot {
                        start,
                        end: start + duration,
                        label: start_local.format("%-I:%M %p").to_string(),
                    });
                }
                None => {
                    warn!(local = %local_start, tz = self.tz.name(), "Local slot start does not exist (DST gap); skipping");
                }
            }
            local_start += duration;
        }

        debug!(date = %date, count = slots.len(), "Generated time slots");
        slots
    }
}
