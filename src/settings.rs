use std::env;

use chrono::{Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Environment variable consulted when a request does not name a timezone.
pub const TIMEZONE_ENV: &str = "TOURNAMENT_TIMEZONE";
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

fn default_start_time() -> String {
    "08:00".to_string()
}

fn default_end_time() -> String {
    "20:00".to_string()
}

fn default_minutes() -> u32 {
    60
}

/// Day window and game timing as supplied by the caller (`HH:MM` strings, minutes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerSettings {
    #[serde(default = "default_start_time")]
    pub start_time: String,
    #[serde(default = "default_end_time")]
    pub end_time: String,
    #[serde(default = "default_minutes")]
    pub game_duration: u32,
    #[serde(default = "default_minutes")]
    pub min_rest_minutes: u32,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            start_time: default_start_time(),
            end_time: default_end_time(),
            game_duration: default_minutes(),
            min_rest_minutes: default_minutes(),
        }
    }
}

/// Parsed settings used by the slot generator and rest tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub game_duration: Duration,
    pub min_rest: Duration,
}

impl SchedulerSettings {
    pub fn new(start_time: &str, end_time: &str, game_duration: u32, min_rest_minutes: u32) -> Self {
        Self {
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            game_duration,
            min_rest_minutes,
        }
    }

    pub fn window(&self) -> Result<DayWindow> {
        if self.game_duration == 0 {
            return Err(SchedulerError::invalid("gameDuration must be greater than zero"));
        }
        Ok(DayWindow {
            start: parse_time(&self.start_time)?,
            end: parse_time(&self.end_time)?,
            game_duration: Duration::minutes(i64::from(self.game_duration)),
            min_rest: Duration::minutes(i64::from(self.min_rest_minutes)),
        })
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| SchedulerError::invalid(format!("date '{}' is not YYYY-MM-DD: {}", s, e)))
}

/// Parse an `HH:MM` 24-hour time of day.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|e| SchedulerError::invalid(format!("time '{}' is not HH:MM: {}", s, e)))
}

/// Resolve the tournament timezone: explicit name, then `TOURNAMENT_TIMEZONE`, then Pacific.
pub fn resolve_timezone(requested: Option<&str>) -> Result<Tz> {
    let name = match requested {
        Some(name) => name.to_string(),
        None => env::var(TIMEZONE_ENV).unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string()),
    };
    name.trim()
        .parse::<Tz>()
        .map_err(|e| SchedulerError::invalid(format!("unknown timezone '{}': {}", name, e)))
}
