use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::bracket::{GeneratedBracket, generate_single_elimination};
use crate::engine::{ApplyReport, ScheduleProposal, ScheduleRequest, Scheduler};
use crate::error::Result;
use crate::ical::schedule_calendar;
use crate::model::{BracketSettings, Court, Game, Team};
use crate::round_robin::generate_round_robin;
use crate::settings::{SchedulerSettings, parse_date, resolve_timezone};
use crate::store::InMemoryStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Preview,
    Apply,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateInput {
    pub event_id: String,
    pub name: String,
    pub teams: Vec<Team>,
    #[serde(default)]
    pub settings: BracketSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    #[serde(default)]
    pub mode: Mode,
    /// YYYY-MM-DD
    pub date: String,
    /// IANA zone name; falls back to TOURNAMENT_TIMEZONE
    pub timezone: Option<String>,
    #[serde(default)]
    pub settings: SchedulerSettings,
    pub games: Vec<Game>,
    pub courts: Vec<Court>,
    #[serde(default)]
    pub export_ical: bool,
    pub calendar_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request {
    GeneratePool(GenerateInput),
    GenerateBracket(GenerateInput),
    Schedule(ScheduleInput),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<GeneratedBracket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<ScheduleProposal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<ApplyReport>,
    /// Game records after apply, for the caller to persist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub games: Option<Vec<Game>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ical: Option<String>,
}

/// Run one request to completion. Invalid input fails the whole request; games that
/// cannot be placed are reported inside the response.
pub fn dispatch(request: Request) -> Result<Response> {
    match request {
        Request::GeneratePool(input) => {
            let generated = generate_round_robin(&input.event_id, &input.name, &input.teams, input.settings)?;
            Ok(Response {
                message: format!("Generated pool '{}' with {} games", generated.bracket.name, generated.games.len()),
                generated: Some(generated),
                ..Default::default()
            })
        }
        Request::GenerateBracket(input) => {
            let generated = generate_single_elimination(&input.event_id, &input.name, &input.teams, input.settings)?;
            let byes = generated.slots.iter().filter(|s| s.is_bye()).count();
            Ok(Response {
                message: format!(
                    "Generated bracket '{}' with {} first-round games and {} byes",
                    generated.bracket.name,
                    generated.games.len(),
                    byes
                ),
                generated: Some(generated),
                ..Default::default()
            })
        }
        Request::Schedule(input) => schedule(input),
    }
}

fn schedule(input: ScheduleInput) -> Result<Response> {
    let date = parse_date(&input.date)?;
    let timezone = resolve_timezone(input.timezone.as_deref())?;
    let calendar_name = input.calendar_name.unwrap_or_else(|| format!("Schedule {}", date));
    let export_ical = input.export_ical;
    let request = ScheduleRequest::new(input.games, input.courts, date, timezone, input.settings);

    match input.mode {
        Mode::Preview => {
            let proposal = Scheduler::preview(&request)?;
            let message = format!(
                "Preview: {} of {} games placed ({}% utilization)",
                proposal.stats.scheduled, proposal.stats.total_games, proposal.stats.utilization
            );
            let ical = export_ical.then(|| schedule_calendar(&proposal, &calendar_name).to_string());
            Ok(Response { message, proposal: Some(proposal), ical, ..Default::default() })
        }
        Mode::Apply => {
            let mut store = InMemoryStore::new(request.games.iter().cloned());
            let report = Scheduler::apply(&request, &mut store)?;
            let message = format!(
                "Applied: {} of {} games placed ({}% utilization)",
                report.applied, report.stats.total_games, report.stats.utilization
            );
            let games = store.games().into_iter().cloned().collect();
            Ok(Response { message, applied: Some(report), games: Some(games), ..Default::default() })
        }
    }
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> std::result::Result<Response, Error> {
    let request = event.payload;

    // The computation is synchronous; keep it off the runtime's async workers.
    match tokio::task::spawn_blocking(move || dispatch(request)).await {
        Ok(Ok(response)) => {
            info!(message = %response.message, "Request complete");
            Ok(response)
        }
        Ok(Err(e)) => {
            error!(error = %e, invalid_input = e.is_invalid_input(), "Request rejected");
            Err(e.into())
        }
        Err(e) => {
            error!(error = %e, "Scheduling task join error");
            Err(e.into())
        }
    }
}
