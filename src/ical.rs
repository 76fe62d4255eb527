use icalendar::{Calendar, Component, Event, EventLike};

use crate::engine::{Assignment, ScheduleProposal};

/// Render a proposed schedule as an iCalendar feed, one VEVENT per placed game.
pub fn schedule_calendar(proposal: &ScheduleProposal, name: &str) -> Calendar {
    let mut calendar = Calendar::new();
    calendar.name(name).timezone(proposal.timezone.as_str());
    for assignment in &proposal.assignments {
        calendar.push(game_event(assignment));
    }
    calendar.done()
}

fn game_event(a: &Assignment) -> Event {
    let mut description = format!("{} game", a.game_type.label());
    if let Some(division) = &a.division {
        description.push_str(" - ");
        description.push_str(division);
    }

    Event::new()
        .uid(&format!("game-{}", a.game_id))
        .summary(&format!("{} @ {}", a.away_team, a.home_team))
        .description(&description)
        .location(&format!("{} ({})", a.court_name, a.venue_name))
        .starts(a.scheduled_at)
        .ends(a.ends_at)
        .done()
}
