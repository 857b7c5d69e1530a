//! Calendar feed entries for proposed and confirmed event days.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{Event, UserNames};
use crate::links::event_url;

const TENTATIVE_PREFIX: &str = "? ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryStatus {
    Confirmed,
    Tentative,
}

/// One all-day calendar entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    /// `<event id>-<date>@<domain>`
    pub uid: String,
    pub title: String,
    pub start: NaiveDate,
    /// Exclusive end, the day after `start`
    pub end: NaiveDate,
    pub status: EntryStatus,
    pub organizer: String,
    pub url: String,
}

/// Entries for every proposed day of every event.
///
/// Once an event has a selected day only that day is listed, as confirmed;
/// otherwise every proposed day is tentative and its title starts with `? `.
/// Days whose key is not an ISO date are skipped.
pub fn calendar_entries(events: &[Event], users: &UserNames, domain: &str) -> Vec<CalendarEntry> {
    events
        .iter()
        .flat_map(|event| {
            event
                .days
                .keys()
                .filter(|date| event.selected_day.as_ref().map_or(true, |d| d == *date))
                .filter_map(|date| entry_for_day(event, date, users, domain))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn entry_for_day(event: &Event, date: &str, users: &UserNames, domain: &str) -> Option<CalendarEntry> {
    let start = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d,
        Err(e) => {
            tracing::debug!("Skipping day '{}' of event {}: {}", date, event.id, e);
            return None;
        }
    };
    let end = start.checked_add_days(Days::new(1))?;

    let (status, title) = if event.is_confirmed() {
        (EntryStatus::Confirmed, event.name.clone())
    } else {
        (EntryStatus::Tentative, format!("{}{}", TENTATIVE_PREFIX, event.name))
    };

    Some(CalendarEntry {
        uid: format!("{}-{}@{}", event.id, date, domain),
        title,
        start,
        end,
        status,
        organizer: users.get(&event.creator).cloned().unwrap_or_default(),
        url: event_url(domain, &event.id, &event.name),
    })
}

/// Whether a feed built at `last_update` (ms) is older than a change at `changed_at`
pub fn needs_refresh(last_update: Option<i64>, changed_at: i64) -> bool {
    last_update.map_or(true, |last| last < changed_at)
}
