//! Event list ordering and day display helpers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::core::{Event, EventDay};
use crate::links::hash_fragment;

const ISO_DAY: &str = "%Y-%m-%d";

/// A proposed day prepared for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// ISO date
    pub date: String,
    pub times: EventDay,
    /// Short month, e.g. `Oct`
    pub month: String,
    /// Upper-case short weekday, e.g. `MON`
    pub weekday: String,
    pub day_of_month: String,
}

/// Selected day, or the earliest proposed day
pub fn first_day(event: &Event) -> Option<&str> {
    event
        .selected_day
        .as_deref()
        .or_else(|| event.days.keys().next().map(String::as_str))
}

/// Selected day, or the latest proposed day, or "" without days
pub fn last_day(event: &Event) -> &str {
    event
        .selected_day
        .as_deref()
        .or_else(|| event.days.keys().next_back().map(String::as_str))
        .unwrap_or("")
}

/// An event is over once its last day lies before `today`
pub fn is_event_over(event: &Event, today: NaiveDate) -> bool {
    let today_iso = today.format(ISO_DAY).to_string();
    last_day(event) < today_iso.as_str()
}

/// Upcoming events first, each group by first day, then newest created
pub fn compare_events(a: &Event, b: &Event, today: NaiveDate) -> Ordering {
    is_event_over(a, today)
        .cmp(&is_event_over(b, today))
        .then_with(|| first_day(a).unwrap_or("").cmp(first_day(b).unwrap_or("")))
        .then_with(|| b.created.cmp(&a.created))
}

pub fn sort_event_list(events: &mut [Event], today: NaiveDate) {
    events.sort_by(|a, b| compare_events(a, b, today));
}

/// Days in date order with display labels.
///
/// Labels stay empty for keys that are not ISO dates.
pub fn day_list(days: &BTreeMap<String, EventDay>) -> Vec<DayEntry> {
    days.iter()
        .map(|(date, times)| {
            let parsed = NaiveDate::parse_from_str(date, ISO_DAY).ok();
            let label = |fmt: &str| parsed.map(|d| d.format(fmt).to_string()).unwrap_or_default();
            DayEntry {
                date: date.clone(),
                times: times.clone(),
                month: label("%b"),
                weekday: label("%a").to_uppercase(),
                day_of_month: label("%-d"),
            }
        })
        .collect()
}

/// Page fragment linking to an event
pub fn event_hash(event: &Event) -> String {
    hash_fragment(&event.id, &event.name)
}
