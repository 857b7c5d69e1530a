//! Push notification planning for event changes.
//!
//! Each planner decides who should hear about a change and what the message
//! says. Delivery is handled elsewhere; a planner returning `None` means
//! nobody is to be notified.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::{Event, UserNames};
use crate::links::event_link;

const TEST_EVENT_PREFIX: &str = "TEST:";
const UNKNOWN_USER: &str = "Someone";

/// Registered push tokens of one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagingEntry {
    /// token id → registration timestamp
    #[serde(default)]
    pub tokens: BTreeMap<String, i64>,
}

/// uid → push registration
pub type Messaging = BTreeMap<String, MessagingEntry>;

/// A message ready for multicast delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub tokens: Vec<String>,
    pub title: String,
    pub body: String,
    pub link: String,
}

/// Tokens of users in `include` (everyone when `None`) who are not in `exclude`
pub fn message_tokens(messaging: &Messaging, include: Option<&[&str]>, exclude: &[&str]) -> Vec<String> {
    messaging
        .iter()
        .filter(|(uid, _)| include.map_or(true, |ids| ids.contains(&uid.as_str())))
        .filter(|(uid, _)| !exclude.contains(&uid.as_str()))
        .flat_map(|(_, entry)| entry.tokens.keys().cloned())
        .collect()
}

fn user_name<'a>(users: &'a UserNames, uid: &str) -> &'a str {
    users.get(uid).map(String::as_str).unwrap_or(UNKNOWN_USER)
}

fn message(tokens: Vec<String>, title: &str, body: String, event: &Event) -> Option<PushMessage> {
    if tokens.is_empty() {
        return None;
    }
    Some(PushMessage {
        tokens,
        title: title.to_string(),
        body,
        link: event_link(&event.id, &event.name),
    })
}

/// First vote of a participant: tell the creator
pub fn plan_vote(event: &Event, voter: &str, users: &UserNames, messaging: &Messaging) -> Option<PushMessage> {
    if voter == event.creator {
        return None;
    }
    let tokens = message_tokens(messaging, Some(&[event.creator.as_str()][..]), &[]);
    let body = format!("{} voted on {}", user_name(users, voter), event.name);
    message(tokens, "Meeple Event Vote", body, event)
}

/// New event: tell everybody but the creator
pub fn plan_create(event: &Event, users: &UserNames, messaging: &Messaging) -> Option<PushMessage> {
    if event.name.starts_with(TEST_EVENT_PREFIX) {
        tracing::debug!("Not announcing test event {}", event.id);
        return None;
    }
    let tokens = message_tokens(messaging, None, &[event.creator.as_str()]);
    let body = format!("{} created event: {}", user_name(users, &event.creator), event.name);
    message(tokens, "Meeple Event Created", body, event)
}

/// Deleted event: tell everyone who had voted, except the creator
pub fn plan_delete(event: &Event, users: &UserNames, messaging: &Messaging) -> Option<PushMessage> {
    let voters: Vec<&str> = event.last_voted.keys().map(String::as_str).collect();
    let tokens = message_tokens(messaging, Some(voters.as_slice()), &[event.creator.as_str()]);
    let body = format!("{} deleted event: {}", user_name(users, &event.creator), event.name);
    message(tokens, "Meeple Event Deleted", body, event)
}

/// Final date chosen or changed: tell the voters of the chosen slot.
///
/// Needs both a selected day and a selected time on `event`.
/// `had_selection` marks a change of an earlier choice.
pub fn plan_select(event: &Event, had_selection: bool, messaging: &Messaging) -> Option<PushMessage> {
    let (Some(day), Some(_)) = (event.selected_day.as_deref(), event.selected_time.as_deref()) else {
        return None;
    };

    let voters: Vec<&str> = event
        .selected_slot()
        .map(|s| s.votes.keys().map(String::as_str).collect())
        .unwrap_or_default();
    let tokens = message_tokens(messaging, Some(voters.as_slice()), &[event.creator.as_str()]);

    let title = if had_selection {
        "Meeple Event Date changed"
    } else {
        "Meeple Event Date Selected"
    };
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(|d| d.format("%b %-d").to_string())
        .unwrap_or_else(|_| day.to_string());
    let body = format!("Event {} will be on {}", event.name, date);

    message(tokens, title, body, event)
}
