use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One participant's vote on a time slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventVote {
    #[serde(default)]
    pub is_favorite: bool,

    /// Voter offers to host
    #[serde(default)]
    pub is_home: bool,
}

/// A proposed time on a proposed day
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(default)]
    pub created: i64,

    /// uid → vote
    #[serde(default)]
    pub votes: BTreeMap<String, EventVote>,
}

/// time (`HH:MM`) → slot
pub type EventDay = BTreeMap<String, TimeSlot>;

/// uid → display name
pub type UserNames = BTreeMap<String, String>;

/// A group event with proposed days and time slots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// uid of the creator
    #[serde(default)]
    pub creator: String,

    /// Creation timestamp (ms)
    #[serde(default)]
    pub created: i64,

    /// ISO date of the final day, once chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_day: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_time: Option<String>,

    /// ISO date → day
    #[serde(default)]
    pub days: BTreeMap<String, EventDay>,

    /// uid → timestamp of the user's most recent vote
    #[serde(default)]
    pub last_voted: BTreeMap<String, i64>,
}

impl Event {
    pub fn new(id: impl Into<String>, name: impl Into<String>, creator: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            creator: creator.into(),
            ..Default::default()
        }
    }

    /// Add a proposed time slot, creating the day if needed
    pub fn propose(&mut self, date: impl Into<String>, time: impl Into<String>, created: i64) -> &mut TimeSlot {
        self.days
            .entry(date.into())
            .or_default()
            .entry(time.into())
            .or_insert_with(|| TimeSlot {
                created,
                votes: BTreeMap::new(),
            })
    }

    /// The slot matching the selected day and time, if both are set
    pub fn selected_slot(&self) -> Option<&TimeSlot> {
        let day = self.selected_day.as_ref()?;
        let time = self.selected_time.as_ref()?;
        self.days.get(day)?.get(time)
    }

    pub fn is_confirmed(&self) -> bool {
        self.selected_day.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_defaults_missing_maps() {
        let json = r#"{"id":"e1","name":"Game Night","creator":"u1","created":5,
            "days":{"2026-10-20":{"19:00":{"created":1}}}}"#;
        let event: Event = serde_json::from_str(json).unwrap();

        assert!(event.last_voted.is_empty());
        assert!(event.days["2026-10-20"]["19:00"].votes.is_empty());
        assert!(event.selected_day.is_none());
    }

    #[test]
    fn test_selected_slot() {
        let mut event = Event::new("e1", "Game Night", "u1");
        event
            .propose("2026-10-20", "19:00", 1)
            .votes
            .insert("u2".to_string(), EventVote { is_favorite: true, is_home: false });

        assert!(event.selected_slot().is_none());

        event.selected_day = Some("2026-10-20".to_string());
        event.selected_time = Some("19:00".to_string());
        let slot = event.selected_slot().unwrap();
        assert!(slot.votes["u2"].is_favorite);
    }
}
