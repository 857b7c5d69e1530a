//! Recommended player counts.
//!
//! Turns the catalog's per-count poll into a compact range string such as
//! `3-5,7,9+`, and answers whether a given count falls inside such a range.

use regex::Regex;
use std::sync::OnceLock;

use crate::catalog::leading_int;
use crate::core::PlayerCountPoll;

/// Default multiple by which positive votes must beat negative ones
pub const GOOD_PLAYER_COUNT_FACTOR: u32 = 3;

/// Compresses recommended player counts into range notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRangeSummarizer {
    factor: u32,
}

impl PlayerRangeSummarizer {
    pub fn new(factor: u32) -> Self {
        Self { factor }
    }

    pub fn factor(&self) -> u32 {
        self.factor
    }

    /// Labels of all recommended counts, sorted as plain strings.
    ///
    /// String order puts `"10"` before `"2"`; ranges for ten or more players
    /// come out in that order.
    pub fn recommended_labels(&self, polls: &[PlayerCountPoll]) -> Vec<String> {
        let mut labels: Vec<String> = polls
            .iter()
            .filter(|p| p.is_recommended(self.factor))
            .map(|p| p.label.clone())
            .collect();
        labels.sort();
        labels
    }

    /// Summarize the polls as `N`, `N-M` and `N+` tokens joined by commas.
    ///
    /// Empty when no count is recommended.
    pub fn summarize(&self, polls: &[PlayerCountPoll]) -> String {
        compress_labels(&self.recommended_labels(polls))
    }
}

impl Default for PlayerRangeSummarizer {
    fn default() -> Self {
        Self::new(GOOD_PLAYER_COUNT_FACTOR)
    }
}

/// Collapse runs of consecutive labels into `start-end` spans.
///
/// `N+` continues a span ending in `N`.
fn compress_labels(labels: &[String]) -> String {
    let mut range = String::new();
    let mut last = "";
    let mut span = false;

    for label in labels {
        if range.is_empty() {
            range.push_str(label);
        } else if continues(last, label) {
            span = true;
        } else {
            if span {
                range.push('-');
                range.push_str(last);
            }
            range.push(',');
            range.push_str(label);
            span = false;
        }
        last = label.as_str();
    }
    if span {
        range.push('-');
        range.push_str(last);
    }

    range
}

fn continues(last: &str, label: &str) -> bool {
    let consecutive = match (leading_int(label), leading_int(last)) {
        (Some(n), Some(prev)) => prev.checked_add(1) == Some(n),
        _ => false,
    };
    consecutive || label.strip_suffix('+') == Some(last)
}

fn span_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)-(\d+)").expect("static pattern"))
}

/// Whether `count` is listed in a range string such as `3-5,7`.
///
/// Spans are expanded textually; an open-ended `9+` only matches the literal
/// label and not 9 itself.
pub fn fits_player_count(range: &str, count: u32) -> bool {
    let expanded = span_pattern().replace_all(range, |caps: &regex::Captures| {
        let start: u32 = caps[1].parse().unwrap_or(0);
        let end: u32 = caps[2].parse().unwrap_or(0);
        let mut out = caps[1].to_string();
        for i in start.saturating_add(1)..=end {
            out.push(',');
            out.push_str(&i.to_string());
        }
        out
    });

    let wanted = count.to_string();
    expanded.split(',').any(|token| token == wanted)
}
