//! Parse boundary for catalog XML responses.
//!
//! Both response shapes (search by name, lookup by id) are `<items>` documents
//! holding `<item>` elements. Every field read here falls back to a default
//! (empty string, or 0 for vote counts) so a missing element never fails.

pub mod detail;
pub mod search;

use roxmltree::Node;

pub use detail::{parse_item_detail, parse_player_polls};
pub use search::parse_search_hits;

/// First element below `node` (excluding `node` itself) with the given tag
pub(crate) fn first_descendant<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|n| n.is_element() && n.has_tag_name(tag))
}

/// `value` attribute of the first descendant with the given tag, or ""
pub(crate) fn descendant_value(node: Node<'_, '_>, tag: &str) -> String {
    first_descendant(node, tag)
        .and_then(|n| n.attribute("value"))
        .unwrap_or_default()
        .to_string()
}

/// Leading integer of a string, ignoring leading whitespace and any trailing
/// non-digit text: `"8+"` → 8, `" 2020"` → 2020, `"abc"` → None.
pub fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    rest[..digits_end].parse::<i64>().ok().map(|n| sign * n)
}
