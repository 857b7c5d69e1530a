//! Shareable page links for games and events.

/// `#<id>:<name>` with spaces replaced by `_` before encoding
pub fn hash_fragment(id: &str, name: &str) -> String {
    format!("#{}:{}", id, urlencoding::encode(&name.replace(' ', "_")))
}

/// Id segment of a `#<id>:<name>` fragment
pub fn id_from_hash(hash: &str) -> Option<&str> {
    if hash.is_empty() {
        return None;
    }
    hash.split(['#', ':']).nth(1)
}

/// Site-relative link to an event page
pub fn event_link(event_id: &str, event_name: &str) -> String {
    format!("/events.html#{}:{}", event_id, urlencoding::encode(event_name))
}

/// Absolute link to an event page on the given domain
pub fn event_url(domain: &str, event_id: &str, event_name: &str) -> String {
    format!("https://{}{}", domain, event_link(event_id, event_name))
}
