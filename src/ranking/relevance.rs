use std::cmp::Ordering;
use std::collections::HashSet;

use crate::catalog::{leading_int, parse_search_hits};
use crate::core::CatalogSearchHit;
use crate::ranking::Ranker;

/// Maximum number of hits returned by a search
pub const SEARCH_RETURN_COUNT: usize = 10;

const NAME_LENGTH_PADDING: usize = 2;
const YEAR_REVERSE_NUM: i64 = 10000;
const UNKNOWN_YEAR_KEY: &str = "~";

/// Substring-relevance ranker for catalog search hits.
///
/// Drops expansions, puts names containing the query first, then orders by
/// name length, newest year and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelevanceRanker {
    max_results: usize,
}

impl RelevanceRanker {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Parse a raw catalog search document and rank its items.
    ///
    /// XML that does not parse counts as an empty item list.
    pub fn rank_xml(&self, query: &str, xml: &str) -> Vec<CatalogSearchHit> {
        match parse_search_hits(xml) {
            Ok(hits) => self.rank(query, &hits),
            Err(e) => {
                tracing::warn!("Unparseable catalog response for '{}': {}", query, e);
                Vec::new()
            }
        }
    }
}

impl Default for RelevanceRanker {
    fn default() -> Self {
        Self::new(SEARCH_RETURN_COUNT)
    }
}

impl Ranker for RelevanceRanker {
    fn rank(&self, query: &str, candidates: &[CatalogSearchHit]) -> Vec<CatalogSearchHit> {
        let query_lower = query.to_lowercase();

        let mut keyed: Vec<(bool, String, CatalogSearchHit)> = filter_expansions(candidates)
            .into_iter()
            .map(|hit| {
                let matches = hit.name.to_lowercase().contains(&query_lower);
                (matches, sort_string(&hit), hit)
            })
            .collect();

        // Stable: equal keys keep catalog order
        keyed.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| locale_cmp(&a.1, &b.1)));

        keyed
            .into_iter()
            .take(self.max_results)
            .map(|(_, _, hit)| hit)
            .collect()
    }

    fn name(&self) -> &str {
        "relevance"
    }
}

/// Remove expansions and any entry sharing its id with an expansion
pub fn filter_expansions(candidates: &[CatalogSearchHit]) -> Vec<CatalogSearchHit> {
    let expansion_ids: HashSet<&str> = candidates
        .iter()
        .filter(|h| h.is_expansion())
        .map(|h| h.id.as_str())
        .collect();

    candidates
        .iter()
        .filter(|h| !expansion_ids.contains(h.id.as_str()))
        .cloned()
        .collect()
}

/// Secondary ordering key: `<len:02> <10000 - year>  <name>`.
///
/// Length counts UTF-16 units. Years are compared as text, so the key of an
/// empty or non-numeric year is a marker placed after every digit: such items
/// sort after all known years of the same name length. So does a year too
/// far in the past to reverse.
pub fn sort_string(hit: &CatalogSearchHit) -> String {
    let name_len = hit.name.encode_utf16().count();
    let year_key = leading_int(&hit.year)
        .and_then(|year| YEAR_REVERSE_NUM.checked_sub(year))
        .map_or_else(|| UNKNOWN_YEAR_KEY.to_string(), |key| key.to_string());
    format!(
        "{:0>width$} {}  {}",
        name_len,
        year_key,
        hit.name,
        width = NAME_LENGTH_PADDING
    )
}

/// Case-insensitive comparison; names differing only in case put lowercase first
fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| swap_case(a).cmp(&swap_case(b)))
}

fn swap_case(s: &str) -> String {
    s.chars()
        .flat_map(|c| {
            if c.is_uppercase() {
                c.to_lowercase().collect::<Vec<_>>()
            } else {
                c.to_uppercase().collect::<Vec<_>>()
            }
        })
        .collect()
}
