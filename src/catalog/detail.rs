use roxmltree::{Document, Node};
use std::collections::BTreeMap;

use crate::catalog::{descendant_value, first_descendant, leading_int};
use crate::core::{CatalogItemDetail, PlayerCountPoll};
use crate::error::Result;
use crate::players::PlayerRangeSummarizer;

const PLAYER_COUNT_POLL: &str = "suggested_numplayers";

/// Parse the first `<item>` of a catalog lookup response.
///
/// Returns `Ok(None)` when the document holds no item. The interaction maps
/// (`votes`, `owners`, `stars`) of the result are always empty.
pub fn parse_item_detail(
    id: &str,
    xml: &str,
    summarizer: &PlayerRangeSummarizer,
) -> Result<Option<CatalogItemDetail>> {
    let doc = Document::parse(xml)?;

    let Some(item) = doc
        .descendants()
        .find(|n| n.is_element() && n.has_tag_name("item"))
    else {
        return Ok(None);
    };

    let picture_url = first_descendant(item, "thumbnail")
        .and_then(|n| n.text())
        .unwrap_or_default()
        .trim()
        .to_string();

    let polls = parse_player_polls(item);

    Ok(Some(CatalogItemDetail {
        id: id.to_string(),
        name: descendant_value(item, "name"),
        picture_url,
        min_players: descendant_value(item, "minplayers"),
        max_players: descendant_value(item, "maxplayers"),
        rating_average: format_rating(&descendant_value(item, "average")),
        recommended_player_range: summarizer.summarize(&polls),
        votes: BTreeMap::new(),
        owners: BTreeMap::new(),
        stars: BTreeMap::new(),
    }))
}

/// Collect the suggested-player-count poll of an item, one entry per count
pub fn parse_player_polls(item: Node<'_, '_>) -> Vec<PlayerCountPoll> {
    let Some(poll) = item.descendants().find(|n| {
        n.is_element() && n.has_tag_name("poll") && n.attribute("name") == Some(PLAYER_COUNT_POLL)
    }) else {
        return Vec::new();
    };

    poll.descendants()
        .filter(|n| n.is_element() && n.has_tag_name("results"))
        .map(|results| PlayerCountPoll {
            label: results.attribute("numplayers").unwrap_or_default().to_string(),
            best: vote_count(results, "Best"),
            recommended: vote_count(results, "Recommended"),
            not_recommended: vote_count(results, "Not Recommended"),
        })
        .collect()
}

/// `numvotes` of the `<result value="...">` child, 0 when absent
fn vote_count(results: Node<'_, '_>, value: &str) -> u32 {
    results
        .descendants()
        .find(|n| n.is_element() && n.has_tag_name("result") && n.attribute("value") == Some(value))
        .and_then(|n| n.attribute("numvotes"))
        .and_then(leading_int)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

fn format_rating(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{:.1}", v),
        _ => String::new(),
    }
}
