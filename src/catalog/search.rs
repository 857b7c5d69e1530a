use roxmltree::Document;

use crate::catalog::descendant_value;
use crate::core::CatalogSearchHit;
use crate::error::Result;

/// Parse every `<item>` of a catalog search response into a hit.
///
/// Missing attributes or child elements become empty strings. Only a
/// document that is not well-formed XML is an error.
pub fn parse_search_hits(xml: &str) -> Result<Vec<CatalogSearchHit>> {
    let doc = Document::parse(xml)?;

    let hits = doc
        .descendants()
        .filter(|n| n.is_element() && n.has_tag_name("item"))
        .map(|node| CatalogSearchHit {
            id: node.attribute("id").unwrap_or_default().to_string(),
            kind: node.attribute("type").unwrap_or_default().to_string(),
            name: descendant_value(node, "name"),
            year: descendant_value(node, "yearpublished"),
        })
        .collect();

    Ok(hits)
}
