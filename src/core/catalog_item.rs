use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Catalog type marking an expansion of another item
pub const EXPANSION_TYPE: &str = "boardgameexpansion";

/// One parsed entry of a catalog search response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSearchHit {
    /// Catalog id (the item's `id` attribute)
    #[serde(default)]
    pub id: String,

    /// Catalog type, e.g. `boardgame` or `boardgameexpansion`
    #[serde(default, rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub name: String,

    /// Publication year as delivered by the catalog, possibly empty
    #[serde(default)]
    pub year: String,
}

impl CatalogSearchHit {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        name: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
            year: year.into(),
        }
    }

    pub fn is_expansion(&self) -> bool {
        self.kind == EXPANSION_TYPE
    }

    /// Get display name (for logging/UI)
    pub fn display_name(&self) -> String {
        if self.year.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.year)
        }
    }
}

/// A catalog item as stored in the shared game list.
///
/// Freshly loaded items always carry empty `votes`, `owners` and `stars`;
/// stored records missing those maps deserialize them as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItemDetail {
    /// Catalog id
    #[serde(default, rename = "gid")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Thumbnail URL
    #[serde(default, rename = "pic")]
    pub picture_url: String,

    #[serde(default)]
    pub min_players: String,

    #[serde(default)]
    pub max_players: String,

    /// Average rating with one decimal, empty when unknown
    #[serde(default, rename = "rating")]
    pub rating_average: String,

    /// Compact range such as `3-5,7`
    #[serde(default, rename = "recPlayers")]
    pub recommended_player_range: String,

    /// uid → vote timestamp
    #[serde(default)]
    pub votes: BTreeMap<String, i64>,

    /// uid → ownership timestamp
    #[serde(default)]
    pub owners: BTreeMap<String, i64>,

    /// uid → star timestamp
    #[serde(default)]
    pub stars: BTreeMap<String, i64>,
}

impl CatalogItemDetail {
    /// Publisher player count as `min-max`
    pub fn players(&self) -> String {
        format!("{}-{}", self.min_players, self.max_players)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_expansion() {
        let base = CatalogSearchHit::new("13", "boardgame", "Catan", "1995");
        let exp = CatalogSearchHit::new("325", EXPANSION_TYPE, "Catan: Seafarers", "1997");
        assert!(!base.is_expansion());
        assert!(exp.is_expansion());
        assert_eq!(base.display_name(), "Catan (1995)");
    }

    #[test]
    fn test_detail_missing_maps_default_empty() {
        let detail = CatalogItemDetail::from_json(r#"{"gid":"13","name":"Catan"}"#).unwrap();
        assert_eq!(detail.id, "13");
        assert!(detail.votes.is_empty());
        assert!(detail.owners.is_empty());
        assert!(detail.stars.is_empty());
    }

    #[test]
    fn test_detail_players() {
        let detail = CatalogItemDetail {
            min_players: "3".to_string(),
            max_players: "4".to_string(),
            ..Default::default()
        };
        assert_eq!(detail.players(), "3-4");
    }
}
