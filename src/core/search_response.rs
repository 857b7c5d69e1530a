use serde::{Deserialize, Serialize};
use crate::core::CatalogSearchHit;

/// Ranked catalog search hits with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query as submitted
    pub query: String,

    /// Ranked hits, best first
    #[serde(default)]
    pub hits: Vec<CatalogSearchHit>,

    /// Whether result came from cache
    pub from_cache: bool,

    /// Search latency in milliseconds
    pub latency_ms: f64,

    /// Provider that returned the result
    pub provider: String,

    /// Ranking method used
    pub ranking_method: String,
}

impl SearchResponse {
    /// Create a new search response
    pub fn new(query: impl Into<String>, hits: Vec<CatalogSearchHit>, from_cache: bool, latency_ms: f64) -> Self {
        Self {
            query: query.into(),
            hits,
            from_cache,
            latency_ms,
            provider: String::from("unknown"),
            ranking_method: String::from("unknown"),
        }
    }

    /// Set provider name
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Set ranking method
    pub fn with_ranking_method(mut self, method: impl Into<String>) -> Self {
        self.ranking_method = method.into();
        self
    }

    pub fn best(&self) -> Option<&CatalogSearchHit> {
        self.hits.first()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        let best = self
            .best()
            .map(|h| h.display_name())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "{} → {} ({} hits, {}) [{}]",
            self.query,
            best,
            self.hits.len(),
            self.provider,
            self.ranking_method
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_creation() {
        let hits = vec![CatalogSearchHit::new("13", "boardgame", "Catan", "1995")];
        let response = SearchResponse::new("catan", hits, false, 12.3)
            .with_provider("bgg")
            .with_ranking_method("relevance");

        assert_eq!(response.best().unwrap().name, "Catan");
        assert!(!response.from_cache);
        assert_eq!(response.provider, "bgg");
        assert_eq!(response.display(), "catan → Catan (1995) (1 hits, bgg) [relevance]");
    }

    #[test]
    fn test_empty_response() {
        let response = SearchResponse::new("nothing", Vec::new(), true, 0.5);
        assert!(response.is_empty());
        assert!(response.best().is_none());
    }
}
