pub mod relevance;

use crate::core::CatalogSearchHit;

pub use relevance::{RelevanceRanker, SEARCH_RETURN_COUNT};

/// Trait for search-hit ranking implementations
pub trait Ranker: Send + Sync {
    /// Filter and order candidates against the query, best first.
    ///
    /// Never fails; an empty candidate list yields an empty result.
    fn rank(&self, query: &str, candidates: &[CatalogSearchHit]) -> Vec<CatalogSearchHit>;

    /// Get ranker name for logging
    fn name(&self) -> &str;
}
