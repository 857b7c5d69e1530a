pub mod sqlite;

use async_trait::async_trait;
use crate::core::CatalogSearchHit;
use crate::error::Result;

pub use sqlite::SqliteCache;

/// Trait for catalog search cache implementations
#[async_trait]
pub trait CatalogCache: Send + Sync {
    /// Get cached hits by query string
    async fn get(&self, query: &str) -> Result<Option<CachedSearch>>;

    /// Save ranked hits to cache
    async fn save(&self, query: &str, hits: &[CatalogSearchHit]) -> Result<()>;

    /// Increment cache hit counter
    async fn increment_hit(&self, query: &str) -> Result<()>;

    /// Get cache statistics
    async fn stats(&self) -> Result<CacheStats>;

    /// Clear expired entries (older than `max_age_days`)
    async fn cleanup(&self, max_age_days: i64) -> Result<u64>;
}

/// Cached search with metadata
#[derive(Debug, Clone)]
pub struct CachedSearch {
    pub query: String,
    pub hits: Vec<CatalogSearchHit>,
    pub hit_count: i32,
    pub cached_at: chrono::DateTime<chrono::Utc>,
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: u64,
    pub total_hits: u64,
    pub avg_hit_count: f64,
    pub oldest_entry: Option<chrono::DateTime<chrono::Utc>>,
    pub newest_entry: Option<chrono::DateTime<chrono::Utc>>,
}
