use crate::cache::{CacheStats, CatalogCache, SqliteCache};
use crate::catalog::parse_item_detail;
use crate::config::EngineConfig;
use crate::core::{CatalogItemDetail, SearchResponse};
use crate::error::{MeepleError, Result};
use crate::players::PlayerRangeSummarizer;
use crate::providers::{BggProvider, CatalogProvider};
use crate::ranking::{Ranker, RelevanceRanker};
use std::sync::Arc;
use std::time::Instant;

/// Catalog search and item loading orchestrator
pub struct CatalogEngine {
    provider: Arc<dyn CatalogProvider>,
    cache: Option<Arc<dyn CatalogCache>>,
    ranker: RelevanceRanker,
    summarizer: PlayerRangeSummarizer,
}

/// Search query parameters
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub max_results: usize,
    pub use_cache: bool,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: crate::ranking::SEARCH_RETURN_COUNT,
            use_cache: true,
        }
    }
}

impl CatalogEngine {
    /// Create engine with the BGG provider and, if enabled, a SQLite cache
    pub async fn new(config: &EngineConfig) -> Result<Self> {
        let provider: Arc<dyn CatalogProvider> = Arc::new(BggProvider::new(config)?);

        let cache: Option<Arc<dyn CatalogCache>> = if config.cache_enabled {
            Some(Arc::new(SqliteCache::new(&config.db_path).await?))
        } else {
            None
        };

        Ok(Self::with_parts(provider, cache, config))
    }

    /// Create engine from explicit parts
    pub fn with_parts(
        provider: Arc<dyn CatalogProvider>,
        cache: Option<Arc<dyn CatalogCache>>,
        config: &EngineConfig,
    ) -> Self {
        tracing::info!(
            "Catalog engine: provider={}, cache={}, max_results={}",
            provider.name(),
            cache.is_some(),
            config.max_results
        );

        Self {
            provider,
            cache,
            ranker: RelevanceRanker::new(config.max_results),
            summarizer: PlayerRangeSummarizer::new(config.good_player_count_factor),
        }
    }

    /// Search the catalog by name
    pub async fn search(&self, query: SearchQuery) -> Result<SearchResponse> {
        let start = Instant::now();

        let name = query.query.trim();
        if name.is_empty() {
            return Err(MeepleError::InvalidQuery("query must not be empty".to_string()));
        }

        let limit = query.max_results.min(self.ranker.max_results());
        let cache = if query.use_cache { self.cache.as_ref() } else { None };

        // Check cache first
        if let Some(cache) = cache {
            if let Some(cached) = cache.get(name).await? {
                tracing::debug!("Cache hit for '{}' ({} hits)", name, cached.hits.len());
                cache.increment_hit(name).await?;

                let hits = cached.hits.into_iter().take(limit).collect();
                let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

                return Ok(SearchResponse::new(query.query, hits, true, latency_ms)
                    .with_provider("cache")
                    .with_ranking_method("cache"));
            }
        }

        let xml = self.provider.search(name).await?;
        let ranked = self.ranker.rank_xml(name, &xml);
        tracing::debug!("Provider {} returned {} ranked hits", self.provider.name(), ranked.len());

        if let Some(cache) = cache {
            if !ranked.is_empty() {
                if let Err(e) = cache.save(name, &ranked).await {
                    tracing::warn!("Failed to save to cache: {}", e);
                }
            }
        }

        let hits = ranked.into_iter().take(limit).collect();
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        Ok(SearchResponse::new(query.query, hits, false, latency_ms)
            .with_provider(self.provider.name())
            .with_ranking_method(self.ranker.name()))
    }

    /// Load one catalog item with its recommended player range
    pub async fn load_item(&self, id: &str) -> Result<CatalogItemDetail> {
        let id = id.trim();
        if id.is_empty() {
            return Err(MeepleError::InvalidQuery("item id must not be empty".to_string()));
        }

        let xml = self.provider.fetch_item(id).await?;

        let detail = parse_item_detail(id, &xml, &self.summarizer)?
            .ok_or_else(|| MeepleError::NoResults(id.to_string()))?;

        tracing::debug!(
            "Loaded {} '{}' (players {}, recommended {})",
            detail.id,
            detail.name,
            detail.players(),
            detail.recommended_player_range
        );

        Ok(detail)
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Get cache statistics
    pub async fn cache_stats(&self) -> Result<CacheStats> {
        match &self.cache {
            Some(cache) => cache.stats().await,
            None => Err(MeepleError::Cache("cache disabled".to_string())),
        }
    }

    /// Clean up old cache entries
    pub async fn cleanup_cache(&self, max_age_days: i64) -> Result<u64> {
        match &self.cache {
            Some(cache) => cache.cleanup(max_age_days).await,
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> EngineConfig {
        EngineConfig {
            db_path: ":memory:".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_engine_creation() {
        let engine = CatalogEngine::new(&memory_config()).await.unwrap();
        assert!(engine.has_cache());
    }

    #[tokio::test]
    async fn test_engine_without_cache() {
        let config = EngineConfig {
            cache_enabled: false,
            ..memory_config()
        };
        let engine = CatalogEngine::new(&config).await.unwrap();

        assert!(!engine.has_cache());
        assert!(engine.cache_stats().await.is_err());
        assert_eq!(engine.cleanup_cache(0).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let engine = CatalogEngine::new(&memory_config()).await.unwrap();
        let result = engine.search(SearchQuery::new("   ")).await;
        assert!(matches!(result, Err(MeepleError::InvalidQuery(_))));
    }
}
