use async_trait::async_trait;
use meeple_engine::cache::SqliteCache;
use meeple_engine::providers::{BggProvider, CatalogProvider};
use meeple_engine::{
    fits_player_count, CatalogCache, CatalogEngine, EngineConfig, MeepleError, RelevanceRanker,
    SearchQuery,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const SEARCH_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<items total="6" termsofuse="https://boardgamegeek.com/xmlapi/termsofuse">
    <item type="boardgame" id="13">
        <name type="primary" value="Catan"/>
        <yearpublished value="1995" />
    </item>
    <item type="boardgameexpansion" id="325">
        <name type="primary" value="Catan: Seafarers"/>
        <yearpublished value="1997" />
    </item>
    <item type="boardgame" id="325">
        <name type="primary" value="Catan: Seafarers"/>
        <yearpublished value="1997" />
    </item>
    <item type="boardgame" id="27710">
        <name type="primary" value="Rivals for Catan"/>
        <yearpublished value="2010" />
    </item>
    <item type="boardgame" id="4444">
        <name type="alternate" value="Siedler Würfelspiel"/>
        <yearpublished value="2007" />
    </item>
    <item type="boardgame" id="278">
        <name type="primary" value="Catan Card Game"/>
    </item>
</items>"#;

const THING_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<items>
    <item type="boardgame" id="13">
        <thumbnail>https://cf.geekdo-images.com/catan_t.jpg</thumbnail>
        <name type="primary" sortindex="1" value="Catan" />
        <minplayers value="3" />
        <maxplayers value="4" />
        <poll name="suggested_numplayers" title="User Suggested Number of Players" totalvotes="10">
            <results numplayers="2">
                <result value="Best" numvotes="10" />
                <result value="Recommended" numvotes="0" />
                <result value="Not Recommended" numvotes="0" />
            </results>
            <results numplayers="3">
                <result value="Best" numvotes="8" />
                <result value="Recommended" numvotes="2" />
                <result value="Not Recommended" numvotes="1" />
            </results>
            <results numplayers="4">
                <result value="Best" numvotes="0" />
                <result value="Recommended" numvotes="0" />
                <result value="Not Recommended" numvotes="10" />
            </results>
            <results numplayers="5">
                <result value="Best" numvotes="2" />
                <result value="Recommended" numvotes="1" />
                <result value="Not Recommended" numvotes="0" />
            </results>
        </poll>
        <statistics page="1">
            <ratings>
                <average value="7.08913" />
            </ratings>
        </statistics>
    </item>
</items>"#;

/// Serves fixed catalog responses and counts searches
struct FixtureProvider {
    search_xml: String,
    item_xml: String,
    searches: AtomicUsize,
}

impl FixtureProvider {
    fn new(search_xml: &str, item_xml: &str) -> Self {
        Self {
            search_xml: search_xml.to_string(),
            item_xml: item_xml.to_string(),
            searches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl CatalogProvider for FixtureProvider {
    async fn search(&self, _name: &str) -> meeple_engine::Result<String> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok(self.search_xml.clone())
    }

    async fn fetch_item(&self, _id: &str) -> meeple_engine::Result<String> {
        Ok(self.item_xml.clone())
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

/// Always fails like a non-ok upstream response
struct FailingProvider;

#[async_trait]
impl CatalogProvider for FailingProvider {
    async fn search(&self, _name: &str) -> meeple_engine::Result<String> {
        Err(MeepleError::Provider {
            provider: "failing".to_string(),
            message: "Search failed (503): busy".to_string(),
        })
    }

    async fn fetch_item(&self, _id: &str) -> meeple_engine::Result<String> {
        self.search("").await
    }

    fn name(&self) -> &str {
        "failing"
    }
}

async fn engine_with(provider: Arc<dyn CatalogProvider>) -> CatalogEngine {
    let cache: Arc<dyn CatalogCache> = Arc::new(SqliteCache::new(":memory:").await.unwrap());
    CatalogEngine::with_parts(provider, Some(cache), &EngineConfig::default())
}

#[tokio::test]
async fn test_search_ranks_and_filters() {
    let engine = engine_with(Arc::new(FixtureProvider::new(SEARCH_XML, THING_XML))).await;

    let result = engine.search(SearchQuery::new("catan")).await.unwrap();
    let names: Vec<&str> = result.hits.iter().map(|h| h.name.as_str()).collect();

    assert_eq!(names, vec!["Catan", "Catan Card Game", "Rivals for Catan", "Siedler Würfelspiel"]);
    assert!(result.hits.iter().all(|h| h.id != "325"));
    assert!(!result.from_cache);
    assert_eq!(result.provider, "fixture");
    assert_eq!(result.ranking_method, "relevance");
}

#[tokio::test]
async fn test_search_hits_cache_second_time() {
    let provider = Arc::new(FixtureProvider::new(SEARCH_XML, THING_XML));
    let engine = engine_with(provider.clone()).await;

    let first = engine.search(SearchQuery::new("Catan")).await.unwrap();
    let second = engine.search(SearchQuery::new("  catan ")).await.unwrap();

    assert!(second.from_cache);
    assert_eq!(second.provider, "cache");
    assert_eq!(first.hits, second.hits);
    assert_eq!(second.hits, RelevanceRanker::default().rank_xml("catan", SEARCH_XML));
    assert_eq!(provider.searches.load(Ordering::SeqCst), 1);

    let stats = engine.cache_stats().await.unwrap();
    assert_eq!(stats.total_entries, 1);
    assert_eq!(stats.total_hits, 1);
}

#[tokio::test]
async fn test_padded_query_ranks_like_trimmed() {
    let xml = r#"<items>
        <item type="boardgame" id="188"><name value="Go"/><yearpublished value="-2200"/></item>
        <item type="boardgame" id="13"><name value="Catan"/><yearpublished value="1995"/></item>
        <item type="boardgame" id="27710"><name value="Rivals for Catan"/><yearpublished value="2010"/></item>
    </items>"#;
    let engine = engine_with(Arc::new(FixtureProvider::new(xml, THING_XML))).await;

    let padded = engine.search(SearchQuery::new("\tcatan ")).await.unwrap();
    let cached = engine.search(SearchQuery::new("catan")).await.unwrap();

    let names: Vec<&str> = cached.hits.iter().map(|h| h.name.as_str()).collect();
    assert!(cached.from_cache);
    assert_eq!(names, vec!["Catan", "Rivals for Catan", "Go"]);
    assert_eq!(padded.hits, cached.hits);
    assert_eq!(cached.hits, RelevanceRanker::default().rank_xml("catan", xml));
}

#[tokio::test]
async fn test_search_without_cache_always_fetches() {
    let provider = Arc::new(FixtureProvider::new(SEARCH_XML, THING_XML));
    let engine = engine_with(provider.clone()).await;

    let mut query = SearchQuery::new("catan");
    query.use_cache = false;
    engine.search(query.clone()).await.unwrap();
    engine.search(query).await.unwrap();

    assert_eq!(provider.searches.load(Ordering::SeqCst), 2);
    assert_eq!(engine.cache_stats().await.unwrap().total_entries, 0);
}

#[tokio::test]
async fn test_search_respects_max_results() {
    let engine = engine_with(Arc::new(FixtureProvider::new(SEARCH_XML, THING_XML))).await;

    let mut query = SearchQuery::new("catan");
    query.max_results = 2;
    let result = engine.search(query).await.unwrap();

    assert_eq!(result.hits.len(), 2);
}

#[tokio::test]
async fn test_empty_and_malformed_responses() {
    let engine = engine_with(Arc::new(FixtureProvider::new(r#"<items total="0"/>"#, "<items/>"))).await;
    let result = engine.search(SearchQuery::new("zzz")).await.unwrap();
    assert!(result.is_empty());
    // empty results are not cached
    assert_eq!(engine.cache_stats().await.unwrap().total_entries, 0);

    let engine = engine_with(Arc::new(FixtureProvider::new("<items><item", "<items/>"))).await;
    assert!(engine.search(SearchQuery::new("zzz")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_load_item() {
    let engine = engine_with(Arc::new(FixtureProvider::new(SEARCH_XML, THING_XML))).await;

    let game = engine.load_item("13").await.unwrap();

    assert_eq!(game.id, "13");
    assert_eq!(game.name, "Catan");
    assert_eq!(game.players(), "3-4");
    assert_eq!(game.rating_average, "7.1");
    assert_eq!(game.recommended_player_range, "2-3,5");
    assert!(game.votes.is_empty() && game.owners.is_empty() && game.stars.is_empty());
    assert!(fits_player_count(&game.recommended_player_range, 3));
    assert!(!fits_player_count(&game.recommended_player_range, 4));
}

#[tokio::test]
async fn test_load_missing_item() {
    let engine = engine_with(Arc::new(FixtureProvider::new(SEARCH_XML, "<items/>"))).await;

    let result = engine.load_item("999999").await;
    assert!(matches!(result, Err(MeepleError::NoResults(id)) if id == "999999"));
}

#[tokio::test]
async fn test_provider_errors_propagate() {
    let engine = engine_with(Arc::new(FailingProvider)).await;

    assert!(matches!(
        engine.search(SearchQuery::new("catan")).await,
        Err(MeepleError::Provider { .. })
    ));
    assert!(matches!(engine.load_item("13").await, Err(MeepleError::Provider { .. })));
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_live_catalog() {
    let config = EngineConfig::default();
    let provider: Arc<dyn CatalogProvider> = Arc::new(BggProvider::new(&config).unwrap());
    let engine = CatalogEngine::with_parts(provider, None, &config);

    let result = engine.search(SearchQuery::new("catan")).await.unwrap();
    assert_eq!(result.hits[0].name, "Catan");

    let game = engine.load_item("13").await.unwrap();
    assert!(!game.recommended_player_range.is_empty());
}
