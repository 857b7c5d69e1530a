use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meeple_engine::{
    CatalogEngine, CatalogItemDetail, EngineConfig, MeepleError, SearchQuery, SearchResponse,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<CatalogEngine>,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    query: String,
    #[serde(default = "default_max_results")]
    max_results: usize,
    #[serde(default = "default_true")]
    use_cache: bool,
}

fn default_max_results() -> usize { meeple_engine::ranking::SEARCH_RETURN_COUNT }
fn default_true() -> bool { true }

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    cache: CacheStatsDto,
}

#[derive(Debug, Serialize)]
struct CacheStatsDto {
    total_entries: u64,
    total_hits: u64,
    avg_hit_count: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meeple_server=debug,meeple_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::from_env()?;

    tracing::info!("🚀 Starting Meeple catalog server");
    tracing::info!("📦 Database: {} (cache {})", config.db_path, config.cache_enabled);
    tracing::info!("🌐 Catalog: {}", config.catalog_base_url);
    tracing::info!("🔌 Port: {}", config.port);

    let engine = CatalogEngine::new(&config).await?;

    let state = AppState {
        engine: Arc::new(engine),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/search", post(search_handler))
        .route("/v1/items/:id", get(item_handler))
        .route("/v1/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("🎲 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: meeple_engine::VERSION.to_string(),
    })
}

async fn search_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    tracing::debug!("Search request: {:?}", req);

    let query = SearchQuery {
        query: req.query,
        max_results: req.max_results,
        use_cache: req.use_cache,
    };

    let result = state.engine.search(query).await?;

    tracing::info!("✅ {} ({:.1}ms)", result.display(), result.latency_ms);

    Ok(Json(result))
}

async fn item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CatalogItemDetail>, AppError> {
    let item = state.engine.load_item(&id).await?;

    tracing::info!("✅ {} → {} ({})", id, item.name, item.recommended_player_range);

    Ok(Json(item))
}

async fn stats_handler(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let cache_stats = state.engine.cache_stats().await?;

    Ok(Json(StatsResponse {
        cache: CacheStatsDto {
            total_entries: cache_stats.total_entries,
            total_hits: cache_stats.total_hits,
            avg_hit_count: cache_stats.avg_hit_count,
        },
    }))
}

// Error handling
struct AppError(MeepleError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            MeepleError::NoResults(query) => {
                (StatusCode::NOT_FOUND, format!("No results found for: {}", query))
            }
            MeepleError::InvalidQuery(reason) => (StatusCode::BAD_REQUEST, reason),
            MeepleError::Provider { provider, message } => {
                (StatusCode::BAD_GATEWAY, format!("Provider '{}' error: {}", provider, message))
            }
            e => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<MeepleError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
