//! # Meeple Engine
//!
//! Backend logic for the Meeple board game group:
//! - Catalog search against the BoardGameGeek XML API with relevance ranking
//! - Recommended player ranges from the catalog's player-count poll
//! - SQLite caching of ranked searches
//! - Game list and event list ordering
//! - Push notification planning and calendar feed entries
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use meeple_engine::{CatalogEngine, EngineConfig, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = CatalogEngine::new(&EngineConfig::from_env()?).await?;
//!
//!     let results = engine.search(SearchQuery::new("catan")).await?;
//!     for hit in &results.hits {
//!         println!("{} - {}", hit.id, hit.display_name());
//!     }
//!
//!     let game = engine.load_item("13").await?;
//!     println!("{}: best with {}", game.name, game.recommended_player_range);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod catalog;
pub mod cache;
pub mod ranking;
pub mod players;
pub mod providers;
pub mod engine;
pub mod config;
pub mod error;
pub mod games;
pub mod events;
pub mod notify;
pub mod calendar;
pub mod links;

// Re-export primary types
pub use crate::core::{CatalogItemDetail, CatalogSearchHit, Event, PlayerCountPoll, SearchResponse};
pub use crate::engine::{CatalogEngine, SearchQuery};
pub use config::EngineConfig;
pub use error::{MeepleError, Result};
pub use cache::CatalogCache;
pub use players::{fits_player_count, PlayerRangeSummarizer};
pub use ranking::{Ranker, RelevanceRanker};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
