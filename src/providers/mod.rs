pub mod bgg;

use async_trait::async_trait;
use crate::error::Result;

pub use bgg::BggProvider;

/// Trait for catalog data sources.
///
/// Implementations return the raw XML body of a successful response and
/// report non-success statuses as errors.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search catalog items by name
    async fn search(&self, name: &str) -> Result<String>;

    /// Fetch one item, with statistics and polls, by catalog id
    async fn fetch_item(&self, id: &str) -> Result<String>;

    /// Get provider name
    fn name(&self) -> &str;
}
