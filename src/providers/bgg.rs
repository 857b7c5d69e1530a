use async_trait::async_trait;
use reqwest::Client;

use crate::config::EngineConfig;
use crate::providers::CatalogProvider;
use crate::error::{Result, MeepleError};

const PROVIDER_NAME: &str = "bgg";

/// BoardGameGeek XML API provider
pub struct BggProvider {
    client: Client,
    base_url: String,
}

impl BggProvider {
    /// Create new provider from the engine configuration
    pub fn new(config: &EngineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self::with_client(client, &config.catalog_base_url))
    }

    /// Create provider around an existing HTTP client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn search_url(&self, name: &str) -> String {
        format!("{}search?query={}", self.base_url, urlencoding::encode(name))
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}thing?stats=1&id={}", self.base_url, urlencoding::encode(id))
    }

    /// GET a URL and return its body, failing on non-success status
    async fn fetch_text(&self, url: &str, what: &str) -> Result<String> {
        let response = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| MeepleError::Provider {
                provider: PROVIDER_NAME.to_string(),
                message: format!("{} request failed: {}", what, e),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| MeepleError::Provider {
                provider: PROVIDER_NAME.to_string(),
                message: format!("{} body unreadable: {}", what, e),
            })?;

        if !status.is_success() {
            return Err(MeepleError::Provider {
                provider: PROVIDER_NAME.to_string(),
                message: format!("{} failed ({}): {}", what, status, text),
            });
        }

        tracing::debug!("{} {} → {} bytes", what, url, text.len());
        Ok(text)
    }
}

#[async_trait]
impl CatalogProvider for BggProvider {
    async fn search(&self, name: &str) -> Result<String> {
        self.fetch_text(&self.search_url(name), "Search").await
    }

    async fn fetch_item(&self, id: &str) -> Result<String> {
        self.fetch_text(&self.item_url(id), "Load").await
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> BggProvider {
        BggProvider::new(&EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_urls_are_encoded() {
        let p = provider();
        assert_eq!(
            p.search_url("ticket to ride"),
            "https://boardgamegeek.com/xmlapi2/search?query=ticket%20to%20ride"
        );
        assert_eq!(
            p.item_url("13&x=1"),
            "https://boardgamegeek.com/xmlapi2/thing?stats=1&id=13%26x%3D1"
        );
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_bgg_search() {
        let xml = provider().search("catan").await.unwrap();
        assert!(xml.contains("<items"));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_bgg_fetch_item() {
        let xml = provider().fetch_item("13").await.unwrap();
        assert!(xml.contains("suggested_numplayers"));
    }
}
