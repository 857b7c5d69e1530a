use thiserror::Error;

/// Main error type for the Meeple engine
#[derive(Error, Debug)]
pub enum MeepleError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog XML could not be parsed
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Provider errors
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    /// Cache errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Rejected search input
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// No results found
    #[error("No results found for query: {0}")]
    NoResults(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<String> for MeepleError {
    fn from(s: String) -> Self {
        MeepleError::Other(s)
    }
}

impl From<&str> for MeepleError {
    fn from(s: &str) -> Self {
        MeepleError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MeepleError>;
