use rusqlite::{Connection, params, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::cache::{CatalogCache, CachedSearch, CacheStats};
use crate::core::CatalogSearchHit;
use crate::error::{Result, MeepleError};

/// SQLite-based catalog search cache
///
/// ```sql
/// CREATE TABLE search_cache (
///     query TEXT PRIMARY KEY,
///     hits TEXT NOT NULL,
///     hit_count INTEGER DEFAULT 0,
///     cached_at TEXT NOT NULL
/// );
/// ```
pub struct SqliteCache {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCache {
    /// Create new SQLite cache
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS search_cache (
                query TEXT PRIMARY KEY,
                hits TEXT NOT NULL,
                hit_count INTEGER DEFAULT 0,
                cached_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_search_cached_at ON search_cache(cached_at)",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Normalize query for consistent cache lookups
    pub fn normalize_query(query: &str) -> String {
        query.trim().to_lowercase()
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| MeepleError::Cache("connection lock poisoned".to_string()))
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl CatalogCache for SqliteCache {
    async fn get(&self, query: &str) -> Result<Option<CachedSearch>> {
        let normalized = Self::normalize_query(query);
        let conn = self.conn()?;

        let row = conn
            .query_row(
                "SELECT hits, hit_count, cached_at FROM search_cache WHERE query = ?",
                params![normalized],
                |row| {
                    let hits_json: String = row.get(0)?;
                    let hit_count: i32 = row.get(1)?;
                    let cached_at: String = row.get(2)?;
                    Ok((hits_json, hit_count, cached_at))
                },
            )
            .optional()?;

        let Some((hits_json, hit_count, cached_at)) = row else {
            return Ok(None);
        };

        let hits: Vec<CatalogSearchHit> = serde_json::from_str(&hits_json)?;
        let cached_at = parse_timestamp(&cached_at).unwrap_or_else(Utc::now);

        Ok(Some(CachedSearch {
            query: normalized,
            hits,
            hit_count,
            cached_at,
        }))
    }

    async fn save(&self, query: &str, hits: &[CatalogSearchHit]) -> Result<()> {
        let normalized = Self::normalize_query(query);
        let hits_json = serde_json::to_string(hits)?;
        let conn = self.conn()?;

        conn.execute(
            "INSERT OR REPLACE INTO search_cache (query, hits, hit_count, cached_at)
             VALUES (?1, ?2, COALESCE((SELECT hit_count FROM search_cache WHERE query = ?1), 0), ?3)",
            params![normalized, hits_json, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }

    async fn increment_hit(&self, query: &str) -> Result<()> {
        let normalized = Self::normalize_query(query);
        let conn = self.conn()?;

        conn.execute(
            "UPDATE search_cache SET hit_count = hit_count + 1 WHERE query = ?",
            params![normalized],
        )?;

        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        let conn = self.conn()?;

        let (total_entries, total_hits, oldest, newest): (u64, u64, Option<String>, Option<String>) =
            conn.query_row(
                "SELECT COUNT(*), COALESCE(SUM(hit_count), 0), MIN(cached_at), MAX(cached_at)
                 FROM search_cache",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )?;

        let avg_hit_count = if total_entries > 0 {
            total_hits as f64 / total_entries as f64
        } else {
            0.0
        };

        Ok(CacheStats {
            total_entries,
            total_hits,
            avg_hit_count,
            oldest_entry: oldest.as_deref().and_then(parse_timestamp),
            newest_entry: newest.as_deref().and_then(parse_timestamp),
        })
    }

    async fn cleanup(&self, max_age_days: i64) -> Result<u64> {
        let conn = self.conn()?;

        let cutoff_date = Utc::now() - chrono::Duration::days(max_age_days);

        let deleted = conn.execute(
            "DELETE FROM search_cache WHERE cached_at <= ?",
            params![cutoff_date.to_rfc3339()],
        )?;

        Ok(deleted as u64)
    }
}
