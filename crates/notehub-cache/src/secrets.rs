//! Read-through secret cache.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use notehub_core::config::SecretsConfig;
use notehub_core::result::AppResult;

use crate::source::SecretSource;

/// Read-through TTL cache over a [`SecretSource`].
///
/// Safe under concurrent reads. Two overlapping misses for the same key
/// may both hit the source; duplicate upstream fetches are tolerated and
/// last-write-wins in the cache.
#[derive(Clone)]
pub struct SecretCache {
    cache: Cache<String, String>,
    source: Arc<dyn SecretSource>,
}

impl std::fmt::Debug for SecretCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl SecretCache {
    /// Create a new secret cache from configuration.
    pub fn new(config: &SecretsConfig, source: Arc<dyn SecretSource>) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(Duration::from_secs(config.cache_ttl_seconds))
            .build();

        Self { cache, source }
    }

    /// Resolve a secret by name, fetching from the source on a miss.
    ///
    /// Fetch failures are not cached; the next call retries the source.
    pub async fn get(&self, name: &str) -> AppResult<String> {
        if let Some(value) = self.cache.get(name).await {
            return Ok(value);
        }

        debug!(name, "Secret cache miss, fetching from source");
        let value = self.source.fetch(name).await?;
        self.cache.insert(name.to_string(), value.clone()).await;
        Ok(value)
    }

    /// Drop a cached secret so the next read refetches it.
    pub async fn invalidate(&self, name: &str) {
        self.cache.invalidate(name).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use notehub_core::error::AppError;

    struct CountingSource {
        fetches: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl SecretSource for CountingSource {
        async fn fetch(&self, name: &str) -> AppResult<String> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::dependency("unavailable"));
            }
            Ok(format!("value-of-{name}"))
        }
    }

    fn config(ttl: u64) -> SecretsConfig {
        SecretsConfig {
            cache_ttl_seconds: ttl,
            cache_capacity: 16,
        }
    }

    #[tokio::test]
    async fn miss_populates_and_hit_skips_source() {
        let source = Arc::new(CountingSource::new(false));
        let cache = SecretCache::new(&config(60), source.clone());

        assert_eq!(cache.get("JWT_SECRET").await.unwrap(), "value-of-JWT_SECRET");
        assert_eq!(cache.get("JWT_SECRET").await.unwrap(), "value-of-JWT_SECRET");
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_not_cached() {
        let source = Arc::new(CountingSource::new(true));
        let cache = SecretCache::new(&config(60), source.clone());

        assert!(cache.get("MISSING").await.is_err());
        assert!(cache.get("MISSING").await.is_err());
        // Both calls reached the source; errors never populate the cache.
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn concurrent_misses_are_tolerated() {
        let source = Arc::new(CountingSource::new(false));
        let cache = SecretCache::new(&config(60), source.clone());

        let (a, b) = tokio::join!(cache.get("SHARED"), cache.get("SHARED"));
        assert_eq!(a.unwrap(), "value-of-SHARED");
        assert_eq!(b.unwrap(), "value-of-SHARED");
        // One or two fetches depending on interleaving; never zero.
        let fetches = source.fetches.load(Ordering::SeqCst);
        assert!(fetches >= 1 && fetches <= 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let source = Arc::new(CountingSource::new(false));
        let cache = SecretCache::new(&config(60), source.clone());

        cache.get("ROTATED").await.unwrap();
        cache.invalidate("ROTATED").await;
        cache.get("ROTATED").await.unwrap();
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
    }
}
