use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

use super::types::{CacheEntry, CacheStore, InMemoryCacheStore};

const CACHE_PREFIX: &str = "cache";

impl InMemoryCacheStore {
    pub(crate) fn new() -> Self {
        tracing::info!("Creating new in-memory cache store");
        Self {
            entry: HashMap::new(),
        }
    }

    fn make_key(prefix: &str, key: &str) -> String {
        format!("{CACHE_PREFIX}:{prefix}:{key}")
    }

    /// Drop every entry whose time-to-live has run out
    fn evict_expired(&mut self, now: Instant) {
        let before = self.entry.len();
        self.entry.retain(|_, entry| entry.expires_at > now);

        let evicted = before - self.entry.len();
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted expired cache entries");
        }
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError> {
        let now = Instant::now();
        self.evict_expired(now);

        let key = Self::make_key(prefix, key);
        self.entry.insert(
            key,
            CacheEntry {
                data: value,
                expires_at: now + Duration::from_secs(ttl as u64),
            },
        );
        Ok(())
    }

    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let key = Self::make_key(prefix, key);
        let now = Instant::now();
        Ok(self
            .entry
            .get(&key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.data.clone()))
    }

    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError> {
        let key = Self::make_key(prefix, key);
        self.entry.remove(&key);
        Ok(())
    }
}
