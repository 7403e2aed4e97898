use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Instant;

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

#[derive(Clone, Debug)]
pub(super) struct CacheEntry {
    pub(super) data: CacheData,
    pub(super) expires_at: Instant,
}

#[derive(Clone, Debug)]
pub struct InMemoryCacheStore {
    pub(super) entry: HashMap<String, CacheEntry>,
}

#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Put a token into the store with a time-to-live in seconds.
    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: usize,
    ) -> Result<(), StorageError>;

    /// Get a token from the store. Expired tokens are never returned.
    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError>;

    /// Remove a token from the store.
    async fn remove(&mut self, prefix: &str, key: &str) -> Result<(), StorageError>;
}
