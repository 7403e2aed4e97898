mod memory;
mod types;

use std::sync::Arc;
use tokio::sync::Mutex;

pub use types::{CacheStore, InMemoryCacheStore};

/// Shared handle to a cache store
pub type CacheHandle = Arc<Mutex<Box<dyn CacheStore>>>;

/// A fresh, empty in-memory cache
pub fn in_memory_cache() -> CacheHandle {
    Arc::new(Mutex::new(Box::new(InMemoryCacheStore::new())))
}
