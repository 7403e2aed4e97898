mod cache_store;
mod data_store;
mod errors;
mod types;

pub use cache_store::{CacheHandle, CacheStore, in_memory_cache};
pub use data_store::DataStore;
pub use errors::StorageError;
pub use types::CacheData;
