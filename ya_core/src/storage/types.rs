use serde::{Deserialize, Serialize};

/// Opaque value kept in a cache store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheData {
    pub value: String,
}
