//! Central configuration for the ya_core crate

use std::{env, sync::LazyLock};

/// Maximum number of news items on the home page
/// Default: 10
pub static NEWS_COUNT_ON_HOME_PAGE: LazyLock<usize> = LazyLock::new(|| {
    env::var("NEWS_COUNT_ON_HOME_PAGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10)
});

/// Connection string used by the demo binaries
pub static GENERIC_DATA_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_URL").unwrap_or_else(|_| "sqlite:./ya.db".to_string())
});

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "ya_".to_string()));

pub const NOTE_TITLE_MAX_LENGTH: usize = 100;
pub const NOTE_SLUG_MAX_LENGTH: usize = 100;
