use std::sync::LazyLock;

use crate::config::DB_TABLE_PREFIX;

/// Users table name
pub(crate) static DB_TABLE_USERS: LazyLock<String> =
    LazyLock::new(|| format!("{}{}", *DB_TABLE_PREFIX, "users"));
