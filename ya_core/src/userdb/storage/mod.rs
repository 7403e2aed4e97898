mod config;
mod sqlite;
mod store_type;

pub(crate) use config::DB_TABLE_USERS;
pub use store_type::UserStore;
