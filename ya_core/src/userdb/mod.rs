mod errors;
mod password;
mod storage;
mod types;

pub use errors::UserError;
pub use storage::UserStore;
pub use types::{User, UserId, UserSearchField};

pub(crate) use storage::DB_TABLE_USERS;
