mod filter;
mod storage;
mod types;

pub use filter::{BAD_WORDS, WARNING, check_comment_text};
pub use storage::{CommentStore, NewsStore};
pub use types::{Comment, NewNews, News};
