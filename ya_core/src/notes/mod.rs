pub(crate) mod slug;
mod storage;
mod types;

pub use slug::{SLUG_WARNING, is_valid_slug, slugify};
pub use storage::NoteStore;
pub use types::{NewNote, Note};
