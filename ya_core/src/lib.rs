//! ya_core - domain library for the notes and news applications
//!
//! This crate holds everything the web layer needs that is not HTTP:
//! persistence, sessions, the ownership guard, listing policy, the banned-word
//! filter and slug derivation. Request-level operations live in
//! `coordination` and return typed page views.

mod config;
mod coordination;
mod forms;
mod guard;
mod listing;
mod news;
mod notes;
mod session;
mod storage;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::{
    GENERIC_DATA_STORE_URL, NEWS_COUNT_ON_HOME_PAGE, NOTE_SLUG_MAX_LENGTH, NOTE_TITLE_MAX_LENGTH,
};

pub use coordination::{
    CommentPage, CoreError, HomePage, LoginForm, NewsDetailPage, NoteFormPage, NotesListPage,
    SignupForm, comment_create, comment_delete, comment_delete_confirm, comment_edit_form,
    comment_update, login, logout, news_detail, news_home, note_add_form, note_create,
    note_delete, note_delete_confirm, note_detail, note_edit_form, note_update, notes_list,
    notes_success, signup,
};

pub use forms::{CommentForm, CommentFormView, FormErrors, NoteForm, NoteFormView, REQUIRED_FIELD};
pub use guard::{Owned, Principal, authorize_owner, is_owner, require_user};
pub use listing::{comment_thread, home_page, own_only};
pub use news::{BAD_WORDS, Comment, CommentStore, NewNews, News, NewsStore, WARNING};
pub use notes::{NewNote, Note, NoteStore, SLUG_WARNING, is_valid_slug, slugify};
pub use session::{
    SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SessionError, create_session,
    get_user_from_session, load_session_user, prepare_logout_response, principal_from_headers,
};
pub use storage::{CacheHandle, CacheStore, DataStore, StorageError, in_memory_cache};
pub use userdb::{User, UserError, UserId, UserSearchField, UserStore};
pub use utils::{UtilError, gen_random_string};

/// Shared state handed to every request-level operation
///
/// Built once per application (or once per test) and cloned into handlers;
/// nothing in it is a process-wide singleton.
#[derive(Clone)]
pub struct AppContext {
    pub store: DataStore,
    pub cache: CacheHandle,
    pub news_count_on_home_page: usize,
}

impl AppContext {
    pub fn new(store: DataStore) -> Self {
        Self {
            store,
            cache: in_memory_cache(),
            news_count_on_home_page: *NEWS_COUNT_ON_HOME_PAGE,
        }
    }

    pub fn with_news_count(mut self, count: usize) -> Self {
        self.news_count_on_home_page = count;
        self
    }
}

/// Create every table the applications use
pub async fn init(store: &DataStore) -> Result<(), CoreError> {
    UserStore::init(store).await?;
    NoteStore::init(store).await?;
    NewsStore::init(store).await?;
    Ok(())
}
