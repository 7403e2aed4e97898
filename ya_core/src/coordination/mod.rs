mod errors;
mod news;
mod notes;
mod user;

pub use errors::CoreError;
pub use news::{
    CommentPage, HomePage, NewsDetailPage, comment_create, comment_delete, comment_delete_confirm,
    comment_edit_form, comment_update, news_detail, news_home,
};
pub use notes::{
    NoteFormPage, NotesListPage, note_add_form, note_create, note_delete, note_delete_confirm,
    note_detail, note_edit_form, note_update, notes_list, notes_success,
};
pub use user::{LoginForm, SignupForm, login, logout, signup};
