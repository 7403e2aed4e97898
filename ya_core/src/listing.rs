//! Ordering and visibility rules for collection pages

use crate::guard::{Principal, is_owner};
use crate::news::{Comment, News};
use crate::notes::Note;

/// Notes visible on the notes list: the principal's own, all of them
pub fn own_only(principal: &Principal, mut notes: Vec<Note>) -> Vec<Note> {
    notes.retain(|note| is_owner(principal, note));
    notes.sort_by_key(|note| note.id);
    notes
}

/// News on the home page: newest first, at most `cap` items
///
/// When there are more than `cap` items the oldest are the ones left out.
pub fn home_page(mut news: Vec<News>, cap: usize) -> Vec<News> {
    news.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    news.truncate(cap);
    news
}

/// Comments under a news item in the order they were written
pub fn comment_thread(mut comments: Vec<Comment>) -> Vec<Comment> {
    comments.sort_by(|a, b| a.created.cmp(&b.created).then(a.id.cmp(&b.id)));
    comments
}
