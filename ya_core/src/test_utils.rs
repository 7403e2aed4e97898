//! Fixtures shared by the unit tests

use chrono::{Duration, NaiveDate};

use crate::AppContext;
use crate::news::{Comment, CommentStore, NewNews, News, NewsStore};
use crate::notes::{NewNote, Note, NoteStore};
use crate::storage::DataStore;
use crate::userdb::{User, UserStore};

pub(crate) const TEST_PASSWORD: &str = "test-password";

/// A migrated in-memory database
pub(crate) async fn fresh_store() -> DataStore {
    let store = DataStore::in_memory()
        .await
        .expect("Failed to open in-memory store");
    crate::init(&store)
        .await
        .expect("Failed to create tables");
    store
}

pub(crate) async fn fresh_context() -> AppContext {
    AppContext::new(fresh_store().await)
}

pub(crate) async fn create_user(store: &DataStore, username: &str) -> User {
    UserStore::create_user(store, username, TEST_PASSWORD)
        .await
        .expect("Failed to create user")
}

pub(crate) async fn create_news(store: &DataStore) -> News {
    NewsStore::create_news(store, NewNews::today("Заголовок", "Текст"))
        .await
        .expect("Failed to create news")
}

/// `count` items one day apart, starting from a fixed date and going back
pub(crate) async fn seed_news(store: &DataStore, count: usize) -> Vec<News> {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
    let items = (0..count)
        .map(|i| NewNews {
            title: format!("Новость {i}"),
            text: "Просто текст.".to_string(),
            date: start - Duration::days(i as i64),
        })
        .collect();

    NewsStore::bulk_create(store, items)
        .await
        .expect("Failed to seed news")
}

pub(crate) struct NotesFixture {
    pub ctx: AppContext,
    pub author: User,
    pub reader: User,
    pub note: Note,
}

/// Two users and one note owned by the first
pub(crate) async fn notes_fixture() -> NotesFixture {
    let ctx = fresh_context().await;
    let author = create_user(&ctx.store, "Автор").await;
    let reader = create_user(&ctx.store, "Читатель").await;
    let note = NoteStore::create_note(
        &ctx.store,
        NewNote {
            title: "Заголовок".to_string(),
            text: "Текст".to_string(),
            slug: "note-slug".to_string(),
            author: author.id,
        },
    )
    .await
    .expect("Failed to create note");

    NotesFixture {
        ctx,
        author,
        reader,
        note,
    }
}

pub(crate) struct NewsFixture {
    pub ctx: AppContext,
    pub author: User,
    pub reader: User,
    pub news: News,
    pub comment: Comment,
}

/// One news item with a single comment by `author`
pub(crate) async fn news_fixture() -> NewsFixture {
    let ctx = fresh_context().await;
    let author = create_user(&ctx.store, "Автор комментария").await;
    let reader = create_user(&ctx.store, "Читатель").await;
    let news = create_news(&ctx.store).await;
    let comment = CommentStore::create_comment(&ctx.store, news.id, author.id, "Текст комментария")
        .await
        .expect("Failed to create comment");

    NewsFixture {
        ctx,
        author,
        reader,
        news,
        comment,
    }
}
