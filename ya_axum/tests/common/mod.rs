//! Shared fixtures for the router tests
#![allow(dead_code)]

use axum::{Router, body::Body};
use chrono::{Duration, NaiveDate};
use http::{
    HeaderMap, Method, Request, StatusCode,
    header::{CONTENT_TYPE, COOKIE, HeaderName, LOCATION, SET_COOKIE},
};
use tower::util::ServiceExt;
use ya_core::{
    AppContext, Comment, CommentStore, DataStore, NewNews, NewNote, News, NewsStore, Note,
    NoteStore, User, UserStore, create_session,
};

pub const PASSWORD: &str = "test-password";

pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub body: String,
}

/// An application under test plus its context
pub struct TestApp {
    pub ctx: AppContext,
    router: Router,
}

impl TestApp {
    pub async fn notes() -> Self {
        let ctx = fresh_context().await;
        let router = ya_axum::notes_router_no_trace(ctx.clone());
        Self { ctx, router }
    }

    pub async fn news() -> Self {
        let ctx = fresh_context().await;
        let router = ya_axum::news_router_no_trace(ctx.clone());
        Self { ctx, router }
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        self.send(Method::GET, path, cookie, None).await
    }

    pub async fn post(&self, path: &str, cookie: Option<&str>, form: &[(&str, &str)]) -> TestResponse {
        let body = form
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(Method::POST, path, cookie, Some(body)).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        cookie: Option<&str>,
        form: Option<String>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form)
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let location = header_str(response.headers(), LOCATION);
        let set_cookie = header_str(response.headers(), SET_COOKIE);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            location,
            set_cookie,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    /// Register a user and return it with a logged-in `Cookie` header value
    pub async fn login_as(&self, username: &str) -> (User, String) {
        let user = UserStore::create_user(&self.ctx.store, username, PASSWORD)
            .await
            .unwrap();
        let headers = create_session(&self.ctx.cache, user.id).await.unwrap();
        let set_cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        let cookie = set_cookie.split(';').next().unwrap().to_string();
        (user, cookie)
    }
}

fn header_str(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers.get(name).map(|v| v.to_str().unwrap().to_string())
}

pub async fn fresh_context() -> AppContext {
    let store = DataStore::in_memory().await.unwrap();
    ya_core::init(&store).await.unwrap();
    AppContext::new(store)
}

/// Redirect target for an anonymous visitor of `path`
pub fn login_redirect(path: &str) -> String {
    format!("/auth/login/?next={path}")
}

pub struct NotesFixture {
    pub app: TestApp,
    pub author: User,
    pub author_cookie: String,
    pub reader_cookie: String,
    pub note: Note,
}

/// Notes app with an author, a reader and one note by the author
pub async fn notes_fixture() -> NotesFixture {
    let app = TestApp::notes().await;
    let (author, author_cookie) = app.login_as("Автор").await;
    let (_, reader_cookie) = app.login_as("Читатель").await;
    let note = NoteStore::create_note(
        &app.ctx.store,
        NewNote {
            title: "Заголовок".to_string(),
            text: "Текст".to_string(),
            slug: "note-slug".to_string(),
            author: author.id,
        },
    )
    .await
    .unwrap();

    NotesFixture {
        app,
        author,
        author_cookie,
        reader_cookie,
        note,
    }
}

pub struct NewsFixture {
    pub app: TestApp,
    pub author: User,
    pub author_cookie: String,
    pub reader: User,
    pub reader_cookie: String,
    pub news: News,
    pub comment: Comment,
}

/// News app with one news item and one comment by the author
pub async fn news_fixture() -> NewsFixture {
    let app = TestApp::news().await;
    let (author, author_cookie) = app.login_as("Автор комментария").await;
    let (reader, reader_cookie) = app.login_as("Читатель").await;
    let news = NewsStore::create_news(&app.ctx.store, NewNews::today("Заголовок", "Текст"))
        .await
        .unwrap();
    let comment = CommentStore::create_comment(&app.ctx.store, news.id, author.id, "Текст комментария")
        .await
        .unwrap();

    NewsFixture {
        app,
        author,
        author_cookie,
        reader,
        reader_cookie,
        news,
        comment,
    }
}

/// `count` news items one day apart, newest on 2024-06-01
pub async fn seed_news(store: &DataStore, count: usize) -> Vec<News> {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let items = (0..count)
        .map(|i| NewNews {
            title: format!("Новость {i}"),
            text: "Просто текст.".to_string(),
            date: start - Duration::days(i as i64),
        })
        .collect();
    NewsStore::bulk_create(store, items).await.unwrap()
}
