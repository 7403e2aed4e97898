use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};

use crate::config::DB_TABLE_PREFIX;
use crate::storage::{DataStore, StorageError};
use crate::userdb::{DB_TABLE_USERS, UserId};

use super::types::{Comment, NewNews, News};

pub(crate) static DB_TABLE_NEWS: LazyLock<String> =
    LazyLock::new(|| format!("{}{}", *DB_TABLE_PREFIX, "news"));

pub(crate) static DB_TABLE_COMMENTS: LazyLock<String> =
    LazyLock::new(|| format!("{}{}", *DB_TABLE_PREFIX, "comments"));

async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), StorageError> {
    let news_table = DB_TABLE_NEWS.as_str();
    let comments_table = DB_TABLE_COMMENTS.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {news_table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            date DATE NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {comments_table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            news_id INTEGER NOT NULL REFERENCES {news_table}(id) ON DELETE CASCADE,
            author_id INTEGER NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE,
            text TEXT NOT NULL,
            created TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{comments_table}_news ON {comments_table}(news_id)"
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub struct NewsStore;

impl NewsStore {
    /// Create the news and comment tables
    pub async fn init(store: &DataStore) -> Result<(), StorageError> {
        create_tables_sqlite(store.pool()).await
    }

    pub async fn create_news(store: &DataStore, news: NewNews) -> Result<News, StorageError> {
        let table_name = DB_TABLE_NEWS.as_str();

        let id = sqlx::query(&format!(
            "INSERT INTO {table_name} (title, text, date) VALUES (?, ?, ?)"
        ))
        .bind(&news.title)
        .bind(&news.text)
        .bind(news.date)
        .execute(store.pool())
        .await?
        .last_insert_rowid();

        Ok(News {
            id,
            title: news.title,
            text: news.text,
            date: news.date,
        })
    }

    /// Insert several items in one transaction
    #[tracing::instrument(skip(store, items), fields(count = items.len()))]
    pub async fn bulk_create(
        store: &DataStore,
        items: Vec<NewNews>,
    ) -> Result<Vec<News>, StorageError> {
        let table_name = DB_TABLE_NEWS.as_str();
        let mut tx = store.pool().begin().await?;
        let mut created = Vec::with_capacity(items.len());

        for news in items {
            let id = sqlx::query(&format!(
                "INSERT INTO {table_name} (title, text, date) VALUES (?, ?, ?)"
            ))
            .bind(&news.title)
            .bind(&news.text)
            .bind(news.date)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            created.push(News {
                id,
                title: news.title,
                text: news.text,
                date: news.date,
            });
        }

        tx.commit().await?;
        tracing::info!("Seeded news items");
        Ok(created)
    }

    pub async fn get_news(store: &DataStore, id: i64) -> Result<Option<News>, StorageError> {
        let table_name = DB_TABLE_NEWS.as_str();

        let news = sqlx::query_as::<_, News>(&format!("SELECT * FROM {table_name} WHERE id = ?"))
            .bind(id)
            .fetch_optional(store.pool())
            .await?;

        Ok(news)
    }

    /// The `limit` most recent items, newest first
    pub async fn latest_news(store: &DataStore, limit: usize) -> Result<Vec<News>, StorageError> {
        let table_name = DB_TABLE_NEWS.as_str();

        let news = sqlx::query_as::<_, News>(&format!(
            "SELECT * FROM {table_name} ORDER BY date DESC, id DESC LIMIT ?"
        ))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(store.pool())
        .await?;

        Ok(news)
    }

    pub async fn count(store: &DataStore) -> Result<i64, StorageError> {
        let table_name = DB_TABLE_NEWS.as_str();

        let count = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table_name}"))
            .fetch_one(store.pool())
            .await?;

        Ok(count)
    }
}

pub struct CommentStore;

impl CommentStore {
    pub async fn create_comment(
        store: &DataStore,
        news_id: i64,
        author: UserId,
        text: &str,
    ) -> Result<Comment, StorageError> {
        Self::create_comment_at(store, news_id, author, text, Utc::now()).await
    }

    /// Create a comment with an explicit creation time
    #[tracing::instrument(skip(store, text))]
    pub async fn create_comment_at(
        store: &DataStore,
        news_id: i64,
        author: UserId,
        text: &str,
        created: DateTime<Utc>,
    ) -> Result<Comment, StorageError> {
        let table_name = DB_TABLE_COMMENTS.as_str();

        let id = sqlx::query(&format!(
            "INSERT INTO {table_name} (news_id, author_id, text, created) VALUES (?, ?, ?, ?)"
        ))
        .bind(news_id)
        .bind(author)
        .bind(text)
        .bind(created)
        .execute(store.pool())
        .await?
        .last_insert_rowid();

        tracing::info!(comment_id = id, "Comment created");

        Ok(Comment {
            id,
            news_id,
            author,
            text: text.to_string(),
            created,
        })
    }

    pub async fn get_comment(store: &DataStore, id: i64) -> Result<Option<Comment>, StorageError> {
        let table_name = DB_TABLE_COMMENTS.as_str();

        let comment =
            sqlx::query_as::<_, Comment>(&format!("SELECT * FROM {table_name} WHERE id = ?"))
                .bind(id)
                .fetch_optional(store.pool())
                .await?;

        Ok(comment)
    }

    /// Comments under one news item, oldest first
    pub async fn list_for_news(
        store: &DataStore,
        news_id: i64,
    ) -> Result<Vec<Comment>, StorageError> {
        let table_name = DB_TABLE_COMMENTS.as_str();

        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT * FROM {table_name} WHERE news_id = ? ORDER BY created ASC, id ASC"
        ))
        .bind(news_id)
        .fetch_all(store.pool())
        .await?;

        Ok(comments)
    }

    #[tracing::instrument(skip(store, text))]
    pub async fn update_text(store: &DataStore, id: i64, text: &str) -> Result<(), StorageError> {
        let table_name = DB_TABLE_COMMENTS.as_str();

        sqlx::query(&format!("UPDATE {table_name} SET text = ? WHERE id = ?"))
            .bind(text)
            .bind(id)
            .execute(store.pool())
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(store))]
    pub async fn delete_comment(store: &DataStore, id: i64) -> Result<(), StorageError> {
        let table_name = DB_TABLE_COMMENTS.as_str();

        sqlx::query(&format!("DELETE FROM {table_name} WHERE id = ?"))
            .bind(id)
            .execute(store.pool())
            .await?;

        Ok(())
    }

    pub async fn count(store: &DataStore) -> Result<i64, StorageError> {
        let table_name = DB_TABLE_COMMENTS.as_str();

        let count = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table_name}"))
            .fetch_one(store.pool())
            .await?;

        Ok(count)
    }
}
