use std::sync::LazyLock;

use sqlx::{Pool, Sqlite};

use crate::config::DB_TABLE_PREFIX;
use crate::storage::{DataStore, StorageError};
use crate::userdb::{DB_TABLE_USERS, UserId};

use super::types::{NewNote, Note};

/// Notes table name
pub(crate) static DB_TABLE_NOTES: LazyLock<String> =
    LazyLock::new(|| format!("{}{}", *DB_TABLE_PREFIX, "notes"));

async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), StorageError> {
    let table_name = DB_TABLE_NOTES.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            text TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            author_id INTEGER NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{table_name}_author ON {table_name}(author_id)"
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub struct NoteStore;

impl NoteStore {
    pub async fn init(store: &DataStore) -> Result<(), StorageError> {
        create_tables_sqlite(store.pool()).await
    }

    #[tracing::instrument(skip(store, note), fields(slug = %note.slug, author = %note.author))]
    pub async fn create_note(store: &DataStore, note: NewNote) -> Result<Note, StorageError> {
        let table_name = DB_TABLE_NOTES.as_str();

        let id = sqlx::query(&format!(
            "INSERT INTO {table_name} (title, text, slug, author_id) VALUES (?, ?, ?, ?)"
        ))
        .bind(&note.title)
        .bind(&note.text)
        .bind(&note.slug)
        .bind(note.author)
        .execute(store.pool())
        .await?
        .last_insert_rowid();

        tracing::info!(note_id = id, "Note created");

        Ok(Note {
            id,
            title: note.title,
            text: note.text,
            slug: note.slug,
            author: note.author,
        })
    }

    pub async fn get_by_slug(store: &DataStore, slug: &str) -> Result<Option<Note>, StorageError> {
        let table_name = DB_TABLE_NOTES.as_str();

        let note = sqlx::query_as::<_, Note>(&format!("SELECT * FROM {table_name} WHERE slug = ?"))
            .bind(slug)
            .fetch_optional(store.pool())
            .await?;

        Ok(note)
    }

    /// Whether `slug` is taken by any note other than `exclude_id`
    pub async fn slug_exists(
        store: &DataStore,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, StorageError> {
        let table_name = DB_TABLE_NOTES.as_str();

        let count: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {table_name} WHERE slug = ? AND id IS NOT ?"
        ))
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(store.pool())
        .await?;

        Ok(count > 0)
    }

    pub async fn list_by_author(
        store: &DataStore,
        author: UserId,
    ) -> Result<Vec<Note>, StorageError> {
        let table_name = DB_TABLE_NOTES.as_str();

        let notes = sqlx::query_as::<_, Note>(&format!(
            "SELECT * FROM {table_name} WHERE author_id = ? ORDER BY id ASC"
        ))
        .bind(author)
        .fetch_all(store.pool())
        .await?;

        Ok(notes)
    }

    #[tracing::instrument(skip(store, title, text))]
    pub async fn update_note(
        store: &DataStore,
        id: i64,
        title: &str,
        text: &str,
        slug: &str,
    ) -> Result<(), StorageError> {
        let table_name = DB_TABLE_NOTES.as_str();

        sqlx::query(&format!(
            "UPDATE {table_name} SET title = ?, text = ?, slug = ? WHERE id = ?"
        ))
        .bind(title)
        .bind(text)
        .bind(slug)
        .bind(id)
        .execute(store.pool())
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(store))]
    pub async fn delete_note(store: &DataStore, id: i64) -> Result<(), StorageError> {
        let table_name = DB_TABLE_NOTES.as_str();

        sqlx::query(&format!("DELETE FROM {table_name} WHERE id = ?"))
            .bind(id)
            .execute(store.pool())
            .await?;

        Ok(())
    }

    pub async fn count(store: &DataStore) -> Result<i64, StorageError> {
        let table_name = DB_TABLE_NOTES.as_str();

        let count = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table_name}"))
            .fetch_one(store.pool())
            .await?;

        Ok(count)
    }
}
