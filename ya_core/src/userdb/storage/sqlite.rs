use chrono::Utc;
use sqlx::{Pool, Sqlite};

use crate::userdb::{
    errors::UserError,
    types::{User, UserId, UserSearchField},
};

use super::config::DB_TABLE_USERS;

pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn get_user_by_field_sqlite(
    pool: &Pool<Sqlite>,
    field: &UserSearchField,
) -> Result<Option<User>, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let user = match field {
        UserSearchField::Id(id) => {
            sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE id = ?"))
                .bind(id)
                .fetch_optional(pool)
                .await?
        }
        UserSearchField::Username(username) => {
            sqlx::query_as::<_, User>(&format!("SELECT * FROM {table_name} WHERE username = ?"))
                .bind(username)
                .fetch_optional(pool)
                .await?
        }
    };

    Ok(user)
}

pub(super) async fn insert_user_sqlite(
    pool: &Pool<Sqlite>,
    username: &str,
    password_hash: &str,
) -> Result<User, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let id = sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (username, password_hash, created_at)
        VALUES (?, ?, ?)
        "#
    ))
    .bind(username)
    .bind(password_hash)
    .bind(Utc::now())
    .execute(pool)
    .await?
    .last_insert_rowid();

    get_user_by_field_sqlite(pool, &UserSearchField::Id(UserId(id)))
        .await?
        .ok_or(UserError::NotFound)
}

pub(super) async fn count_users_sqlite(pool: &Pool<Sqlite>) -> Result<i64, UserError> {
    let table_name = DB_TABLE_USERS.as_str();

    let count = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table_name}"))
        .fetch_one(pool)
        .await?;

    Ok(count)
}
