use crate::storage::DataStore;
use crate::userdb::{
    errors::UserError,
    password::{hash_password, verify_password},
    types::{User, UserId, UserSearchField},
};

use super::sqlite::*;

pub struct UserStore;

impl UserStore {
    /// Initialize the user database tables
    pub async fn init(store: &DataStore) -> Result<(), UserError> {
        create_tables_sqlite(store.pool()).await
    }

    /// Get a user by their ID
    #[tracing::instrument(skip(store), fields(user_id = %id))]
    pub async fn get_user(store: &DataStore, id: UserId) -> Result<Option<User>, UserError> {
        Self::get_user_by(store, UserSearchField::Id(id)).await
    }

    #[tracing::instrument(skip(store), fields(user_field = %field))]
    pub async fn get_user_by(
        store: &DataStore,
        field: UserSearchField,
    ) -> Result<Option<User>, UserError> {
        let result = get_user_by_field_sqlite(store.pool(), &field).await;

        match &result {
            Ok(Some(_)) => tracing::debug!(found = true, "User lookup completed"),
            Ok(None) => tracing::debug!(found = false, "User lookup completed - not found"),
            Err(e) => tracing::error!(error = %e, "User lookup failed"),
        }

        result
    }

    /// Register a new account; usernames are unique
    #[tracing::instrument(skip(store, password))]
    pub async fn create_user(
        store: &DataStore,
        username: &str,
        password: &str,
    ) -> Result<User, UserError> {
        if Self::get_user_by(store, UserSearchField::Username(username.to_string()))
            .await?
            .is_some()
        {
            tracing::info!("Username already taken");
            return Err(UserError::AlreadyExists(username.to_string()));
        }

        let password_hash = hash_password(password)?;
        let user = insert_user_sqlite(store.pool(), username, &password_hash).await?;

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Look up a user by name and check the password
    ///
    /// Returns `Ok(None)` for an unknown user or a wrong password.
    #[tracing::instrument(skip(store, password))]
    pub async fn authenticate(
        store: &DataStore,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, UserError> {
        let user = Self::get_user_by(store, UserSearchField::Username(username.to_string())).await?;

        Ok(user.filter(|u| verify_password(password, &u.password_hash)))
    }

    pub async fn count(store: &DataStore) -> Result<i64, UserError> {
        count_users_sqlite(store.pool()).await
    }
}
