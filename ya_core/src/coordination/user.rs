//! Account operations: signup, login and logout

use http::HeaderMap;
use serde::Deserialize;

use crate::AppContext;
use crate::forms::{FormErrors, REQUIRED_FIELD};
use crate::session::{create_session, prepare_logout_response};
use crate::userdb::{User, UserError, UserStore};

use super::errors::CoreError;

const NON_FIELD: &str = "__all__";
const INVALID_LOGIN: &str = "Пожалуйста, введите правильные имя пользователя и пароль. Оба поля могут быть чувствительны к регистру.";
const PASSWORD_MISMATCH: &str = "Введенные пароли не совпадают.";
const USERNAME_TAKEN: &str = "Пользователь с таким именем уже существует.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Where to go after a successful login
    #[serde(default)]
    pub next: Option<String>,
}

/// Register an account; the new user still has to log in
#[tracing::instrument(skip(ctx, form), fields(username = %form.username))]
pub async fn signup(ctx: &AppContext, form: SignupForm) -> Result<User, CoreError> {
    let username = form.username.trim();
    let mut errors = FormErrors::new();

    if username.is_empty() {
        errors.add("username", REQUIRED_FIELD);
    }
    if form.password1.is_empty() {
        errors.add("password1", REQUIRED_FIELD);
    }
    if form.password2.is_empty() {
        errors.add("password2", REQUIRED_FIELD);
    } else if form.password1 != form.password2 {
        errors.add("password2", PASSWORD_MISMATCH);
    }
    errors.into_result()?;

    match UserStore::create_user(&ctx.store, username, &form.password1).await {
        Ok(user) => Ok(user),
        Err(UserError::AlreadyExists(_)) => {
            Err(FormErrors::single("username", USERNAME_TAKEN).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Check credentials and start a session
///
/// Returns the user together with the `Set-Cookie` headers of the new session.
#[tracing::instrument(skip(ctx, form), fields(username = %form.username))]
pub async fn login(ctx: &AppContext, form: &LoginForm) -> Result<(User, HeaderMap), CoreError> {
    let username = form.username.trim();
    let mut errors = FormErrors::new();

    if username.is_empty() {
        errors.add("username", REQUIRED_FIELD);
    }
    if form.password.is_empty() {
        errors.add("password", REQUIRED_FIELD);
    }
    errors.into_result()?;

    let user = UserStore::authenticate(&ctx.store, username, &form.password)
        .await?
        .ok_or_else(|| {
            tracing::info!("Login rejected");
            CoreError::Validation(FormErrors::single(NON_FIELD, INVALID_LOGIN))
        })?;

    let headers = create_session(&ctx.cache, user.id).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok((user, headers))
}

/// End the request's session, if any
pub async fn logout(ctx: &AppContext, headers: &HeaderMap) -> Result<HeaderMap, CoreError> {
    Ok(prepare_logout_response(&ctx.cache, headers).await?)
}
