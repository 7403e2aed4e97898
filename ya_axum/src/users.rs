//! Login, logout and signup pages shared by both applications

use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use http::{HeaderMap, HeaderValue, StatusCode, header::LOCATION};
use serde::Deserialize;
use ya_core::{AppContext, CoreError, FormErrors, LoginForm, SignupForm, login, logout, signup};

use crate::config::{LOGIN_REDIRECT_URL, LOGIN_URL};
use crate::error::IntoResponseError;
use crate::session::AuthUser;
use crate::{found, render};

#[derive(Template)]
#[template(path = "users/login.html")]
struct LoginTemplate {
    user: Option<AuthUser>,
    username: String,
    next: Option<String>,
    errors: FormErrors,
}

#[derive(Template)]
#[template(path = "users/signup.html")]
struct SignupTemplate {
    user: Option<AuthUser>,
    username: String,
    errors: FormErrors,
}

#[derive(Template)]
#[template(path = "users/logout.html")]
struct LogoutTemplate {
    user: Option<AuthUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NextQuery {
    next: Option<String>,
}

/// Only local absolute paths are followed after login
fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| n.starts_with('/') && !n.starts_with("//") && !n.contains('\\'))
}

pub(crate) async fn login_form(
    user: Option<AuthUser>,
    Query(query): Query<NextQuery>,
) -> Result<Response, Response> {
    render(LoginTemplate {
        user,
        username: String::new(),
        next: query.next,
        errors: FormErrors::new(),
    })
}

pub(crate) async fn login_submit(
    State(ctx): State<AppContext>,
    Form(form): Form<LoginForm>,
) -> Result<Response, Response> {
    match login(&ctx, &form).await {
        Ok((_, mut headers)) => {
            let target = safe_next(form.next.as_deref()).unwrap_or(LOGIN_REDIRECT_URL.as_str());
            let location = HeaderValue::from_str(target).map_err(|_| {
                tracing::error!("Unusable redirect target: {}", target);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            })?;
            headers.insert(LOCATION, location);
            Ok((StatusCode::FOUND, headers).into_response())
        }
        Err(CoreError::Validation(errors)) => render(LoginTemplate {
            user: None,
            username: form.username,
            next: form.next,
            errors,
        }),
        Err(e) => Err(e).into_response_error(),
    }
}

/// End the session; works the same for anonymous visitors
pub(crate) async fn logout_page(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    let response_headers = logout(&ctx, &headers).await.into_response_error()?;
    let page = render(LogoutTemplate { user: None })?;
    Ok((response_headers, page).into_response())
}

pub(crate) async fn signup_form(user: Option<AuthUser>) -> Result<Response, Response> {
    render(SignupTemplate {
        user,
        username: String::new(),
        errors: FormErrors::new(),
    })
}

pub(crate) async fn signup_submit(
    State(ctx): State<AppContext>,
    Form(form): Form<SignupForm>,
) -> Result<Response, Response> {
    let username = form.username.clone();

    match signup(&ctx, form).await {
        Ok(_) => Ok(found(LOGIN_URL.as_str())),
        Err(CoreError::Validation(errors)) => render(SignupTemplate {
            user: None,
            username,
            errors,
        }),
        Err(e) => Err(e).into_response_error(),
    }
}
