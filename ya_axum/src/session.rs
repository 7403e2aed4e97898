use axum::{
    RequestPartsExt,
    extract::{FromRequestParts, OptionalFromRequestParts},
    response::{IntoResponse, Response},
};
use axum_extra::{TypedHeader, headers};
use http::{StatusCode, header::LOCATION, request::Parts};

use ya_core::{AppContext, Principal, SESSION_COOKIE_NAME, User, UserId, get_user_from_session};

use crate::config::LOGIN_URL;

/// Rejection for guarded pages: send the visitor to the login page
///
/// Every method is redirected, so an anonymous form submission also lands on
/// the login page and nothing is persisted.
#[derive(Clone, Debug)]
pub struct AuthRedirect {
    next: String,
}

impl AuthRedirect {
    fn new(parts: &Parts) -> Self {
        let next = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/")
            .to_string();
        Self { next }
    }

    pub fn location(&self) -> String {
        login_redirect_url(&self.next)
    }
}

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        let location = self.location();
        tracing::debug!("Redirecting to {}", location);
        (StatusCode::FOUND, [(LOCATION, location)]).into_response()
    }
}

/// `LOGIN_URL?next=<path>` with the path percent-encoded except for `/`
pub fn login_redirect_url(next: &str) -> String {
    // The request path is already percent-encoded
    let decoded = urlencoding::decode(next).map_or_else(|_| next.to_string(), |d| d.into_owned());
    let encoded = urlencoding::encode(&decoded).replace("%2F", "/");
    format!("{}?next={}", LOGIN_URL.as_str(), encoded)
}

/// Logged-in user, available as an axum extractor
///
/// Requires an `AppContext` router state. Extracting `AuthUser` on a page makes
/// the page login-only; use `Option<AuthUser>` for public pages.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
}

impl AuthUser {
    pub fn principal(&self) -> Principal {
        Principal::User(self.id)
    }
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        AuthUser {
            id: user.id,
            username: user.username,
        }
    }
}

/// Principal of an optional user
pub fn principal_of(user: Option<&AuthUser>) -> Principal {
    user.map_or(Principal::Anonymous, AuthUser::principal)
}

impl FromRequestParts<AppContext> for AuthUser {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let redirect = AuthRedirect::new(parts);

        let cookies: TypedHeader<headers::Cookie> = parts.extract().await.map_err(|_| {
            tracing::debug!("No cookies on request");
            redirect.clone()
        })?;

        let session_id = cookies.get(SESSION_COOKIE_NAME.as_str()).ok_or_else(|| {
            tracing::debug!("No session cookie: {:?}", SESSION_COOKIE_NAME.as_str());
            redirect.clone()
        })?;

        let user = get_user_from_session(ctx, session_id).await.map_err(|e| {
            tracing::debug!("Failed to get user from session: {}", e);
            redirect
        })?;

        Ok(AuthUser::from(user))
    }
}

impl OptionalFromRequestParts<AppContext> for AuthUser {
    type Rejection = AuthRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Option<Self>, Self::Rejection> {
        let result: Result<Self, Self::Rejection> =
            <AuthUser as FromRequestParts<AppContext>>::from_request_parts(parts, ctx).await;
        Ok(result.ok())
    }
}
