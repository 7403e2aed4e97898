use chrono::{Duration, Utc};
use http::header::{COOKIE, HeaderMap};

use crate::AppContext;
use crate::guard::Principal;
use crate::session::config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
use crate::session::errors::SessionError;
use crate::session::types::StoredSession;
use crate::storage::{CacheData, CacheHandle};
use crate::userdb::{User, UserId, UserStore};
use crate::utils::{gen_random_string, header_set_cookie};

const SESSION_PREFIX: &str = "session";

/// Start a session for `user_id` and return the `Set-Cookie` headers for it
pub async fn create_session(
    cache: &CacheHandle,
    user_id: UserId,
) -> Result<HeaderMap, SessionError> {
    let session_id = gen_random_string(32)?;
    let max_age = *SESSION_COOKIE_MAX_AGE;
    let expires_at = Utc::now() + Duration::seconds(max_age as i64);

    let stored_session = StoredSession {
        user_id,
        expires_at,
        ttl: max_age,
    };

    cache
        .lock()
        .await
        .put_with_ttl(
            SESSION_PREFIX,
            &session_id,
            CacheData::try_from(stored_session)?,
            max_age as usize,
        )
        .await?;

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        SESSION_COOKIE_NAME.as_str(),
        &session_id,
        max_age as i64,
    )?;

    tracing::debug!(user_id = %user_id, "Session created");
    Ok(headers)
}

pub(crate) fn get_session_id_from_headers(
    headers: &HeaderMap,
) -> Result<Option<&str>, SessionError> {
    let cookie_name = SESSION_COOKIE_NAME.as_str();

    for cookie_header in headers.get_all(COOKIE) {
        let cookie_str = cookie_header.to_str().map_err(|e| {
            tracing::error!("Invalid cookie header: {}", e);
            SessionError::HeaderError("Invalid cookie header".to_string())
        })?;

        let found = cookie_str.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == cookie_name).then_some(value)
        });

        if found.is_some() {
            return Ok(found);
        }
    }

    tracing::trace!("No session cookie found");
    Ok(None)
}

async fn get_user_id_from_session(
    cache: &CacheHandle,
    session_id: &str,
) -> Result<UserId, SessionError> {
    let cached = cache
        .lock()
        .await
        .get(SESSION_PREFIX, session_id)
        .await?
        .ok_or(SessionError::SessionError)?;

    let stored_session = StoredSession::try_from(cached)?;

    if stored_session.expires_at < Utc::now() {
        tracing::debug!("Session expired at {}", stored_session.expires_at);
        cache.lock().await.remove(SESSION_PREFIX, session_id).await?;
        return Err(SessionError::SessionExpiredError);
    }

    Ok(stored_session.user_id)
}

/// Resolve a session id taken from the session cookie to its user
pub async fn get_user_from_session(
    ctx: &AppContext,
    session_id: &str,
) -> Result<User, SessionError> {
    let user_id = get_user_id_from_session(&ctx.cache, session_id).await?;

    UserStore::get_user(&ctx.store, user_id)
        .await?
        .ok_or(SessionError::SessionError)
}

/// Resolve the request's session cookie to a user
///
/// `Ok(None)` means there is no session cookie at all.
pub async fn load_session_user(
    ctx: &AppContext,
    headers: &HeaderMap,
) -> Result<Option<User>, SessionError> {
    let Some(session_id) = get_session_id_from_headers(headers)? else {
        return Ok(None);
    };

    get_user_from_session(ctx, session_id).await.map(Some)
}

/// The acting principal of a request; any session problem means anonymous
pub async fn principal_from_headers(ctx: &AppContext, headers: &HeaderMap) -> Principal {
    match load_session_user(ctx, headers).await {
        Ok(Some(user)) => Principal::User(user.id),
        Ok(None) => Principal::Anonymous,
        Err(e) => {
            tracing::debug!("Treating request as anonymous: {}", e);
            Principal::Anonymous
        }
    }
}

/// Drop the current session and return headers that expire the cookie
pub async fn prepare_logout_response(
    cache: &CacheHandle,
    headers: &HeaderMap,
) -> Result<HeaderMap, SessionError> {
    if let Some(session_id) = get_session_id_from_headers(headers)? {
        cache.lock().await.remove(SESSION_PREFIX, session_id).await?;
        tracing::debug!("Session removed");
    }

    let mut response_headers = HeaderMap::new();
    header_set_cookie(
        &mut response_headers,
        SESSION_COOKIE_NAME.as_str(),
        "",
        -86400,
    )?;
    Ok(response_headers)
}
