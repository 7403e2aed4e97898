//! ya_axum - axum pages for the notes and news applications
//!
//! Each application is a single [`Router`](axum::Router) built from an
//! [`AppContext`](ya_core::AppContext). Guarded pages extract [`AuthUser`];
//! anonymous visitors are redirected to the login page with a `next`
//! parameter pointing back at the page they asked for.

mod config;
mod error;
mod news;
mod notes;
mod router;
mod routes;
mod session;
mod users;

use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use http::{StatusCode, header::LOCATION};

pub use config::{LOGIN_REDIRECT_URL, LOGIN_URL, NOTES_SUCCESS_URL};
pub use router::{news_router, news_router_no_trace, notes_router, notes_router_no_trace};
pub use routes::{Route, reverse};
pub use session::{AuthRedirect, AuthUser, login_redirect_url, principal_of};

// Re-export the core entry points so binaries only depend on this crate
pub use ya_core::{AppContext, DataStore, GENERIC_DATA_STORE_URL, init};

fn render<T: Template>(template: T) -> Result<Response, Response> {
    use error::IntoResponseError;

    let html = template.render().into_response_error()?;
    Ok(Html(html).into_response())
}

/// `302 Found` to `location`
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}
