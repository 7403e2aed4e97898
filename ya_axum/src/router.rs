//! Routers of the notes and news applications

use axum::{Router, routing::get};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use ya_core::AppContext;

use crate::routes::Route;
use crate::{news, notes, users};

/// Login, logout and signup pages, mounted under `/auth` by both apps
fn users_router() -> Router<AppContext> {
    Router::new()
        .route(
            Route::UsersLogin.pattern(),
            get(users::login_form).post(users::login_submit),
        )
        .route(
            Route::UsersLogout.pattern(),
            get(users::logout_page).post(users::logout_page),
        )
        .route(
            Route::UsersSignup.pattern(),
            get(users::signup_form).post(users::signup_submit),
        )
}

/// The notes application without HTTP tracing
pub fn notes_router_no_trace(ctx: AppContext) -> Router {
    Router::new()
        .route(Route::NotesHome.pattern(), get(notes::home))
        .route(Route::NotesList.pattern(), get(notes::list))
        .route(Route::NotesSuccess.pattern(), get(notes::success))
        .route(
            Route::NotesAdd.pattern(),
            get(notes::add_form).post(notes::add),
        )
        .route(Route::NotesDetail.pattern(), get(notes::detail))
        .route(
            Route::NotesEdit.pattern(),
            get(notes::edit_form).post(notes::edit),
        )
        .route(
            Route::NotesDelete.pattern(),
            get(notes::delete_confirm).post(notes::delete),
        )
        .merge(users_router())
        .with_state(ctx)
}

/// The news application without HTTP tracing
pub fn news_router_no_trace(ctx: AppContext) -> Router {
    Router::new()
        .route(Route::NewsHome.pattern(), get(news::home))
        .route(
            Route::NewsDetail.pattern(),
            get(news::detail).post(news::comment),
        )
        .route(
            Route::NewsEdit.pattern(),
            get(news::edit_form).post(news::edit),
        )
        .route(
            Route::NewsDelete.pattern(),
            get(news::delete_confirm).post(news::delete),
        )
        .merge(users_router())
        .with_state(ctx)
}

/// The notes application with request tracing
pub fn notes_router(ctx: AppContext) -> Router {
    with_trace(notes_router_no_trace(ctx))
}

/// The news application with request tracing
pub fn news_router(ctx: AppContext) -> Router {
    with_trace(news_router_no_trace(ctx))
}

fn with_trace(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(
                DefaultMakeSpan::new()
                    .level(Level::INFO)
                    .include_headers(true),
            )
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}
