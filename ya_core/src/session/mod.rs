mod config;
mod errors;
mod main;
mod types;

pub use config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
pub use errors::SessionError;
pub use main::{
    create_session, get_user_from_session, load_session_user, prepare_logout_response,
    principal_from_headers,
};
