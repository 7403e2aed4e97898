use axum::response::{IntoResponse, Response};
use http::StatusCode;
use ya_core::CoreError;

use crate::config::LOGIN_URL;
use crate::found;

const NOT_FOUND_BODY: &str = "Страница не найдена";

/// Helper trait for converting errors into an error response
pub(crate) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, Response>;
}

/// Map CoreError variants to the response a page should give
///
/// Validation errors only reach this when a handler has no form to re-render.
impl<T> IntoResponseError<T> for Result<T, CoreError> {
    fn into_response_error(self) -> Result<T, Response> {
        self.map_err(|e| match e {
            CoreError::AuthenticationRequired => found(LOGIN_URL.as_str()),
            CoreError::ResourceNotFound { .. } => {
                (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
            }
            CoreError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, errors.to_string()).into_response()
            }
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response(),
        })
    }
}

/// Template rendering failures
impl<T> IntoResponseError<T> for Result<T, askama::Error> {
    fn into_response_error(self) -> Result<T, Response> {
        self.map_err(|e| {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        })
    }
}
