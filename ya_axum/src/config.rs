//! Central configuration for the ya_axum crate

use std::sync::LazyLock;

use crate::routes::Route;

/// Where anonymous users are sent for guarded pages
/// Default: "/auth/login/"
pub static LOGIN_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("YA_LOGIN_URL").unwrap_or_else(|_| Route::UsersLogin.pattern().to_string())
});

/// Where a login without a usable `next` lands
/// Default: "/"
pub static LOGIN_REDIRECT_URL: LazyLock<String> =
    LazyLock::new(|| std::env::var("YA_LOGIN_REDIRECT_URL").unwrap_or_else(|_| "/".to_string()));

/// Where note create, edit and delete redirect to
/// Default: "/done/"
pub static NOTES_SUCCESS_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("YA_NOTES_SUCCESS_URL")
        .unwrap_or_else(|_| Route::NotesSuccess.pattern().to_string())
});

#[cfg(test)]
mod tests {
    use super::*;

    // Mirror the initializers so the defaults can be checked without
    // touching the process environment

    fn get_login_url(env_value: Option<&str>) -> String {
        env_value
            .map(|s| s.to_string())
            .unwrap_or_else(|| Route::UsersLogin.pattern().to_string())
    }

    fn get_notes_success_url(env_value: Option<&str>) -> String {
        env_value
            .map(|s| s.to_string())
            .unwrap_or_else(|| Route::NotesSuccess.pattern().to_string())
    }

    #[test]
    fn test_login_url_default() {
        assert_eq!(get_login_url(None), "/auth/login/");
    }

    #[test]
    fn test_login_url_custom() {
        assert_eq!(get_login_url(Some("/accounts/login/")), "/accounts/login/");
    }

    #[test]
    fn test_notes_success_url_default() {
        assert_eq!(get_notes_success_url(None), "/done/");
    }
}
