//! Named endpoints and URL reversal

/// Every endpoint of the notes, news and users pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    NotesHome,
    NotesList,
    NotesSuccess,
    NotesAdd,
    NotesDetail,
    NotesEdit,
    NotesDelete,
    NewsHome,
    NewsDetail,
    NewsEdit,
    NewsDelete,
    UsersLogin,
    UsersLogout,
    UsersSignup,
}

const ALL_ROUTES: &[Route] = &[
    Route::NotesHome,
    Route::NotesList,
    Route::NotesSuccess,
    Route::NotesAdd,
    Route::NotesDetail,
    Route::NotesEdit,
    Route::NotesDelete,
    Route::NewsHome,
    Route::NewsDetail,
    Route::NewsEdit,
    Route::NewsDelete,
    Route::UsersLogin,
    Route::UsersLogout,
    Route::UsersSignup,
];

impl Route {
    pub const fn name(self) -> &'static str {
        match self {
            Route::NotesHome => "notes:home",
            Route::NotesList => "notes:list",
            Route::NotesSuccess => "notes:success",
            Route::NotesAdd => "notes:add",
            Route::NotesDetail => "notes:detail",
            Route::NotesEdit => "notes:edit",
            Route::NotesDelete => "notes:delete",
            Route::NewsHome => "news:home",
            Route::NewsDetail => "news:detail",
            Route::NewsEdit => "news:edit",
            Route::NewsDelete => "news:delete",
            Route::UsersLogin => "users:login",
            Route::UsersLogout => "users:logout",
            Route::UsersSignup => "users:signup",
        }
    }

    /// The axum path pattern the endpoint is mounted at
    pub const fn pattern(self) -> &'static str {
        match self {
            Route::NotesHome | Route::NewsHome => "/",
            Route::NotesList => "/notes/",
            Route::NotesSuccess => "/done/",
            Route::NotesAdd => "/add/",
            Route::NotesDetail => "/note/{slug}/",
            Route::NotesEdit => "/edit/{slug}/",
            Route::NotesDelete => "/delete/{slug}/",
            Route::NewsDetail => "/news/{id}/",
            Route::NewsEdit => "/edit_comment/{id}/",
            Route::NewsDelete => "/delete_comment/{id}/",
            Route::UsersLogin => "/auth/login/",
            Route::UsersLogout => "/auth/logout/",
            Route::UsersSignup => "/auth/signup/",
        }
    }

    pub fn from_name(name: &str) -> Option<Route> {
        ALL_ROUTES.iter().copied().find(|route| route.name() == name)
    }

    /// Fill the pattern's placeholders with `args`, in order
    ///
    /// Returns `None` when the number of arguments does not match.
    pub fn path(self, args: &[&str]) -> Option<String> {
        let mut path = String::new();
        let mut args = args.iter();
        let mut rest = self.pattern();

        while let Some(start) = rest.find('{') {
            let end = rest[start..].find('}')? + start;
            path.push_str(&rest[..start]);
            path.push_str(&urlencoding::encode(args.next()?));
            rest = &rest[end + 1..];
        }
        path.push_str(rest);

        match args.next() {
            Some(_) => None,
            None => Some(path),
        }
    }
}

/// Path of the endpoint called `name` (e.g. `"notes:edit"`) with `args`
pub fn reverse(name: &str, args: &[&str]) -> Option<String> {
    Route::from_name(name)?.path(args)
}

pub(crate) fn news_detail_path(news_id: i64) -> String {
    format!("/news/{news_id}/")
}

/// Where a comment form sends the user back to
pub(crate) fn comments_anchor(news_id: i64) -> String {
    format!("{}#comments", news_detail_path(news_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_table() {
        let cases: &[(&str, &[&str], &str)] = &[
            ("notes:home", &[], "/"),
            ("notes:list", &[], "/notes/"),
            ("notes:success", &[], "/done/"),
            ("notes:add", &[], "/add/"),
            ("notes:detail", &["note-slug"], "/note/note-slug/"),
            ("notes:edit", &["note-slug"], "/edit/note-slug/"),
            ("notes:delete", &["note-slug"], "/delete/note-slug/"),
            ("news:home", &[], "/"),
            ("news:detail", &["1"], "/news/1/"),
            ("news:edit", &["2"], "/edit_comment/2/"),
            ("news:delete", &["2"], "/delete_comment/2/"),
            ("users:login", &[], "/auth/login/"),
            ("users:logout", &[], "/auth/logout/"),
            ("users:signup", &[], "/auth/signup/"),
        ];

        for (name, args, expected) in cases {
            assert_eq!(reverse(name, args).as_deref(), Some(*expected), "name={name}");
        }
    }

    #[test]
    fn test_reverse_wrong_arity() {
        assert_eq!(reverse("notes:detail", &[]), None);
        assert_eq!(reverse("notes:list", &["extra"]), None);
    }

    #[test]
    fn test_reverse_unknown_name() {
        assert_eq!(reverse("notes:unknown", &[]), None);
    }

    #[test]
    fn test_every_route_has_unique_name() {
        for route in ALL_ROUTES {
            assert_eq!(Route::from_name(route.name()), Some(*route));
        }
    }

    #[test]
    fn test_comments_anchor() {
        assert_eq!(comments_anchor(3), "/news/3/#comments");
        assert_eq!(
            reverse("news:detail", &["3"]).map(|p| p + "#comments"),
            Some(comments_anchor(3))
        );
    }
}
