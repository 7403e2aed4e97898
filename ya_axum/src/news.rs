//! Pages of the news application

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use ya_core::{
    AppContext, Comment, CommentForm, CommentFormView, CommentPage, CoreError, News,
    NewsDetailPage, comment_create, comment_delete, comment_delete_confirm, comment_edit_form,
    comment_update, news_detail, news_home,
};

use crate::error::IntoResponseError;
use crate::routes::comments_anchor;
use crate::session::{AuthUser, principal_of};
use crate::{found, render};

#[derive(Template)]
#[template(path = "news/home.html")]
struct HomeTemplate {
    user: Option<AuthUser>,
    news: Vec<News>,
}

#[derive(Template)]
#[template(path = "news/detail.html")]
struct DetailTemplate {
    user: Option<AuthUser>,
    news: News,
    comments: Vec<Comment>,
    form: Option<CommentFormView>,
}

impl DetailTemplate {
    fn new(user: Option<AuthUser>, page: NewsDetailPage) -> Self {
        Self {
            user,
            news: page.news,
            comments: page.comments,
            form: page.form,
        }
    }
}

#[derive(Template)]
#[template(path = "news/edit.html")]
struct EditTemplate {
    user: Option<AuthUser>,
    comment: Comment,
    form: CommentFormView,
}

#[derive(Template)]
#[template(path = "news/delete.html")]
struct DeleteTemplate {
    user: Option<AuthUser>,
    comment: Comment,
}

/// Numeric id from the path; anything else names no resource
fn parse_id(resource_type: &str, raw: &str) -> Result<i64, Response> {
    raw.parse::<i64>()
        .map_err(|_| CoreError::ResourceNotFound {
            resource_type: resource_type.to_string(),
            resource_id: raw.to_string(),
        })
        .into_response_error()
}

pub(crate) async fn home(
    State(ctx): State<AppContext>,
    user: Option<AuthUser>,
) -> Result<Response, Response> {
    let page = news_home(&ctx).await.into_response_error()?;
    render(HomeTemplate {
        user,
        news: page.news,
    })
}

pub(crate) async fn detail(
    State(ctx): State<AppContext>,
    user: Option<AuthUser>,
    Path(news_id): Path<String>,
) -> Result<Response, Response> {
    let news_id = parse_id("News", &news_id)?;
    let page = news_detail(&ctx, &principal_of(user.as_ref()), news_id)
        .await
        .into_response_error()?;

    render(DetailTemplate::new(user, page))
}

/// Post a comment; a rejected comment re-renders the news page
pub(crate) async fn comment(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(news_id): Path<String>,
    Form(form): Form<CommentForm>,
) -> Result<Response, Response> {
    let news_id = parse_id("News", &news_id)?;
    let principal = user.principal();

    match comment_create(&ctx, &principal, news_id, form.clone()).await {
        Ok(_) => Ok(found(&comments_anchor(news_id))),
        Err(CoreError::Validation(errors)) => {
            let page = news_detail(&ctx, &principal, news_id)
                .await
                .into_response_error()?;
            let page = NewsDetailPage {
                form: Some(CommentFormView::rejected(&form, errors)),
                ..page
            };
            render(DetailTemplate::new(Some(user), page))
        }
        Err(e) => Err(e).into_response_error(),
    }
}

pub(crate) async fn edit_form(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(comment_id): Path<String>,
) -> Result<Response, Response> {
    let comment_id = parse_id("Comment", &comment_id)?;
    let CommentPage { comment, form } = comment_edit_form(&ctx, &user.principal(), comment_id)
        .await
        .into_response_error()?;

    render(EditTemplate {
        user: Some(user),
        comment,
        form,
    })
}

pub(crate) async fn edit(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(comment_id): Path<String>,
    Form(form): Form<CommentForm>,
) -> Result<Response, Response> {
    let comment_id = parse_id("Comment", &comment_id)?;
    let principal = user.principal();

    match comment_update(&ctx, &principal, comment_id, form.clone()).await {
        Ok(comment) => Ok(found(&comments_anchor(comment.news_id))),
        Err(CoreError::Validation(errors)) => {
            let CommentPage { comment, .. } = comment_edit_form(&ctx, &principal, comment_id)
                .await
                .into_response_error()?;
            render(EditTemplate {
                user: Some(user),
                comment,
                form: CommentFormView::rejected(&form, errors),
            })
        }
        Err(e) => Err(e).into_response_error(),
    }
}

pub(crate) async fn delete_confirm(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(comment_id): Path<String>,
) -> Result<Response, Response> {
    let comment_id = parse_id("Comment", &comment_id)?;
    let CommentPage { comment, .. } = comment_delete_confirm(&ctx, &user.principal(), comment_id)
        .await
        .into_response_error()?;

    render(DeleteTemplate {
        user: Some(user),
        comment,
    })
}

pub(crate) async fn delete(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(comment_id): Path<String>,
) -> Result<Response, Response> {
    let comment_id = parse_id("Comment", &comment_id)?;
    let news_id = comment_delete(&ctx, &user.principal(), comment_id)
        .await
        .into_response_error()?;

    Ok(found(&comments_anchor(news_id)))
}
