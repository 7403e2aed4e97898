//! Request-level operations of the news application

use crate::AppContext;
use crate::forms::{CommentForm, CommentFormView, FormErrors};
use crate::guard::{Principal, authorize_owner, require_user};
use crate::listing::{comment_thread, home_page};
use crate::news::{Comment, CommentStore, News, NewsStore, check_comment_text};

use super::errors::CoreError;

#[derive(Debug, Clone, PartialEq)]
pub struct HomePage {
    pub news: Vec<News>,
}

/// A news item with its comment thread
///
/// `form` is only present for authenticated principals; anonymous visitors
/// see the thread but get no way to post.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsDetailPage {
    pub news: News,
    pub comments: Vec<Comment>,
    pub form: Option<CommentFormView>,
}

/// Edit or delete-confirm page of a single comment
#[derive(Debug, Clone, PartialEq)]
pub struct CommentPage {
    pub comment: Comment,
    pub form: CommentFormView,
}

fn validate_comment(form: &CommentForm) -> Result<String, CoreError> {
    let mut errors = form.field_errors();
    if let Err(filtered) = check_comment_text(&form.text) {
        errors.merge(filtered);
    }
    errors.into_result()?;
    Ok(form.text.trim().to_string())
}

async fn owned_comment(
    ctx: &AppContext,
    principal: &Principal,
    comment_id: i64,
) -> Result<Comment, CoreError> {
    require_user(principal)?;
    let comment = CommentStore::get_comment(&ctx.store, comment_id).await?;
    authorize_owner(principal, comment, "Comment", &comment_id.to_string())
}

/// `news:home`
pub async fn news_home(ctx: &AppContext) -> Result<HomePage, CoreError> {
    let cap = ctx.news_count_on_home_page;
    let latest = NewsStore::latest_news(&ctx.store, cap).await?;

    Ok(HomePage {
        news: home_page(latest, cap),
    })
}

/// `news:detail` (GET)
pub async fn news_detail(
    ctx: &AppContext,
    principal: &Principal,
    news_id: i64,
) -> Result<NewsDetailPage, CoreError> {
    let news = NewsStore::get_news(&ctx.store, news_id)
        .await?
        .ok_or_else(|| CoreError::not_found("News", news_id))?;
    let comments = CommentStore::list_for_news(&ctx.store, news_id).await?;

    Ok(NewsDetailPage {
        news,
        comments: comment_thread(comments),
        form: principal
            .is_authenticated()
            .then(CommentFormView::default),
    })
}

/// `news:detail` (POST): add a comment to a news item
#[tracing::instrument(skip(ctx, form))]
pub async fn comment_create(
    ctx: &AppContext,
    principal: &Principal,
    news_id: i64,
    form: CommentForm,
) -> Result<Comment, CoreError> {
    let author = require_user(principal)?;
    if NewsStore::get_news(&ctx.store, news_id).await?.is_none() {
        return Err(CoreError::not_found("News", news_id));
    }

    let text = validate_comment(&form)?;
    let comment = CommentStore::create_comment(&ctx.store, news_id, author, &text).await?;

    Ok(comment)
}

/// `news:edit` (GET)
pub async fn comment_edit_form(
    ctx: &AppContext,
    principal: &Principal,
    comment_id: i64,
) -> Result<CommentPage, CoreError> {
    let comment = owned_comment(ctx, principal, comment_id).await?;

    Ok(CommentPage {
        form: CommentFormView {
            text: comment.text.clone(),
            errors: FormErrors::new(),
        },
        comment,
    })
}

/// `news:edit` (POST)
#[tracing::instrument(skip(ctx, form))]
pub async fn comment_update(
    ctx: &AppContext,
    principal: &Principal,
    comment_id: i64,
    form: CommentForm,
) -> Result<Comment, CoreError> {
    let comment = owned_comment(ctx, principal, comment_id).await?;
    let text = validate_comment(&form)?;

    CommentStore::update_text(&ctx.store, comment.id, &text).await?;
    tracing::info!(comment_id, "Comment updated");

    Ok(Comment { text, ..comment })
}

/// `news:delete` (GET)
pub async fn comment_delete_confirm(
    ctx: &AppContext,
    principal: &Principal,
    comment_id: i64,
) -> Result<CommentPage, CoreError> {
    let comment = owned_comment(ctx, principal, comment_id).await?;

    Ok(CommentPage {
        form: CommentFormView {
            text: comment.text.clone(),
            errors: FormErrors::new(),
        },
        comment,
    })
}

/// `news:delete` (POST); returns the news item the comment was under
#[tracing::instrument(skip(ctx))]
pub async fn comment_delete(
    ctx: &AppContext,
    principal: &Principal,
    comment_id: i64,
) -> Result<i64, CoreError> {
    let comment = owned_comment(ctx, principal, comment_id).await?;
    CommentStore::delete_comment(&ctx.store, comment.id).await?;
    tracing::info!(comment_id, "Comment deleted");
    Ok(comment.news_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::{BAD_WORDS, NewNews, WARNING};
    use crate::test_utils::{NewsFixture, news_fixture, seed_news};
    use chrono::{Duration, Utc};

    const COMMENT_TEXT: &str = "Текст комментария";
    const NEW_COMMENT_TEXT: &str = "Обновлённый комментарий";

    fn form(text: &str) -> CommentForm {
        CommentForm {
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_home_page_is_capped() {
        let fx = news_fixture().await;
        seed_news(&fx.ctx.store, fx.ctx.news_count_on_home_page + 1).await;

        let page = news_home(&fx.ctx).await.unwrap();

        assert_eq!(page.news.len(), fx.ctx.news_count_on_home_page);
    }

    #[tokio::test]
    async fn test_home_page_newest_first() {
        let fx = news_fixture().await;
        seed_news(&fx.ctx.store, 5).await;

        let page = news_home(&fx.ctx).await.unwrap();

        let dates: Vec<_> = page.news.iter().map(|n| n.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[tokio::test]
    async fn test_home_page_respects_configured_count() {
        let fx = news_fixture().await;
        let ctx = fx.ctx.clone().with_news_count(3);
        seed_news(&ctx.store, 5).await;

        let page = news_home(&ctx).await.unwrap();

        assert_eq!(page.news.len(), 3);
    }

    #[tokio::test]
    async fn test_comments_order() {
        let fx = news_fixture().await;
        let now = Utc::now();
        for offset in [3i64, 1, 2] {
            CommentStore::create_comment_at(
                &fx.ctx.store,
                fx.news.id,
                fx.author.id,
                &format!("Текст {offset}"),
                now + Duration::days(offset),
            )
            .await
            .unwrap();
        }

        let page = news_detail(&fx.ctx, &Principal::Anonymous, fx.news.id)
            .await
            .unwrap();

        let created: Vec<_> = page.comments.iter().map(|c| c.created).collect();
        let mut sorted = created.clone();
        sorted.sort();
        assert_eq!(created, sorted);
    }

    #[tokio::test]
    async fn test_form_availability() {
        let fx = news_fixture().await;

        // (principal, form shown)
        let cases = [
            (Principal::Anonymous, false),
            (Principal::User(fx.reader.id), true),
        ];

        for (principal, shown) in cases {
            let page = news_detail(&fx.ctx, &principal, fx.news.id).await.unwrap();
            assert_eq!(page.form.is_some(), shown, "principal={principal:?}");
        }
    }

    #[tokio::test]
    async fn test_unknown_news_not_found() {
        let fx = news_fixture().await;
        let result = news_detail(&fx.ctx, &Principal::Anonymous, fx.news.id + 100).await;
        assert!(matches!(result, Err(CoreError::ResourceNotFound { .. })));
    }

    #[tokio::test]
    async fn test_anonymous_user_cant_create_comment() {
        let fx = news_fixture().await;
        let before = CommentStore::count(&fx.ctx.store).await.unwrap();

        let result = comment_create(&fx.ctx, &Principal::Anonymous, fx.news.id, form(COMMENT_TEXT)).await;

        assert!(matches!(result, Err(CoreError::AuthenticationRequired)));
        assert_eq!(CommentStore::count(&fx.ctx.store).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_user_can_create_comment() {
        let fx = news_fixture().await;
        let before = CommentStore::count(&fx.ctx.store).await.unwrap();

        let comment = comment_create(
            &fx.ctx,
            &Principal::User(fx.reader.id),
            fx.news.id,
            form(COMMENT_TEXT),
        )
        .await
        .unwrap();

        assert_eq!(CommentStore::count(&fx.ctx.store).await.unwrap(), before + 1);
        assert_eq!(comment.text, COMMENT_TEXT);
        assert_eq!(comment.news_id, fx.news.id);
        assert_eq!(comment.author, fx.reader.id);
    }

    #[tokio::test]
    async fn test_user_cant_use_bad_words() {
        let fx = news_fixture().await;
        let before = CommentStore::count(&fx.ctx.store).await.unwrap();

        for word in BAD_WORDS {
            let text = format!("Какой-то текст, {word}, еще текст");
            let result =
                comment_create(&fx.ctx, &Principal::User(fx.reader.id), fx.news.id, form(&text)).await;

            match result {
                Err(CoreError::Validation(errors)) => assert_eq!(errors.field("text"), [WARNING]),
                other => panic!("Expected Validation error, got {other:?}"),
            }
        }
        assert_eq!(CommentStore::count(&fx.ctx.store).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_empty_comment_rejected() {
        let fx = news_fixture().await;

        let result = comment_create(&fx.ctx, &Principal::User(fx.reader.id), fx.news.id, form("  ")).await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_comment_on_missing_news() {
        let fx = news_fixture().await;

        let result = comment_create(
            &fx.ctx,
            &Principal::User(fx.reader.id),
            fx.news.id + 100,
            form(COMMENT_TEXT),
        )
        .await;

        assert!(matches!(result, Err(CoreError::ResourceNotFound { .. })));
    }

    #[tokio::test]
    async fn test_author_can_edit_comment() {
        let fx = news_fixture().await;

        comment_update(
            &fx.ctx,
            &Principal::User(fx.author.id),
            fx.comment.id,
            form(NEW_COMMENT_TEXT),
        )
        .await
        .unwrap();

        let stored = CommentStore::get_comment(&fx.ctx.store, fx.comment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.text, NEW_COMMENT_TEXT);
    }

    #[tokio::test]
    async fn test_edit_applies_bad_word_filter() {
        let fx = news_fixture().await;

        let result = comment_update(
            &fx.ctx,
            &Principal::User(fx.author.id),
            fx.comment.id,
            form("Ты РЕДИСКА"),
        )
        .await;

        assert!(matches!(result, Err(CoreError::Validation(_))));
        let stored = CommentStore::get_comment(&fx.ctx.store, fx.comment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.text, fx.comment.text);
    }

    #[tokio::test]
    async fn test_user_cant_edit_comment_of_another_user() {
        let fx = news_fixture().await;

        let result = comment_update(
            &fx.ctx,
            &Principal::User(fx.reader.id),
            fx.comment.id,
            form(NEW_COMMENT_TEXT),
        )
        .await;

        assert!(matches!(result, Err(CoreError::ResourceNotFound { .. })));
        let stored = CommentStore::get_comment(&fx.ctx.store, fx.comment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.text, fx.comment.text);
    }

    #[tokio::test]
    async fn test_author_can_delete_comment() {
        let fx = news_fixture().await;

        let news_id = comment_delete(&fx.ctx, &Principal::User(fx.author.id), fx.comment.id)
            .await
            .unwrap();

        assert_eq!(news_id, fx.news.id);
        assert_eq!(CommentStore::count(&fx.ctx.store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_user_cant_delete_comment_of_another_user() {
        let fx = news_fixture().await;

        let result = comment_delete(&fx.ctx, &Principal::User(fx.reader.id), fx.comment.id).await;

        assert!(matches!(result, Err(CoreError::ResourceNotFound { .. })));
        assert_eq!(CommentStore::count(&fx.ctx.store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_comment_pages_table() {
        let NewsFixture {
            ctx,
            author,
            reader,
            comment,
            ..
        } = news_fixture().await;

        // (principal, expected)
        let cases = [
            (Principal::User(author.id), "ok"),
            (Principal::User(reader.id), "not_found"),
            (Principal::Anonymous, "login"),
        ];

        for (principal, expected) in cases {
            let outcomes = [
                comment_edit_form(&ctx, &principal, comment.id).await.map(|_| ()),
                comment_delete_confirm(&ctx, &principal, comment.id).await.map(|_| ()),
            ];
            for outcome in outcomes {
                let got = match outcome {
                    Ok(()) => "ok",
                    Err(CoreError::ResourceNotFound { .. }) => "not_found",
                    Err(CoreError::AuthenticationRequired) => "login",
                    Err(e) => panic!("unexpected {e}"),
                };
                assert_eq!(got, expected, "principal={principal:?}");
            }
        }
    }

    #[tokio::test]
    async fn test_thread_is_per_news_item() {
        let fx = news_fixture().await;
        let other = NewsStore::create_news(&fx.ctx.store, NewNews::today("Другая", "Текст"))
            .await
            .unwrap();

        let page = news_detail(&fx.ctx, &Principal::Anonymous, other.id).await.unwrap();

        assert!(page.comments.is_empty());
    }
}
