//! Pages of the notes application

use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::Response,
};
use ya_core::{
    AppContext, CoreError, Note, NoteForm, NoteFormPage, NoteFormView, note_add_form,
    note_create, note_delete, note_delete_confirm, note_detail, note_edit_form, note_update,
    notes_list, notes_success,
};

use crate::config::NOTES_SUCCESS_URL;
use crate::error::IntoResponseError;
use crate::{found, render};
use crate::session::AuthUser;

#[derive(Template)]
#[template(path = "notes/home.html")]
struct HomeTemplate {
    user: Option<AuthUser>,
}

#[derive(Template)]
#[template(path = "notes/list.html")]
struct ListTemplate {
    user: Option<AuthUser>,
    notes: Vec<Note>,
}

#[derive(Template)]
#[template(path = "notes/form.html")]
struct FormTemplate {
    user: Option<AuthUser>,
    note: Option<Note>,
    form: NoteFormView,
}

#[derive(Template)]
#[template(path = "notes/detail.html")]
struct DetailTemplate {
    user: Option<AuthUser>,
    note: Note,
}

#[derive(Template)]
#[template(path = "notes/delete.html")]
struct DeleteTemplate {
    user: Option<AuthUser>,
    note: Note,
}

#[derive(Template)]
#[template(path = "notes/success.html")]
struct SuccessTemplate {
    user: Option<AuthUser>,
}

fn form_page(user: AuthUser, page: NoteFormPage) -> Result<Response, Response> {
    render(FormTemplate {
        user: Some(user),
        note: page.note,
        form: page.form,
    })
}

/// Re-render the form with the errors, or redirect to the success page
fn saved_or_rejected(
    user: AuthUser,
    note: Option<Note>,
    form: &NoteForm,
    result: Result<Note, CoreError>,
) -> Result<Response, Response> {
    match result {
        Ok(_) => Ok(found(NOTES_SUCCESS_URL.as_str())),
        Err(CoreError::Validation(errors)) => form_page(
            user,
            NoteFormPage {
                note,
                form: NoteFormView::rejected(form, errors),
            },
        ),
        Err(e) => Err(e).into_response_error(),
    }
}

pub(crate) async fn home(user: Option<AuthUser>) -> Result<Response, Response> {
    render(HomeTemplate { user })
}

pub(crate) async fn list(
    State(ctx): State<AppContext>,
    user: AuthUser,
) -> Result<Response, Response> {
    let page = notes_list(&ctx, &user.principal())
        .await
        .into_response_error()?;

    render(ListTemplate {
        user: Some(user),
        notes: page.notes,
    })
}

pub(crate) async fn success(user: AuthUser) -> Result<Response, Response> {
    notes_success(&user.principal()).into_response_error()?;
    render(SuccessTemplate { user: Some(user) })
}

pub(crate) async fn add_form(user: AuthUser) -> Result<Response, Response> {
    let page = note_add_form(&user.principal()).into_response_error()?;
    form_page(user, page)
}

pub(crate) async fn add(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Form(form): Form<NoteForm>,
) -> Result<Response, Response> {
    let result = note_create(&ctx, &user.principal(), form.clone()).await;
    saved_or_rejected(user, None, &form, result)
}

pub(crate) async fn detail(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> Result<Response, Response> {
    let note = note_detail(&ctx, &user.principal(), &slug)
        .await
        .into_response_error()?;

    render(DetailTemplate {
        user: Some(user),
        note,
    })
}

pub(crate) async fn edit_form(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> Result<Response, Response> {
    let page = note_edit_form(&ctx, &user.principal(), &slug)
        .await
        .into_response_error()?;
    form_page(user, page)
}

pub(crate) async fn edit(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(slug): Path<String>,
    Form(form): Form<NoteForm>,
) -> Result<Response, Response> {
    let result = note_update(&ctx, &user.principal(), &slug, form.clone()).await;

    // The stored note is only needed to title a re-rendered form
    let note = match &result {
        Err(CoreError::Validation(_)) => note_detail(&ctx, &user.principal(), &slug).await.ok(),
        _ => None,
    };
    saved_or_rejected(user, note, &form, result)
}

pub(crate) async fn delete_confirm(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> Result<Response, Response> {
    let note = note_delete_confirm(&ctx, &user.principal(), &slug)
        .await
        .into_response_error()?;

    render(DeleteTemplate {
        user: Some(user),
        note,
    })
}

pub(crate) async fn delete(
    State(ctx): State<AppContext>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> Result<Response, Response> {
    note_delete(&ctx, &user.principal(), &slug)
        .await
        .into_response_error()?;

    Ok(found(NOTES_SUCCESS_URL.as_str()))
}
