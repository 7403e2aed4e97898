//! Request-level operations of the notes application

use crate::AppContext;
use crate::forms::{FormErrors, NoteForm, NoteFormView, REQUIRED_FIELD};
use crate::guard::{Principal, authorize_owner, require_user};
use crate::listing::own_only;
use crate::notes::slug::INVALID_SLUG;
use crate::notes::{NewNote, Note, NoteStore, SLUG_WARNING, is_valid_slug, slugify};
use crate::storage::DataStore;

use super::errors::CoreError;

/// The notes list page
#[derive(Debug, Clone, PartialEq)]
pub struct NotesListPage {
    pub notes: Vec<Note>,
}

/// The add/edit form page; `note` is set when editing
#[derive(Debug, Clone, PartialEq)]
pub struct NoteFormPage {
    pub note: Option<Note>,
    pub form: NoteFormView,
}

struct ValidNote {
    title: String,
    text: String,
    slug: String,
}

/// Check required fields, then settle the slug and its uniqueness
async fn validate_note_form(
    store: &DataStore,
    form: &NoteForm,
    exclude_id: Option<i64>,
) -> Result<ValidNote, CoreError> {
    let mut errors = form.field_errors();

    let slug = match form.explicit_slug() {
        Some(slug) if is_valid_slug(slug) => Some(slug.to_string()),
        Some(_) => {
            errors.add("slug", INVALID_SLUG);
            None
        }
        None => {
            let derived = slugify(form.title.trim());
            if derived.is_empty() {
                if errors.field("title").is_empty() {
                    errors.add("slug", REQUIRED_FIELD);
                }
                None
            } else {
                Some(derived)
            }
        }
    };

    if let Some(slug) = &slug {
        if NoteStore::slug_exists(store, slug, exclude_id).await? {
            tracing::info!(slug = %slug, "Slug already taken");
            errors.add("slug", format!("{slug}{SLUG_WARNING}"));
        }
    }

    match (errors.into_result(), slug) {
        (Ok(()), Some(slug)) => Ok(ValidNote {
            title: form.title.trim().to_string(),
            text: form.text.trim().to_string(),
            slug,
        }),
        (Ok(()), None) => Err(FormErrors::single("slug", REQUIRED_FIELD).into()),
        (Err(errors), _) => Err(errors.into()),
    }
}

async fn owned_note(ctx: &AppContext, principal: &Principal, slug: &str) -> Result<Note, CoreError> {
    require_user(principal)?;
    let note = NoteStore::get_by_slug(&ctx.store, slug).await?;
    authorize_owner(principal, note, "Note", slug)
}

/// `notes:list`: the principal's own notes, all of them
pub async fn notes_list(ctx: &AppContext, principal: &Principal) -> Result<NotesListPage, CoreError> {
    let author = require_user(principal)?;
    let notes = NoteStore::list_by_author(&ctx.store, author).await?;

    Ok(NotesListPage {
        notes: own_only(principal, notes),
    })
}

/// `notes:success`: only reachable when logged in
pub fn notes_success(principal: &Principal) -> Result<(), CoreError> {
    require_user(principal).map(|_| ())
}

/// `notes:detail`
pub async fn note_detail(
    ctx: &AppContext,
    principal: &Principal,
    slug: &str,
) -> Result<Note, CoreError> {
    owned_note(ctx, principal, slug).await
}

/// `notes:add` (GET): an empty form
pub fn note_add_form(principal: &Principal) -> Result<NoteFormPage, CoreError> {
    require_user(principal)?;
    Ok(NoteFormPage {
        note: None,
        form: NoteFormView::default(),
    })
}

/// `notes:add` (POST)
#[tracing::instrument(skip(ctx, form))]
pub async fn note_create(
    ctx: &AppContext,
    principal: &Principal,
    form: NoteForm,
) -> Result<Note, CoreError> {
    let author = require_user(principal)?;
    let valid = validate_note_form(&ctx.store, &form, None).await?;

    let note = NoteStore::create_note(
        &ctx.store,
        NewNote {
            title: valid.title,
            text: valid.text,
            slug: valid.slug,
            author,
        },
    )
    .await?;

    Ok(note)
}

/// `notes:edit` (GET): the form prefilled with the stored note
pub async fn note_edit_form(
    ctx: &AppContext,
    principal: &Principal,
    slug: &str,
) -> Result<NoteFormPage, CoreError> {
    let note = owned_note(ctx, principal, slug).await?;

    Ok(NoteFormPage {
        form: NoteFormView {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
            errors: FormErrors::new(),
        },
        note: Some(note),
    })
}

/// `notes:edit` (POST)
#[tracing::instrument(skip(ctx, form))]
pub async fn note_update(
    ctx: &AppContext,
    principal: &Principal,
    slug: &str,
    form: NoteForm,
) -> Result<Note, CoreError> {
    let note = owned_note(ctx, principal, slug).await?;
    let valid = validate_note_form(&ctx.store, &form, Some(note.id)).await?;

    NoteStore::update_note(&ctx.store, note.id, &valid.title, &valid.text, &valid.slug).await?;
    tracing::info!(note_id = note.id, "Note updated");

    Ok(Note {
        title: valid.title,
        text: valid.text,
        slug: valid.slug,
        ..note
    })
}

/// `notes:delete` (GET): the note to confirm deletion of
pub async fn note_delete_confirm(
    ctx: &AppContext,
    principal: &Principal,
    slug: &str,
) -> Result<Note, CoreError> {
    owned_note(ctx, principal, slug).await
}

/// `notes:delete` (POST)
#[tracing::instrument(skip(ctx))]
pub async fn note_delete(ctx: &AppContext, principal: &Principal, slug: &str) -> Result<(), CoreError> {
    let note = owned_note(ctx, principal, slug).await?;
    NoteStore::delete_note(&ctx.store, note.id).await?;
    tracing::info!(note_id = note.id, "Note deleted");
    Ok(())
}
