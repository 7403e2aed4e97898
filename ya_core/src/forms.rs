//! Form payloads and field-level validation errors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::NOTE_TITLE_MAX_LENGTH;

pub const REQUIRED_FIELD: &str = "Обязательное поле.";

/// Field name → error messages, the way a rejected form reports back
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages attached to `field`; empty when the field is valid
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn merge(&mut self, other: FormErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Submitted note fields; anything else in the payload is ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl NoteForm {
    /// The explicit slug, if one was actually typed in
    pub fn explicit_slug(&self) -> Option<&str> {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
    }

    pub(crate) fn field_errors(&self) -> FormErrors {
        let mut errors = FormErrors::new();

        if self.title.trim().is_empty() {
            errors.add("title", REQUIRED_FIELD);
        } else if self.title.chars().count() > NOTE_TITLE_MAX_LENGTH {
            errors.add(
                "title",
                format!(
                    "Убедитесь, что это значение содержит не более {NOTE_TITLE_MAX_LENGTH} символов."
                ),
            );
        }

        if self.text.trim().is_empty() {
            errors.add("text", REQUIRED_FIELD);
        }

        errors
    }
}

/// Submitted comment text
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    pub(crate) fn field_errors(&self) -> FormErrors {
        if self.text.trim().is_empty() {
            FormErrors::single("text", REQUIRED_FIELD)
        } else {
            FormErrors::new()
        }
    }
}

/// What a note form page shows: current values plus any errors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteFormView {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub errors: FormErrors,
}

impl NoteFormView {
    pub fn rejected(form: &NoteForm, errors: FormErrors) -> Self {
        Self {
            title: form.title.clone(),
            text: form.text.clone(),
            slug: form.slug.clone().unwrap_or_default(),
            errors,
        }
    }
}

/// What a comment form shows: current text plus any errors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentFormView {
    pub text: String,
    pub errors: FormErrors,
}

impl CommentFormView {
    pub fn rejected(form: &CommentForm, errors: FormErrors) -> Self {
        Self {
            text: form.text.clone(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_errors_add_and_field() {
        let mut errors = FormErrors::new();
        errors.add("slug", "taken");
        errors.add("slug", "too long");

        assert_eq!(errors.field("slug"), ["taken", "too long"]);
        assert!(errors.field("title").is_empty());
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_form_errors_merge() {
        let mut errors = FormErrors::single("title", "a");
        errors.merge(FormErrors::single("title", "b"));
        errors.merge(FormErrors::single("text", "c"));

        assert_eq!(errors.field("title"), ["a", "b"]);
        assert_eq!(errors.field("text"), ["c"]);
    }

    #[test]
    fn test_form_errors_into_result() {
        assert!(FormErrors::new().into_result().is_ok());
        assert!(FormErrors::single("text", "x").into_result().is_err());
    }

    #[test]
    fn test_form_errors_display() {
        let mut errors = FormErrors::new();
        errors.add("text", "Не ругайтесь!");
        errors.add("slug", "taken");

        assert_eq!(errors.to_string(), "slug: taken; text: Не ругайтесь!");
    }

    #[test]
    fn test_note_form_required_fields() {
        let form = NoteForm::default();

        let errors = form.field_errors();

        assert_eq!(errors.field("title"), [REQUIRED_FIELD]);
        assert_eq!(errors.field("text"), [REQUIRED_FIELD]);
        assert!(errors.field("slug").is_empty());
    }

    #[test]
    fn test_note_form_title_too_long() {
        let form = NoteForm {
            title: "я".repeat(NOTE_TITLE_MAX_LENGTH + 1),
            text: "Текст".to_string(),
            slug: None,
        };

        let errors = form.field_errors();

        assert_eq!(errors.field("title").len(), 1);
        assert!(errors.field("text").is_empty());
    }

    #[test]
    fn test_note_form_title_at_limit_is_valid() {
        let form = NoteForm {
            title: "я".repeat(NOTE_TITLE_MAX_LENGTH),
            text: "Текст".to_string(),
            slug: None,
        };

        assert!(form.field_errors().is_empty());
    }

    #[test]
    fn test_explicit_slug() {
        let mut form = NoteForm {
            slug: Some("  ".to_string()),
            ..NoteForm::default()
        };
        assert_eq!(form.explicit_slug(), None);

        form.slug = Some(" new-slug ".to_string());
        assert_eq!(form.explicit_slug(), Some("new-slug"));

        form.slug = None;
        assert_eq!(form.explicit_slug(), None);
    }

    #[test]
    fn test_comment_form_required() {
        assert_eq!(
            CommentForm::default().field_errors().field("text"),
            [REQUIRED_FIELD]
        );
        let form = CommentForm {
            text: "Текст".to_string(),
        };
        assert!(form.field_errors().is_empty());
    }

    #[test]
    fn test_note_form_ignores_unknown_fields() {
        let form: NoteForm = serde_json::from_value(serde_json::json!({
            "author": "Автор",
            "title": "Заголовок",
            "text": "Текст",
            "slug": "slug",
        }))
        .unwrap();

        assert_eq!(form.title, "Заголовок");
        assert_eq!(form.explicit_slug(), Some("slug"));
    }
}
