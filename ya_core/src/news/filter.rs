//! Banned-word check for comment text

use crate::forms::FormErrors;

pub const BAD_WORDS: &[&str] = &["редиска", "негодяй"];
pub const WARNING: &str = "Не ругайтесь!";

/// True if any banned word occurs anywhere in `text`, in any letter case
pub fn contains_bad_word(text: &str) -> bool {
    let lowered = text.to_lowercase();
    BAD_WORDS.iter().any(|word| lowered.contains(word))
}

/// Field error on `text` when the comment must be rejected
pub fn check_comment_text(text: &str) -> Result<(), FormErrors> {
    if contains_bad_word(text) {
        tracing::info!("Comment rejected by banned-word filter");
        Err(FormErrors::single("text", WARNING))
    } else {
        Ok(())
    }
}
