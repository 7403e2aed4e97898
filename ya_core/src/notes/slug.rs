//! Slug derivation for notes
//!
//! Titles are mostly Russian, so the slug is produced by transliterating
//! Cyrillic to Latin with the same table pytils uses (`ы → yi`, `й → j`,
//! `щ → sch`, soft and hard signs vanish). That keeps slugs derived here
//! identical to the ones already stored by earlier deployments.

use crate::config::NOTE_SLUG_MAX_LENGTH;

pub const SLUG_WARNING: &str = " - такой slug уже существует, придумайте уникальное значение!";

pub(crate) const INVALID_SLUG: &str =
    "Введите корректный «слаг», состоящий из букв, цифр, знаков подчеркивания или дефисов.";

// Lowercase only: input is lowercased before lookup.
const TRANSLIT: &[(char, &str)] = &[
    ('щ', "sch"),
    ('ё', "yo"),
    ('ж', "zh"),
    ('ц', "ts"),
    ('ч', "ch"),
    ('ш', "sh"),
    ('ы', "yi"),
    ('ю', "yu"),
    ('я', "ya"),
    ('а', "a"),
    ('б', "b"),
    ('в', "v"),
    ('г', "g"),
    ('д', "d"),
    ('е', "e"),
    ('з', "z"),
    ('и', "i"),
    ('й', "j"),
    ('к', "k"),
    ('л', "l"),
    ('м', "m"),
    ('н', "n"),
    ('о', "o"),
    ('п', "p"),
    ('р', "r"),
    ('с', "s"),
    ('т', "t"),
    ('у', "u"),
    ('ф', "f"),
    ('х', "h"),
    ('э', "e"),
    ('ъ', "`"),
    ('ь', "'"),
    ('є', "ye"),
    ('ї', "yi"),
    ('і', "i"),
    ('ґ', "g"),
    ('‘', "'"),
    ('’', "'"),
    ('«', "\""),
    ('»', "\""),
    ('“', "\""),
    ('”', "\""),
    ('–', "-"),
    ('—', "-"),
    ('‒', "-"),
    ('−', "-"),
    ('…', "..."),
    ('№', "#"),
];

fn transliterate(c: char) -> Option<&'static str> {
    TRANSLIT
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Turn a title into a latin, lowercase, hyphenated identifier
///
/// `slugify("Новый заголовок") == "novyij-zagolovok"`. The result is cut to
/// the slug column width.
pub fn slugify(input: &str) -> String {
    let lowered = input
        .to_lowercase()
        .replace("&amp;", " and ")
        .replace('&', " and ");

    // Runs of whitespace and hyphens become a single hyphen
    let mut collapsed = String::with_capacity(lowered.len());
    let mut in_run = false;
    for c in lowered.chars() {
        if c == '-' || c.is_whitespace() {
            if !in_run {
                collapsed.push('-');
            }
            in_run = true;
        } else {
            collapsed.push(c);
            in_run = false;
        }
    }

    let mut translated = String::with_capacity(collapsed.len());
    for c in collapsed.chars() {
        if let Some(latin) = transliterate(c) {
            translated.push_str(latin);
        } else if c.is_ascii_alphanumeric() || matches!(c, '-' | '\'' | '"') {
            translated.push(c);
        }
    }

    translated
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .take(NOTE_SLUG_MAX_LENGTH)
        .collect()
}

/// Letters, digits, underscores and hyphens only
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.chars().count() <= NOTE_SLUG_MAX_LENGTH
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
