//! Ready-made converters for common option types.

use std::error::Error;
use std::str::FromStr;

use camino::Utf8PathBuf;
use uncased::UncasedStr;

use super::ValueConverter;
use crate::message::templates;

/// Raw text, unchanged.
#[must_use]
pub fn string() -> ValueConverter<String> {
    ValueConverter::infallible(str::to_owned)
}

/// Any [`FromStr`] number type. The parse error is kept as the cause.
#[must_use]
pub fn integer<T>() -> ValueConverter<T>
where
    T: FromStr + 'static,
    T::Err: Error + Send + Sync + 'static,
{
    ValueConverter::new(templates::INVALID_NUMBER, str::parse::<T>)
}

/// A UTF-8 path. Empty text is rejected.
#[must_use]
pub fn path() -> ValueConverter<Utf8PathBuf> {
    ValueConverter::from_option(templates::EMPTY_PATH, |text: &str| {
        (!text.is_empty()).then(|| Utf8PathBuf::from(text))
    })
}

/// `true` or `false`, ignoring case. Anything else is rejected.
#[must_use]
pub fn boolean() -> ValueConverter<bool> {
    ValueConverter::from_option(templates::INVALID_BOOLEAN, |text: &str| {
        if is_word(text, "true") {
            Some(true)
        } else if is_word(text, "false") {
            Some(false)
        } else {
            None
        }
    })
}

/// `true` when the text is `true` ignoring case, `false` for anything else,
/// including empty text.
#[must_use]
pub fn lenient_boolean() -> ValueConverter<bool> {
    ValueConverter::infallible(|text: &str| is_word(text, "true"))
}

fn is_word(text: &str, word: &str) -> bool {
    UncasedStr::new(text) == UncasedStr::new(word)
}
