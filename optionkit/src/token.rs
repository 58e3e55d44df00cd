//! String fragments that remember where they came from.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use thiserror::Error;

/// Raised when a token would not point into its tokenized string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("`{value}` is not a substring of `{tokenized}`")]
pub struct TokenError {
    value: String,
    tokenized: String,
}

/// A value together with the original string it was cut from.
///
/// Error messages use the value to point at the exact failing fragment of a
/// compound raw value (one element of a comma-separated list, say) while
/// still being able to show the whole string the user typed.
///
/// # Examples
///
/// ```rust
/// use optionkit::StringToken;
///
/// let token = StringToken::try_new("2,-17,0", "-17")?;
/// assert_eq!(token.value(), "-17");
/// assert_eq!(token.tokenized_string(), "2,-17,0");
/// assert_eq!(token.offset(), 2);
/// # Ok::<(), optionkit::TokenError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringToken {
    tokenized: Arc<str>,
    value: Arc<str>,
    offset: usize,
}

impl StringToken {
    /// A token spanning the whole of `text`.
    #[must_use]
    pub fn whole(text: impl Into<Arc<str>>) -> Self {
        let tokenized = text.into();
        Self {
            value: Arc::clone(&tokenized),
            tokenized,
            offset: 0,
        }
    }

    /// A token for the first occurrence of `value` inside `tokenized`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] when `value` is not a contiguous substring of
    /// `tokenized`.
    pub fn try_new(tokenized: impl Into<Arc<str>>, value: &str) -> Result<Self, TokenError> {
        let source = tokenized.into();
        let Some(offset) = source.find(value) else {
            return Err(TokenError {
                value: value.to_owned(),
                tokenized: source.to_string(),
            });
        };
        Ok(Self {
            value: Arc::from(value),
            tokenized: source,
            offset,
        })
    }

    /// A token covering the byte `range` of `tokenized`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] when the range is out of bounds or does not
    /// fall on character boundaries.
    pub fn at(tokenized: &Arc<str>, range: Range<usize>) -> Result<Self, TokenError> {
        let start = range.start;
        match tokenized.get(range) {
            Some(value) => Ok(Self {
                value: Arc::from(value),
                tokenized: Arc::clone(tokenized),
                offset: start,
            }),
            None => Err(TokenError {
                value: format!("<bytes {start}..>"),
                tokenized: tokenized.to_string(),
            }),
        }
    }

    /// The fragment being converted.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The original string the fragment was cut from.
    #[must_use]
    pub fn tokenized_string(&self) -> &str {
        &self.tokenized
    }

    /// Byte offset of the value within the tokenized string.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Byte range of the value within the tokenized string.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.value.len()
    }

    /// Whether the value is the entire tokenized string.
    #[must_use]
    pub fn is_whole(&self) -> bool {
        self.offset == 0 && self.value.len() == self.tokenized.len()
    }
}

impl fmt::Display for StringToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::StringToken;
    use std::sync::Arc;

    #[test]
    fn whole_token_spans_input() {
        let token = StringToken::whole("value");
        assert!(token.is_whole());
        assert_eq!(token.range(), 0..5);
    }

    #[test]
    fn rejects_foreign_values() {
        assert!(StringToken::try_new("1,2,3", "4").is_err());
    }

    #[test]
    fn range_tokens_share_their_source() {
        let source: Arc<str> = Arc::from("a,bc,d");
        let token = StringToken::at(&source, 2..4).expect("in bounds");
        assert_eq!(token.value(), "bc");
        assert_eq!(token.tokenized_string(), "a,bc,d");
        assert!(!token.is_whole());
        assert!(StringToken::at(&source, 4..9).is_err());
    }

    #[test]
    fn rejects_ranges_inside_a_character() {
        let source: Arc<str> = Arc::from("é");
        assert!(StringToken::at(&source, 0..1).is_err());
    }
}
