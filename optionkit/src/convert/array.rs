//! Array-valued options: tokenizing a raw value and converting its elements.

use std::ops::Range;
use std::sync::Arc;

use regex::Regex;

use super::{ConversionFailure, ValueConverter};
use crate::StringToken;

/// Every element failure of one raw value, in left-to-right order.
pub type ArrayFailures = Vec<ConversionFailure>;

/// How a raw array value is cut into element tokens.
///
/// Empty elements are kept, so `"1,,2"` split on `,` yields three tokens.
#[derive(Debug, Clone)]
pub enum Tokenizer {
    /// The whole raw value is a single element.
    Whole,
    /// Elements are separated by a character.
    Delimiter(char),
    /// Elements are separated by matches of a regular expression.
    Pattern(Regex),
}

impl Tokenizer {
    /// Cuts `raw` into element tokens that point back into `raw`.
    #[must_use]
    pub fn split(&self, raw: &Arc<str>) -> Vec<StringToken> {
        let separators: Vec<Range<usize>> = match self {
            Self::Whole => Vec::new(),
            Self::Delimiter(delimiter) => raw
                .match_indices(*delimiter)
                .map(|(start, text)| start..start + text.len())
                .collect(),
            Self::Pattern(pattern) => pattern
                .find_iter(raw)
                .filter(|found| !found.is_empty())
                .map(|found| found.range())
                .collect(),
        };

        let mut tokens = Vec::with_capacity(separators.len() + 1);
        let mut start = 0;
        for separator in separators {
            tokens.push(fragment(raw, start..separator.start));
            start = separator.end;
        }
        tokens.push(fragment(raw, start..raw.len()));
        tokens
    }
}

// Ranges come from match positions, so they always fall on boundaries.
fn fragment(raw: &Arc<str>, range: Range<usize>) -> StringToken {
    StringToken::at(raw, range).unwrap_or_else(|_| StringToken::whole(Arc::clone(raw)))
}

/// Converts a raw value into `Vec<E>` element by element.
///
/// A failing element never stops its siblings from being converted; all
/// failures are returned together.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use optionkit::convert::{ArrayConverter, Tokenizer, builtin};
///
/// let numbers = ArrayConverter::new(builtin::integer::<i32>())
///     .with_tokenizer(Tokenizer::Delimiter(','));
/// let raw: Arc<str> = Arc::from("2,x,0,y");
/// let failures = numbers.convert(&raw).unwrap_err();
/// let bad: Vec<_> = failures.iter().map(|f| f.token.value()).collect();
/// assert_eq!(bad, ["x", "y"]);
/// ```
pub struct ArrayConverter<E> {
    element: ValueConverter<E>,
    tokenizer: Tokenizer,
}

impl<E: 'static> ArrayConverter<E> {
    /// Array converter that treats the whole raw value as one element.
    #[must_use]
    pub const fn new(element: ValueConverter<E>) -> Self {
        Self {
            element,
            tokenizer: Tokenizer::Whole,
        }
    }

    /// Array converter splitting on `delimiter`.
    #[must_use]
    pub const fn delimited(element: ValueConverter<E>, delimiter: char) -> Self {
        Self {
            element,
            tokenizer: Tokenizer::Delimiter(delimiter),
        }
    }

    /// Replaces the tokenizer.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Element converter.
    #[must_use]
    pub const fn element(&self) -> &ValueConverter<E> {
        &self.element
    }

    /// Tokenizer.
    #[must_use]
    pub const fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Converts every element of `raw`.
    ///
    /// # Errors
    ///
    /// Returns every element failure, in element order, when at least one
    /// element fails.
    pub fn convert(&self, raw: &Arc<str>) -> Result<Vec<E>, ArrayFailures> {
        let mut values = Vec::new();
        let mut failures = Vec::new();
        for token in self.tokenizer.split(raw) {
            match self.element.convert(&token) {
                Ok(value) => values.push(value),
                Err(failure) => failures.push(failure),
            }
        }
        if failures.is_empty() {
            Ok(values)
        } else {
            Err(failures)
        }
    }

    /// The same converter with property-file templates.
    #[must_use]
    pub fn in_file(&self) -> Self {
        Self {
            element: self.element.in_file(),
            tokenizer: self.tokenizer.clone(),
        }
    }
}

impl<E> Clone for ArrayConverter<E> {
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
            tokenizer: self.tokenizer.clone(),
        }
    }
}

impl<E> std::fmt::Debug for ArrayConverter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArrayConverter")
            .field("element", &self.element)
            .field("tokenizer", &self.tokenizer)
            .finish()
    }
}
