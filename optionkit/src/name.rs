//! Command-line option names.
//!
//! An [`OptionName`] stores the bare name only. Whether it is presented as a
//! short (`-x`) or long (`--name`) option follows from its length, so the
//! same value works as a map key, as presentation text, and as a property
//! file key.

use std::fmt;

use thiserror::Error;

const LONG_PREFIX: &str = "--";
const SHORT_PREFIX: &str = "-";

/// Reasons a piece of text cannot become an [`OptionName`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum NameError {
    /// The bare name is empty, or the text consisted only of prefix characters.
    #[error("option name `{text}` has no name after its prefix")]
    Empty {
        /// Text that was rejected.
        text: String,
    },

    /// The text does not start with `-` or `--`.
    #[error("option name `{text}` must start with `-` or `--`")]
    MissingPrefix {
        /// Text that was rejected.
        text: String,
    },

    /// A long prefix was used on a single character, or a short prefix on several.
    #[error("option name `{text}` uses the wrong prefix for its length")]
    PrefixMismatch {
        /// Text that was rejected.
        text: String,
    },

    /// The bare name contains a character that cannot appear in an option name.
    #[error("option name `{text}` contains the invalid character {invalid:?}")]
    InvalidCharacter {
        /// Text that was rejected.
        text: String,
        /// First offending character.
        invalid: char,
    },
}

/// A normalised option name.
///
/// Equality and ordering are lexicographic on the bare name.
///
/// # Examples
///
/// ```rust
/// use optionkit::OptionName;
///
/// let long = OptionName::parse("--verbose")?;
/// let short = OptionName::from_bare("v")?;
/// assert!(long.is_long());
/// assert!(short.is_short());
/// assert_eq!(short.to_string(), "-v");
/// assert_eq!(long.bare(), "verbose");
/// # Ok::<(), optionkit::NameError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionName {
    bare: Box<str>,
}

impl OptionName {
    /// Parses prefixed text such as `--name` or `-n`.
    ///
    /// # Errors
    ///
    /// Returns a [`NameError`] when the prefix is missing or does not match
    /// the length of the bare name, or when the bare name is empty or
    /// malformed.
    pub fn parse(text: &str) -> Result<Self, NameError> {
        let (bare, long) = if let Some(rest) = text.strip_prefix(LONG_PREFIX) {
            (rest, true)
        } else if let Some(rest) = text.strip_prefix(SHORT_PREFIX) {
            (rest, false)
        } else {
            return Err(NameError::MissingPrefix {
                text: text.to_owned(),
            });
        };
        let name = Self::validated(text, bare)?;
        if name.is_long() == long {
            Ok(name)
        } else {
            Err(NameError::PrefixMismatch {
                text: text.to_owned(),
            })
        }
    }

    /// Builds a name from bare text: one character gives a short name,
    /// anything longer a long name.
    ///
    /// # Errors
    ///
    /// Returns a [`NameError`] when `bare` is empty, starts with `-`, or
    /// contains `=` or whitespace.
    pub fn from_bare(bare: &str) -> Result<Self, NameError> {
        Self::validated(bare, bare)
    }

    fn validated(text: &str, bare: &str) -> Result<Self, NameError> {
        if bare.is_empty() || bare.chars().all(|ch| ch == '-') {
            return Err(NameError::Empty {
                text: text.to_owned(),
            });
        }
        let invalid = bare
            .chars()
            .enumerate()
            .find(|&(idx, ch)| ch == '=' || ch.is_whitespace() || (idx == 0 && ch == '-'));
        if let Some((_, ch)) = invalid {
            return Err(NameError::InvalidCharacter {
                text: text.to_owned(),
                invalid: ch,
            });
        }
        Ok(Self { bare: bare.into() })
    }

    /// The name without its prefix.
    #[must_use]
    pub fn bare(&self) -> &str {
        &self.bare
    }

    /// Whether the name is a single character, written as `-x`.
    #[must_use]
    pub fn is_short(&self) -> bool {
        let mut chars = self.bare.chars();
        chars.next().is_some() && chars.next().is_none()
    }

    /// Whether the name is multi-character, written as `--name`.
    #[must_use]
    pub fn is_long(&self) -> bool {
        !self.is_short()
    }

    /// The single character of a short name.
    #[must_use]
    pub fn short_char(&self) -> Option<char> {
        if self.is_short() {
            self.bare.chars().next()
        } else {
            None
        }
    }

    /// The prefix used when presenting this name on a command line.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        if self.is_short() {
            SHORT_PREFIX
        } else {
            LONG_PREFIX
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.bare)
    }
}

impl TryFrom<&str> for OptionName {
    type Error = NameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.starts_with(SHORT_PREFIX) {
            Self::parse(value)
        } else {
            Self::from_bare(value)
        }
    }
}
