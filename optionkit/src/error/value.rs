//! Structured failure of a single option value.

use std::error::Error;
use std::fmt;

use crate::convert::ErrorCause;
use crate::{OptionName, StringToken};

/// Whether a value failed conversion or validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueErrorKind {
    /// The raw text could not become the option's type.
    Conversion,
    /// The converted value was rejected by a validator.
    Validation,
}

/// A failed option value, rendered for one occurrence.
///
/// Test harnesses can assert on the message, the option and the failing
/// fragment independently of how the message is worded.
#[derive(Debug, Clone)]
pub struct ValueError {
    pub(crate) kind: ValueErrorKind,
    pub(crate) option: String,
    pub(crate) name: OptionName,
    pub(crate) token: StringToken,
    pub(crate) message: String,
    pub(crate) advice: Option<String>,
    pub(crate) cause: Option<ErrorCause>,
}

impl ValueError {
    /// Conversion or validation.
    #[must_use]
    pub const fn kind(&self) -> ValueErrorKind {
        self.kind
    }

    /// The option as presented in the message (`-n`, `--number`, or a
    /// bare property key).
    #[must_use]
    pub fn option(&self) -> &str {
        &self.option
    }

    /// Name of the failing occurrence.
    #[must_use]
    pub const fn name(&self) -> &OptionName {
        &self.name
    }

    /// The failing fragment and the raw value it came from.
    #[must_use]
    pub const fn token(&self) -> &StringToken {
        &self.token
    }

    /// Rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Rendered advice, when the template carried any.
    #[must_use]
    pub fn advice(&self) -> Option<&str> {
        self.advice.as_deref()
    }

    /// Lower-level failure, such as a number format error.
    #[must_use]
    pub fn cause(&self) -> Option<&ErrorCause> {
        self.cause.as_ref()
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ValueError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.as_ref() as &(dyn Error + 'static))
    }
}
