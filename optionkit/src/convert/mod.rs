//! Turning raw option text into typed values.
//!
//! A [`ValueConverter`] parses one [`StringToken`] and then runs its
//! [`Validator`] chain. An [`ArrayConverter`] first cuts the raw value into
//! element tokens with a [`Tokenizer`] and converts each one with an element
//! converter. Converters never render messages: failures carry the
//! [`MessageTemplate`] that the processor later renders for the occurrence
//! that produced them.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::StringToken;
use crate::message::MessageTemplate;
use crate::message::templates;

mod array;
pub mod builtin;
mod validator;

pub use crate::error::ValueErrorKind as FailureKind;
pub use array::{ArrayConverter, ArrayFailures, Tokenizer};
pub use validator::Validator;

/// Lower-level error attached to a failure.
pub type ErrorCause = Arc<dyn Error + Send + Sync>;

type ParseFn<T> = Arc<dyn Fn(&str) -> Result<T, Option<ErrorCause>> + Send + Sync>;

/// An un-rendered conversion or validation failure.
#[derive(Debug, Clone)]
pub struct ConversionFailure {
    /// Conversion or validation.
    pub kind: FailureKind,
    /// Template describing the failure.
    pub template: MessageTemplate,
    /// The fragment that failed.
    pub token: StringToken,
    /// Lower-level error, such as a number format failure.
    pub cause: Option<ErrorCause>,
}

/// Converts option text to `T` and validates the result.
///
/// Builder methods consume and return the converter, and converters are
/// cheap to clone, so partially configured converters can be shared.
///
/// # Examples
///
/// ```rust
/// use optionkit::convert::{Validator, builtin};
/// use optionkit::message::templates;
/// use optionkit::StringToken;
///
/// let positive = builtin::integer::<i64>()
///     .with_validator(Validator::new(templates::VALIDATION_FAILED, |n: &i64| *n > 0));
/// assert_eq!(positive.convert(&StringToken::whole("12")).ok(), Some(12));
/// assert!(positive.convert(&StringToken::whole("-3")).is_err());
/// ```
pub struct ValueConverter<T> {
    parse: ParseFn<T>,
    failure: MessageTemplate,
    validators: Vec<Validator<T>>,
}

impl<T: 'static> ValueConverter<T> {
    /// Converter backed by a fallible parse closure. Parse errors are kept
    /// as the failure's cause.
    #[must_use]
    pub fn new<F, E>(failure: MessageTemplate, parse: F) -> Self
    where
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
        E: Error + Send + Sync + 'static,
    {
        Self {
            parse: Arc::new(move |text: &str| {
                parse(text).map_err(|err| Some(Arc::new(err) as ErrorCause))
            }),
            failure,
            validators: Vec::new(),
        }
    }

    /// Converter whose parse closure rejects values without a cause.
    #[must_use]
    pub fn from_option<F>(failure: MessageTemplate, parse: F) -> Self
    where
        F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    {
        Self {
            parse: Arc::new(move |text: &str| parse(text).ok_or(None::<ErrorCause>)),
            failure,
            validators: Vec::new(),
        }
    }

    /// Converter that accepts every input.
    #[must_use]
    pub fn infallible<F>(parse: F) -> Self
    where
        F: Fn(&str) -> T + Send + Sync + 'static,
    {
        Self::from_option(templates::INVALID_VALUE, move |text| Some(parse(text)))
    }

    /// Replaces the template reported when parsing fails.
    #[must_use]
    pub fn with_failure_template(mut self, template: MessageTemplate) -> Self {
        self.failure = template;
        self
    }

    /// Appends a validator. Validators run in the order they were added.
    #[must_use]
    pub fn with_validator(mut self, validator: Validator<T>) -> Self {
        self.validators.push(validator);
        self
    }

    /// Template reported when parsing fails.
    #[must_use]
    pub const fn failure_template(&self) -> &MessageTemplate {
        &self.failure
    }

    /// Validators in evaluation order.
    #[must_use]
    pub fn validators(&self) -> &[Validator<T>] {
        &self.validators
    }

    /// Parses `token` and runs every validator on the result.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConversionFailure`]: the parse failure, or the
    /// first validator that rejects the value.
    pub fn convert(&self, token: &StringToken) -> Result<T, ConversionFailure> {
        let value = (self.parse)(token.value()).map_err(|cause| ConversionFailure {
            kind: FailureKind::Conversion,
            template: self.failure.clone(),
            token: token.clone(),
            cause,
        })?;
        for validator in &self.validators {
            validator.validate(&value, token)?;
        }
        Ok(value)
    }

    /// The same converter with every template replaced by its
    /// property-file variant.
    #[must_use]
    pub fn in_file(&self) -> Self {
        Self {
            parse: Arc::clone(&self.parse),
            failure: self.failure.in_file(),
            validators: self.validators.iter().map(Validator::in_file).collect(),
        }
    }
}

impl<T> Clone for ValueConverter<T> {
    fn clone(&self) -> Self {
        Self {
            parse: Arc::clone(&self.parse),
            failure: self.failure.clone(),
            validators: self.validators.clone(),
        }
    }
}

impl<T> fmt::Debug for ValueConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueConverter")
            .field("failure", &self.failure.id())
            .field("validators", &self.validators.len())
            .finish_non_exhaustive()
    }
}
