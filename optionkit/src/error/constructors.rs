//! Constructors, aggregation and inspection helpers for `OptionError`.

use std::sync::Arc;

use super::{AggregatedErrors, OptionError, ValueError};

impl OptionError {
    /// Tries to build an [`OptionError`] from an iterator of errors.
    ///
    /// The iterator is consumed eagerly. It returns:
    /// * `None` when no errors are supplied;
    /// * the inner error when a single [`Arc`] is uniquely owned;
    /// * [`Self::Aggregate`] containing that single [`Arc`] when the error is already shared; and
    /// * [`Self::Aggregate`] combining every error for two or more inputs.
    #[must_use]
    pub fn try_aggregate<I, E>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        let mut arcs: Vec<Arc<Self>> = errors.into_iter().map(Into::into).collect();
        if arcs.is_empty() {
            return None;
        }
        Some(if arcs.len() == 1 {
            let last = arcs.pop()?;
            match Arc::try_unwrap(last) {
                Ok(err) => err,
                Err(shared) => Self::Aggregate(Box::new(AggregatedErrors::new(vec![shared]))),
            }
        } else {
            Self::Aggregate(Box::new(AggregatedErrors::new(arcs)))
        })
    }

    /// Build an [`OptionError`] from at least one error, each of which can be
    /// an `OptionError` or an `Arc<OptionError>`.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Use [`OptionError::try_aggregate`] to avoid panicking when the error list may be empty.
    #[must_use]
    #[track_caller]
    pub fn aggregate<I, E>(errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Arc<Self>>,
    {
        Self::try_aggregate(errors).map_or_else(
            || panic!("aggregate requires at least one error"),
            |err| err,
        )
    }

    /// Flattens aggregates into the ordered list of individual errors.
    #[must_use]
    pub fn errors(&self) -> Vec<&Self> {
        match self {
            Self::Aggregate(aggregate) => aggregate.iter().flat_map(Self::errors).collect(),
            other => vec![other],
        }
    }

    /// The first error in report order.
    #[must_use]
    pub fn first(&self) -> &Self {
        match self {
            Self::Aggregate(aggregate) => aggregate.first().map_or(self, Self::first),
            other => other,
        }
    }

    /// The value error carried by conversion and validation failures.
    #[must_use]
    pub fn value_error(&self) -> Option<&ValueError> {
        match self {
            Self::Conversion(error) | Self::Validation(error) => Some(error),
            _ => None,
        }
    }

    /// Rendered advice, if the failure carried any.
    #[must_use]
    pub fn advice(&self) -> Option<&str> {
        self.value_error().and_then(ValueError::advice)
    }

    /// The option text the error refers to, when there is a single one.
    #[must_use]
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::UnrecognizedOption { option, .. }
            | Self::MissingArgument { option, .. }
            | Self::UnexpectedArgument { option, .. }
            | Self::AmbiguousOption { option, .. } => Some(option),
            Self::Conversion(error) | Self::Validation(error) => Some(error.option()),
            _ => None,
        }
    }

    /// Whether the error comes from the recognition front-end rather than
    /// value conversion.
    #[must_use]
    pub const fn is_recognition(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedOption { .. }
                | Self::MissingArgument { .. }
                | Self::UnexpectedArgument { .. }
                | Self::AmbiguousOption { .. }
                | Self::NonOptionArguments { .. }
        )
    }
}

impl From<ValueError> for OptionError {
    fn from(error: ValueError) -> Self {
        match error.kind() {
            super::ValueErrorKind::Conversion => Self::Conversion(Box::new(error)),
            super::ValueErrorKind::Validation => Self::Validation(Box::new(error)),
        }
    }
}
