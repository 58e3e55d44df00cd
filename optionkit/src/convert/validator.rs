//! Semantic checks on converted values.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use super::{ConversionFailure, ErrorCause, FailureKind};
use crate::StringToken;
use crate::message::MessageTemplate;

type CheckFn<T> = Arc<dyn Fn(&T) -> Result<(), Option<ErrorCause>> + Send + Sync>;

/// A check on a converted value with the template reported on rejection.
pub struct Validator<T> {
    check: CheckFn<T>,
    template: MessageTemplate,
}

impl<T: 'static> Validator<T> {
    /// Validator that accepts values for which `predicate` holds.
    #[must_use]
    pub fn new<P>(template: MessageTemplate, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(move |value: &T| {
                if predicate(value) {
                    Ok(())
                } else {
                    Err(None::<ErrorCause>)
                }
            }),
            template,
        }
    }

    /// Validator whose error becomes the failure's cause.
    #[must_use]
    pub fn try_new<C, E>(template: MessageTemplate, checked: C) -> Self
    where
        C: Fn(&T) -> Result<(), E> + Send + Sync + 'static,
        E: Error + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(move |value: &T| {
                checked(value).map_err(|err| Some(Arc::new(err) as ErrorCause))
            }),
            template,
        }
    }

    /// Template reported on rejection.
    #[must_use]
    pub const fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// Checks `value`, which was converted from `token`.
    ///
    /// # Errors
    ///
    /// Returns a validation [`ConversionFailure`] when the check fails.
    pub fn validate(&self, value: &T, token: &StringToken) -> Result<(), ConversionFailure> {
        (self.check)(value).map_err(|cause| ConversionFailure {
            kind: FailureKind::Validation,
            template: self.template.clone(),
            token: token.clone(),
            cause,
        })
    }

    pub(super) fn in_file(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
            template: self.template.in_file(),
        }
    }
}

impl<T> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
            template: self.template.clone(),
        }
    }
}

impl<T> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("template", &self.template.id())
            .finish_non_exhaustive()
    }
}
