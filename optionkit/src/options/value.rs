//! Typed access to values held by [`Options`].

use std::any::{Any, type_name};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::Options;
use crate::{OptionError, OptionIdentifier, OptionsResult};

/// Pairs an identifier with its value type.
///
/// The downcast happens here, when a value is retrieved; the container
/// itself never inspects value types. Obtain one from
/// [`crate::OptionSpec::value`].
pub struct OptionValue<T> {
    id: OptionIdentifier,
    default_value: Option<Arc<T>>,
    marker: PhantomData<fn() -> T>,
}

impl<T> OptionValue<T> {
    pub(crate) const fn new(id: OptionIdentifier, default_value: Option<Arc<T>>) -> Self {
        Self {
            id,
            default_value,
            marker: PhantomData,
        }
    }

    /// Identifier looked up in [`Options`].
    #[must_use]
    pub const fn identifier(&self) -> &OptionIdentifier {
        &self.id
    }

    /// Configured default, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&T> {
        self.default_value.as_deref()
    }

    /// Whether `options` holds a value for this option.
    #[must_use]
    pub fn contained_in(&self, options: &Options) -> bool {
        options.contains(&self.id)
    }
}

impl<T: Any> OptionValue<T> {
    /// The value, if present and of type `T`.
    #[must_use]
    pub fn find<'a>(&self, options: &'a Options) -> Option<&'a T> {
        options
            .get_any(&self.id)
            .and_then(|value| (value as &dyn Any).downcast_ref::<T>())
    }

    /// The value, if present.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::TypeMismatch`] when the stored value is not a
    /// `T`, which means the identifier was declared twice with different
    /// types.
    pub fn try_find<'a>(&self, options: &'a Options) -> OptionsResult<Option<&'a T>> {
        let Some(value) = options.get_any(&self.id) else {
            return Ok(None);
        };
        (value as &dyn Any)
            .downcast_ref::<T>()
            .map(Some)
            .ok_or_else(|| OptionError::TypeMismatch {
                id: self.id.clone(),
                expected: type_name::<T>(),
            })
    }

    /// The value, or the configured default, or `T::default()`.
    #[must_use]
    pub fn get_or_default(&self, options: &Options) -> T
    where
        T: Clone + Default,
    {
        self.find(options)
            .or(self.default_value.as_deref())
            .cloned()
            .unwrap_or_default()
    }
}

impl<T> Clone for OptionValue<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            default_value: self.default_value.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for OptionValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionValue")
            .field("id", &self.id)
            .field("type", &type_name::<T>())
            .finish()
    }
}
