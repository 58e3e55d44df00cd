//! Message lookup backends.
//!
//! A [`Localizer`] resolves a template identifier to text. The
//! [`crate::message::MessageFormatter`] always holds fallback text, so a
//! localizer answers only for the identifiers it knows and returns `None`
//! for the rest.

use std::collections::HashMap;

use fluent_bundle::FluentValue;

mod fluent;

pub use fluent::{
    CatalogueLayer, FluentLocalizer, FluentLocalizerBuilder, FluentLocalizerError, RenderFailure,
    RenderFailureHook,
};

/// Arguments passed to a lookup: the positional `arg0` and `arg1`, and
/// `file` for messages about a property file.
pub type LocalizationArgs<'value> = HashMap<&'value str, FluentValue<'value>>;

/// Resolves message identifiers to text.
///
/// Processors hold localizers as `Arc<dyn Localizer>`.
pub trait Localizer: Send + Sync {
    /// Text for `id`, or `None` when this localizer has no usable message.
    fn lookup(&self, id: &str, args: Option<&LocalizationArgs<'_>>) -> Option<String>;

    /// Text for `id`, or `fallback` when [`Localizer::lookup`] has none.
    ///
    /// # Examples
    /// ```rust
    /// use optionkit::{LocalizationArgs, Localizer};
    ///
    /// struct Silent;
    ///
    /// impl Localizer for Silent {
    ///     fn lookup(&self, _id: &str, _args: Option<&LocalizationArgs<'_>>) -> Option<String> {
    ///         None
    ///     }
    /// }
    ///
    /// assert_eq!(Silent.message("optionkit-invalid-value", None, "fallback"), "fallback");
    /// ```
    fn message(&self, id: &str, args: Option<&LocalizationArgs<'_>>, fallback: &str) -> String {
        self.lookup(id, args).unwrap_or_else(|| fallback.to_owned())
    }
}

/// Localizer without messages, so every diagnostic uses its fallback text.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpLocalizer;

impl NoOpLocalizer {
    /// The localizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Localizer for NoOpLocalizer {
    fn lookup(&self, _id: &str, _args: Option<&LocalizationArgs<'_>>) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests;
