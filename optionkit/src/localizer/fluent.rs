//! Fluent catalogues layered over the engine's embedded messages.
//!
//! A [`FluentLocalizer`] searches the application's messages first and the
//! embedded `en-US` catalogue second. A message that exists but fails to
//! render is reported through a [`RenderFailureHook`] and the search moves
//! on, so a broken override still ends in readable text.

use std::fmt;
use std::sync::Arc;

use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentError, FluentResource};
use fluent_syntax::parser::ParserError;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

use super::{LocalizationArgs, Localizer};

const EMBEDDED_EN_US: &str = include_str!("../../locales/en-US/messages.ftl");

/// The engine's messages for `locale`. Every English locale shares the
/// `en-US` catalogue.
fn embedded_messages(locale: &LanguageIdentifier) -> Option<&'static str> {
    (locale.language.as_str() == "en").then_some(EMBEDDED_EN_US)
}

/// Where a Fluent message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogueLayer {
    /// Messages added with [`FluentLocalizerBuilder::messages`].
    Application,
    /// The catalogue embedded in the engine.
    Embedded,
}

/// A message that was found but could not be rendered, typically because it
/// refers to a variable the engine does not pass.
#[derive(Debug)]
pub struct RenderFailure<'a> {
    /// Identifier that was looked up.
    pub id: &'a str,
    /// Catalogue holding the broken message.
    pub layer: CatalogueLayer,
    /// Errors reported by Fluent.
    pub errors: &'a [FluentError],
}

/// Called for every [`RenderFailure`].
pub type RenderFailureHook = Arc<dyn Fn(&RenderFailure<'_>) + Send + Sync>;

/// Errors raised while building a [`FluentLocalizer`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FluentLocalizerError {
    /// The engine embeds no messages for the locale.
    #[error("no embedded option messages exist for locale {0}")]
    UnsupportedLocale(LanguageIdentifier),

    /// A catalogue is not valid Fluent syntax.
    #[error("{layer:?} messages contain {} syntax error(s)", .errors.len())]
    Syntax {
        /// Catalogue that failed to parse.
        layer: CatalogueLayer,
        /// Parser errors.
        errors: Vec<ParserError>,
    },

    /// A catalogue defines an identifier twice.
    #[error("{layer:?} messages define {} identifier(s) more than once", .errors.len())]
    Duplicate {
        /// Catalogue holding the duplicates.
        layer: CatalogueLayer,
        /// Errors reported while adding the messages.
        errors: Vec<FluentError>,
    },
}

struct Layer {
    kind: CatalogueLayer,
    bundle: FluentBundle<FluentResource>,
}

impl Layer {
    fn parse(
        kind: CatalogueLayer,
        locale: &LanguageIdentifier,
        sources: Vec<String>,
        isolating: bool,
    ) -> Result<Self, FluentLocalizerError> {
        let mut bundle = FluentBundle::new_concurrent(vec![locale.clone()]);
        bundle.set_use_isolating(isolating);
        for source in sources {
            let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
                FluentLocalizerError::Syntax {
                    layer: kind,
                    errors,
                }
            })?;
            bundle
                .add_resource(resource)
                .map_err(|errors| FluentLocalizerError::Duplicate {
                    layer: kind,
                    errors,
                })?;
        }
        Ok(Self { kind, bundle })
    }

    fn render(
        &self,
        id: &str,
        args: Option<&FluentArgs<'_>>,
        on_failure: &RenderFailureHook,
    ) -> Option<String> {
        let pattern = self.bundle.get_message(id)?.value()?;
        let mut errors = Vec::new();
        let text = self.bundle.format_pattern(pattern, args, &mut errors);
        if errors.is_empty() {
            return Some(text.into_owned());
        }
        on_failure(&RenderFailure {
            id,
            layer: self.kind,
            errors: &errors,
        });
        None
    }
}

/// [`Localizer`] backed by Fluent catalogues.
///
/// Built with [`FluentLocalizer::builder`]; [`FluentLocalizer::embedded`]
/// is the shortcut for the engine's own messages alone.
pub struct FluentLocalizer {
    locale: LanguageIdentifier,
    layers: Vec<Layer>,
    on_failure: RenderFailureHook,
}

impl FluentLocalizer {
    /// Starts a localizer for `locale`.
    ///
    /// # Examples
    /// ```rust
    /// use optionkit::{FluentLocalizer, LocalizationArgs, Localizer, langid};
    ///
    /// let localizer = FluentLocalizer::builder(langid!("en-US"))
    ///     .messages("optionkit-empty-path = { $arg0 } needs a path")
    ///     .try_build()?;
    /// let args = LocalizationArgs::from([("arg0", "--out".into())]);
    /// assert_eq!(
    ///     localizer.lookup("optionkit-empty-path", Some(&args)).as_deref(),
    ///     Some("--out needs a path")
    /// );
    /// # Ok::<(), optionkit::FluentLocalizerError>(())
    /// ```
    #[must_use]
    pub fn builder(locale: LanguageIdentifier) -> FluentLocalizerBuilder {
        FluentLocalizerBuilder {
            locale,
            application: Vec::new(),
            embedded: true,
            isolating: false,
            on_failure: Arc::new(log_render_failure),
        }
    }

    /// The engine's embedded messages for `locale`, without overrides.
    ///
    /// # Errors
    ///
    /// Returns [`FluentLocalizerError::UnsupportedLocale`] when no messages
    /// are embedded for `locale`.
    pub fn embedded(locale: LanguageIdentifier) -> Result<Self, FluentLocalizerError> {
        Self::builder(locale).try_build()
    }

    /// Locale the catalogues were built for.
    #[must_use]
    pub const fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }
}

impl Localizer for FluentLocalizer {
    fn lookup(&self, id: &str, args: Option<&LocalizationArgs<'_>>) -> Option<String> {
        let fluent_args: Option<FluentArgs<'_>> = args.map(|values| {
            values
                .iter()
                .map(|(key, value)| (*key, value.clone()))
                .collect()
        });
        self.layers
            .iter()
            .find_map(|layer| layer.render(id, fluent_args.as_ref(), &self.on_failure))
    }
}

impl fmt::Debug for FluentLocalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluentLocalizer")
            .field("locale", &self.locale)
            .field(
                "layers",
                &self.layers.iter().map(|layer| layer.kind).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

fn log_render_failure(failure: &RenderFailure<'_>) {
    tracing::warn!(
        id = failure.id,
        layer = ?failure.layer,
        errors = ?failure.errors,
        "option message failed to render"
    );
}

/// Configures a [`FluentLocalizer`].
pub struct FluentLocalizerBuilder {
    locale: LanguageIdentifier,
    application: Vec<String>,
    embedded: bool,
    isolating: bool,
    on_failure: RenderFailureHook,
}

impl FluentLocalizerBuilder {
    /// Adds one Fluent resource of application messages. Application
    /// messages take precedence over the embedded ones with the same
    /// identifier.
    #[must_use]
    pub fn messages(mut self, source: impl Into<String>) -> Self {
        self.application.push(source.into());
        self
    }

    /// Leaves the embedded catalogue out, so only application messages are
    /// known.
    #[must_use]
    pub const fn without_embedded(mut self) -> Self {
        self.embedded = false;
        self
    }

    /// Wraps placeables in Unicode isolation marks. Off by default.
    #[must_use]
    pub const fn use_isolating(mut self, enabled: bool) -> Self {
        self.isolating = enabled;
        self
    }

    /// Replaces the default hook, which logs failures with `tracing::warn!`.
    #[must_use]
    pub fn on_render_failure(mut self, hook: RenderFailureHook) -> Self {
        self.on_failure = hook;
        self
    }

    /// Parses every catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`FluentLocalizerError`] when the locale has no embedded
    /// messages or a catalogue is invalid.
    pub fn try_build(self) -> Result<FluentLocalizer, FluentLocalizerError> {
        let embedded = if self.embedded {
            let source = embedded_messages(&self.locale)
                .ok_or_else(|| FluentLocalizerError::UnsupportedLocale(self.locale.clone()))?;
            Some(source)
        } else {
            None
        };
        let mut layers = Vec::with_capacity(2);
        if !self.application.is_empty() {
            layers.push(Layer::parse(
                CatalogueLayer::Application,
                &self.locale,
                self.application,
                self.isolating,
            )?);
        }
        if let Some(source) = embedded {
            layers.push(Layer::parse(
                CatalogueLayer::Embedded,
                &self.locale,
                vec![source.to_owned()],
                self.isolating,
            )?);
        }
        tracing::debug!(locale = %self.locale, layers = layers.len(), "built Fluent localizer");
        Ok(FluentLocalizer {
            locale: self.locale,
            layers,
            on_failure: self.on_failure,
        })
    }
}

impl fmt::Debug for FluentLocalizerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FluentLocalizerBuilder")
            .field("locale", &self.locale)
            .field("application", &self.application.len())
            .field("embedded", &self.embedded)
            .field("isolating", &self.isolating)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use unic_langid::langid;

    #[rstest]
    #[case(langid!("en-US"))]
    #[case(langid!("en-GB"))]
    #[case(langid!("en"))]
    fn english_locales_share_the_embedded_catalogue(#[case] locale: LanguageIdentifier) {
        assert_eq!(embedded_messages(&locale), Some(EMBEDDED_EN_US));
    }

    #[test]
    fn other_locales_have_no_embedded_catalogue() {
        assert!(embedded_messages(&langid!("fr-FR")).is_none());
    }

    #[test]
    fn embedded_catalogue_parses_without_errors() {
        let layer = Layer::parse(
            CatalogueLayer::Embedded,
            &langid!("en-US"),
            vec![EMBEDDED_EN_US.to_owned()],
            false,
        )
        .expect("embedded catalogue");
        assert!(layer.bundle.has_message("optionkit-invalid-value-in-file"));
    }
}
