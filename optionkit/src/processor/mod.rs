//! Orchestration of parsing and conversion.
//!
//! [`OptionsProcessor`] ties a [`Catalogue`] to a [`MessageFormatter`] and a
//! [`ParserConfig`]. Parsing recognises options; conversion turns the
//! captured text into typed values, runs validators and merges repeated
//! occurrences. Recognition errors stop the pipeline before conversion, while
//! conversion and validation errors are collected for every option and every
//! array element before being returned together.

use camino::Utf8Path;

use crate::message::MessageFormatter;
use crate::parse::{ParserConfig, RawOptions, parse_args};
use crate::properties;
use crate::{Catalogue, Options, OptionsResult};

mod conversion;

/// Parses and converts options declared in a [`Catalogue`].
///
/// # Examples
///
/// ```rust
/// use optionkit::{Catalogue, OptionSpec, OptionsProcessor, Scope};
/// use optionkit::convert::builtin;
///
/// let verbose = OptionSpec::flag(["--verbose", "-v"])
///     .scope(Scope::new("app"))
///     .build()?;
/// let level = OptionSpec::scalar(["--level"], builtin::integer::<u8>())
///     .scope(Scope::new("app"))
///     .build()?;
/// let catalogue = Catalogue::builder().add(&verbose).add(&level).build()?;
///
/// let options = OptionsProcessor::new(catalogue).process(["-v", "--level=3"])?;
/// assert_eq!(level.value().find(&options), Some(&3));
/// assert!(verbose.value().contained_in(&options));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct OptionsProcessor {
    catalogue: Catalogue,
    formatter: MessageFormatter,
    parser: ParserConfig,
}

impl OptionsProcessor {
    /// Processor for `catalogue` using fallback messages and default parser
    /// behaviour.
    #[must_use]
    pub fn new(catalogue: Catalogue) -> Self {
        Self {
            catalogue,
            formatter: MessageFormatter::default(),
            parser: ParserConfig::default(),
        }
    }

    /// Renders messages through `formatter`.
    #[must_use]
    pub fn with_formatter(mut self, formatter: MessageFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Replaces the parser switches.
    #[must_use]
    pub const fn with_parser_config(mut self, config: ParserConfig) -> Self {
        self.parser = config;
        self
    }

    /// The declared options.
    #[must_use]
    pub const fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Recognises options in `args` without converting them.
    ///
    /// # Errors
    ///
    /// Returns the recognition error described on [`parse_args`].
    pub fn parse<I, S>(&self, args: I) -> OptionsResult<RawOptions>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        parse_args(&self.catalogue, args, self.parser, &self.formatter)
    }

    /// Converts, validates and merges previously parsed options.
    ///
    /// Scalar options keep the occurrence selected by their merge policy; a
    /// failure in a discarded occurrence is not reported. Array options
    /// convert every element of the selected occurrences.
    ///
    /// # Errors
    ///
    /// Returns every conversion and validation error, in the order the
    /// failing options first appeared.
    pub fn convert(&self, raw: &RawOptions) -> OptionsResult<Options> {
        conversion::convert_all(raw, &self.formatter)
    }

    /// Parses then converts `args`.
    ///
    /// # Errors
    ///
    /// Returns the first recognition error if parsing fails, otherwise
    /// conversion and validation errors.
    pub fn process<I, S>(&self, args: I) -> OptionsResult<Options>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw = self.parse(args)?;
        self.convert(&raw)
    }

    /// Recognises the keys of the property file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OptionError::File`] when the file cannot be read and
    /// the first unrecognised key otherwise.
    pub fn parse_property_file(&self, path: impl AsRef<Utf8Path>) -> OptionsResult<RawOptions> {
        let file = path.as_ref();
        let text = properties::read_property_file(file)?;
        self.parse_property_text(file, &text)
    }

    /// Recognises the keys in `text`, reporting them as coming from `path`.
    ///
    /// # Errors
    ///
    /// Returns the first unrecognised key.
    pub fn parse_property_text(&self, path: &Utf8Path, text: &str) -> OptionsResult<RawOptions> {
        let catalogue = self.catalogue.for_property_file(path);
        properties::collect(&catalogue, path, &properties::parse_properties(text), &self.formatter)
    }

    /// Reads, recognises and converts the property file at `path`.
    ///
    /// Keys are long option names without dashes. Messages name the bare key
    /// and the file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OptionError::File`] when the file cannot be read,
    /// otherwise recognition, conversion and validation errors as for
    /// [`Self::process`].
    pub fn process_property_file(&self, path: impl AsRef<Utf8Path>) -> OptionsResult<Options> {
        let raw = self.parse_property_file(path)?;
        self.convert(&raw)
    }
}

#[cfg(test)]
mod tests;
