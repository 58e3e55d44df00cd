//! Command-line option processing with typed values and complete error
//! reports.
//!
//! Options are declared as [`OptionSpec`] values and collected into a
//! [`Catalogue`]. An [`OptionsProcessor`] recognises the options in a
//! command line (or the keys of a property file), converts the captured text
//! with each option's converter, runs its validators, and merges repeated
//! occurrences by the option's [`MergePolicy`]. The result is an immutable
//! [`Options`] value read through the typed [`OptionValue`] of each spec.
//!
//! Conversion and validation never stop at the first problem: every failing
//! option and every failing array element is reported, in the order the
//! options first appeared, as one [`OptionError`].
//!
//! ```rust
//! use optionkit::convert::{ArrayConverter, Validator, builtin};
//! use optionkit::message::templates;
//! use optionkit::{Catalogue, OptionSpec, OptionsProcessor, Scope};
//!
//! let positive = Validator::new(templates::VALIDATION_FAILED, |n: &i64| *n > 0);
//! let number = OptionSpec::array(
//!     ["--number", "-n"],
//!     ArrayConverter::delimited(builtin::integer::<i64>().with_validator(positive), ','),
//! )
//! .scope(Scope::new("app"))
//! .build()?;
//! let processor = OptionsProcessor::new(Catalogue::builder().add(&number).build()?);
//!
//! let err = processor
//!     .process(["--number=56,23", "-n", "2,-17,0,56"])
//!     .expect_err("two elements are not positive");
//! let rejected: Vec<_> = err
//!     .errors()
//!     .iter()
//!     .filter_map(|error| error.value_error())
//!     .map(|error| error.token().value().to_owned())
//!     .collect();
//! assert_eq!(rejected, ["-17", "0"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod catalogue;
pub mod convert;
mod error;
mod identifier;
mod localizer;
mod merge;
pub mod message;
mod name;
mod options;
mod parse;
mod processor;
mod properties;
mod spec;
mod token;

pub use catalogue::{Catalogue, CatalogueBuilder};
pub use error::{AggregatedErrors, OptionError, OptionsResult, ValueError, ValueErrorKind};
pub use identifier::OptionIdentifier;
pub use localizer::{
    CatalogueLayer, FluentLocalizer, FluentLocalizerBuilder, FluentLocalizerError,
    LocalizationArgs, Localizer, NoOpLocalizer, RenderFailure, RenderFailureHook,
};
pub use merge::{MergePolicy, merge_arrays, merge_values, selected_occurrences};
pub use name::{NameError, OptionName};
pub use options::{OptionValue, Options};
pub use parse::{Occurrence, ParserConfig, RawOptions, parse_args};
pub use processor::OptionsProcessor;
pub use properties::{PropertyLine, parse_properties, read_property_file};
pub use spec::{AnySpec, OptionSpec, OptionSpecBuilder, Scope, SpecError, ValueArity};
pub use token::{StringToken, TokenError};
pub use unic_langid::langid;
