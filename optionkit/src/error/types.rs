//! Primary error enum for option processing.

use camino::Utf8PathBuf;
use thiserror::Error;

use super::aggregate::AggregatedErrors;
use super::value::ValueError;
use crate::{OptionIdentifier, OptionName};

/// Errors that can occur while processing options.
///
/// Recognition errors (`UnrecognizedOption` through `NonOptionArguments`)
/// come from the parsing front-end. Conversion and validation errors come
/// from the conversion pass and carry a [`ValueError`]. Each variant displays
/// its rendered message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptionError {
    /// An option that is not in the catalogue.
    #[error("{message}")]
    UnrecognizedOption {
        /// The option as written, or the property key.
        option: String,
        /// Rendered message.
        message: String,
    },

    /// An option that requires a value appeared without one.
    #[error("{message}")]
    MissingArgument {
        /// Name of the option.
        name: OptionName,
        /// The option as presented to the user.
        option: String,
        /// Rendered message.
        message: String,
    },

    /// A flag was given an inline value.
    #[error("{message}")]
    UnexpectedArgument {
        /// Name of the flag.
        name: OptionName,
        /// The flag as written.
        option: String,
        /// The value that was attached.
        value: String,
        /// Rendered message.
        message: String,
    },

    /// An abbreviation or short cluster matched several options.
    #[error("{message}")]
    AmbiguousOption {
        /// The option as written.
        option: String,
        /// Options the text could refer to.
        candidates: Vec<OptionName>,
        /// Rendered message.
        message: String,
    },

    /// Arguments that are not options.
    #[error("{message}")]
    NonOptionArguments {
        /// The arguments, in command-line order.
        arguments: Vec<String>,
        /// Rendered message.
        message: String,
    },

    /// A raw value could not be converted to the option's type.
    #[error(transparent)]
    Conversion(Box<ValueError>),

    /// A converted value was rejected by a validator.
    #[error(transparent)]
    Validation(Box<ValueError>),

    /// A property file could not be read.
    #[error("Failed to read property file '{path}': {source}")]
    File {
        /// Path of the property file.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A stored value does not have the type the caller asked for.
    #[error("option {id} does not hold a value of type {expected}")]
    TypeMismatch {
        /// Identifier whose value was requested.
        id: OptionIdentifier,
        /// Requested type.
        expected: &'static str,
    },

    /// Several errors, in the order their options first appeared.
    #[error("multiple option errors:\n{0}")]
    Aggregate(Box<AggregatedErrors>),
}
