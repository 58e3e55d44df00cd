//! Error types produced while parsing, converting and validating options.

mod aggregate;
mod constructors;
mod types;
mod value;

pub use aggregate::AggregatedErrors;
pub use types::OptionError;
pub use value::{ValueError, ValueErrorKind};

/// Result alias used throughout the engine.
pub type OptionsResult<T> = Result<T, OptionError>;

#[cfg(test)]
mod tests;
