//! Message templates used by the engine itself.
//!
//! Each command-line template has a property-file counterpart whose
//! identifier carries the [`FILE_SUFFIX`]. Templates supplied by callers get
//! a derived counterpart instead.

use std::borrow::Cow;

use super::{ArgumentOrder, MessageTemplate};

/// Suffix appended to identifiers of property-file templates.
pub const FILE_SUFFIX: &str = "-in-file";

/// An option that is not in the catalogue.
pub const UNRECOGNIZED_OPTION: MessageTemplate = MessageTemplate::new(
    "optionkit-unrecognized-option",
    "Unrecognized option: {0}",
    ArgumentOrder::NameOnly,
);

/// A property key that is not in the catalogue.
pub const UNRECOGNIZED_PROPERTY: MessageTemplate = MessageTemplate::new(
    "optionkit-unrecognized-option-in-file",
    "Unrecognized property '{0}' in file '{file}'",
    ArgumentOrder::NameOnly,
);

/// An option that requires a value appeared without one.
pub const MISSING_ARGUMENT: MessageTemplate = MessageTemplate::new(
    "optionkit-missing-argument",
    "Option {0} requires an argument",
    ArgumentOrder::NameOnly,
);

/// Property-file counterpart of [`MISSING_ARGUMENT`].
pub const MISSING_ARGUMENT_IN_FILE: MessageTemplate = MessageTemplate::new(
    "optionkit-missing-argument-in-file",
    "Property '{0}' in file '{file}' requires a value",
    ArgumentOrder::NameOnly,
);

/// A flag was given an inline value.
pub const UNEXPECTED_ARGUMENT: MessageTemplate = MessageTemplate::new(
    "optionkit-unexpected-argument",
    "Option {0} does not take an argument, but was given '{1}'",
    ArgumentOrder::NameThenValue,
);

/// An abbreviation or short cluster that matches several options.
pub const AMBIGUOUS_OPTION: MessageTemplate = MessageTemplate::new(
    "optionkit-ambiguous-option",
    "Option {0} is ambiguous; it may mean any of: {1}",
    ArgumentOrder::NameThenValue,
);

/// Arguments that are not options. `{0}` is the count, `{1}` the list.
pub const NON_OPTION_ARGUMENTS: MessageTemplate = MessageTemplate::new(
    "optionkit-non-option-arguments",
    "{0} non-option arguments: {1}",
    ArgumentOrder::ValueThenName,
);

/// A raw value that the converter rejected.
pub const INVALID_VALUE: MessageTemplate = MessageTemplate::new(
    "optionkit-invalid-value",
    "Invalid value '{0}' of option {1}",
    ArgumentOrder::ValueThenName,
);

/// Property-file counterpart of [`INVALID_VALUE`].
pub const INVALID_VALUE_IN_FILE: MessageTemplate = MessageTemplate::new(
    "optionkit-invalid-value-in-file",
    "Invalid value '{0}' of property '{1}' in file '{file}'",
    ArgumentOrder::ValueThenName,
);

/// A raw value that is not a number of the expected type.
pub const INVALID_NUMBER: MessageTemplate = MessageTemplate::new(
    "optionkit-invalid-number",
    "Option {1} expects a number, but was given '{0}'",
    ArgumentOrder::ValueThenName,
);

/// Property-file counterpart of [`INVALID_NUMBER`].
pub const INVALID_NUMBER_IN_FILE: MessageTemplate = MessageTemplate::new(
    "optionkit-invalid-number-in-file",
    "Property '{1}' in file '{file}' expects a number, but was given '{0}'",
    ArgumentOrder::ValueThenName,
);

/// A raw value that is not `true` or `false`.
pub const INVALID_BOOLEAN: MessageTemplate = MessageTemplate::new(
    "optionkit-invalid-boolean",
    "Option {1} expects 'true' or 'false', but was given '{0}'",
    ArgumentOrder::ValueThenName,
);

/// Property-file counterpart of [`INVALID_BOOLEAN`].
pub const INVALID_BOOLEAN_IN_FILE: MessageTemplate = MessageTemplate::new(
    "optionkit-invalid-boolean-in-file",
    "Property '{1}' in file '{file}' expects 'true' or 'false', but was given '{0}'",
    ArgumentOrder::ValueThenName,
);

/// An empty path.
pub const EMPTY_PATH: MessageTemplate = MessageTemplate::new(
    "optionkit-empty-path",
    "Option {0} requires a non-empty path",
    ArgumentOrder::NameOnly,
);

/// Property-file counterpart of [`EMPTY_PATH`].
pub const EMPTY_PATH_IN_FILE: MessageTemplate = MessageTemplate::new(
    "optionkit-empty-path-in-file",
    "Property '{0}' in file '{file}' requires a non-empty path",
    ArgumentOrder::NameOnly,
);

/// A converted value that a validator rejected.
pub const VALIDATION_FAILED: MessageTemplate = MessageTemplate::new(
    "optionkit-validation-failed",
    "Value '{0}' of option {1} is not valid",
    ArgumentOrder::ValueThenName,
);

/// Property-file counterpart of [`VALIDATION_FAILED`].
pub const VALIDATION_FAILED_IN_FILE: MessageTemplate = MessageTemplate::new(
    "optionkit-validation-failed-in-file",
    "Value '{0}' of property '{1}' in file '{file}' is not valid",
    ArgumentOrder::ValueThenName,
);

pub(super) fn file_variant(template: &MessageTemplate) -> MessageTemplate {
    if template.is_file_scoped() {
        return template.clone();
    }
    let known = [
        (UNRECOGNIZED_OPTION, UNRECOGNIZED_PROPERTY),
        (MISSING_ARGUMENT, MISSING_ARGUMENT_IN_FILE),
        (INVALID_VALUE, INVALID_VALUE_IN_FILE),
        (INVALID_NUMBER, INVALID_NUMBER_IN_FILE),
        (INVALID_BOOLEAN, INVALID_BOOLEAN_IN_FILE),
        (EMPTY_PATH, EMPTY_PATH_IN_FILE),
        (VALIDATION_FAILED, VALIDATION_FAILED_IN_FILE),
    ]
    .into_iter()
    .find_map(|(cli, file)| (cli.id() == template.id()).then_some(file));
    let mut variant = known.unwrap_or_else(|| MessageTemplate {
        id: Cow::Owned(format!("{}{FILE_SUFFIX}", template.id())),
        fallback: Cow::Owned(format!("{} (in file '{{file}}')", template.fallback())),
        order: template.order(),
        advice: None,
    });
    variant.advice = template.advice().cloned();
    variant
}
