//! Reading options from property files.
//!
//! A property file holds `key=value` (or `key: value`) lines whose keys are
//! long option names without their dashes:
//!
//! ```text
//! # comment
//! name = build
//! verbose = true
//! number = 2,3,5
//! ```
//!
//! The lines are recognised against a catalogue rewritten by
//! [`crate::Catalogue::for_property_file`] and then converted by the same
//! pass as command-line input.

use std::sync::Arc;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::message::MessageFormatter;
use crate::parse::{ErrorReport, Occurrence, RawOptions};
use crate::spec::ValueArity;
use crate::{Catalogue, OptionError, OptionName, OptionsResult};

/// One `key=value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyLine {
    /// Key, right-trimmed.
    pub key: String,
    /// Value, left-trimmed. Empty when the line has no separator.
    pub value: String,
    /// One-based line number.
    pub line: usize,
}

/// Splits property text into lines.
///
/// Leading whitespace is ignored; blank lines and lines starting with `#`
/// or `!` are skipped; the key ends at the first `=` or `:`.
///
/// # Examples
///
/// ```rust
/// use optionkit::parse_properties;
///
/// let lines = parse_properties("# settings\nname = build\nlevel:3\nverbose\n");
/// let pairs: Vec<_> = lines
///     .iter()
///     .map(|line| (line.key.as_str(), line.value.as_str()))
///     .collect();
/// assert_eq!(pairs, [("name", "build"), ("level", "3"), ("verbose", "")]);
/// ```
#[must_use]
pub fn parse_properties(text: &str) -> Vec<PropertyLine> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line_text = line.trim_start();
            if line_text.is_empty() || line_text.starts_with(['#', '!']) {
                return None;
            }
            let (key, value) = line_text
                .split_once(['=', ':'])
                .unwrap_or((line_text, ""));
            Some(PropertyLine {
                key: key.trim_end().to_owned(),
                value: value.trim_start().to_owned(),
                line: index + 1,
            })
        })
        .collect()
}

/// Reads the property file at `path`.
///
/// # Errors
///
/// Returns [`OptionError::File`] when the file's directory cannot be opened
/// or the file cannot be read as UTF-8 text.
pub fn read_property_file(path: &Utf8Path) -> OptionsResult<String> {
    let file_error = |source| OptionError::File {
        path: path.to_owned(),
        source,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        file_error(std::io::Error::other(
            "cannot determine file name for property file path",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(file_error)?;
    let text = dir.read_to_string(file_name).map_err(file_error)?;
    tracing::debug!(path = %path, bytes = text.len(), "read property file");
    Ok(text)
}

/// Records `lines` as occurrences of the options in `catalogue`, which has
/// been rewritten for `path`.
pub(crate) fn collect(
    catalogue: &Catalogue,
    path: &Utf8Path,
    lines: &[PropertyLine],
    formatter: &MessageFormatter,
) -> OptionsResult<RawOptions> {
    let mut raw = RawOptions::default();
    let mut report = ErrorReport::new(formatter, Some(path));
    for line in lines {
        let found = OptionName::from_bare(&line.key)
            .ok()
            .filter(OptionName::is_long)
            .and_then(|name| {
                let spec = catalogue.find_name(&name)?;
                let declared = spec.names().iter().find(|declared| **declared == name)?;
                Some((spec, declared))
            });
        let Some((spec, name)) = found else {
            report.unrecognized(line.line, &line.key);
            continue;
        };
        let value = match (spec.arity(), line.value.is_empty()) {
            (ValueArity::Optional, true) => spec
                .default_for_missing_value()
                .cloned()
                .unwrap_or_else(|| Arc::from("")),
            _ => Arc::from(line.value.as_str()),
        };
        raw.record(
            spec,
            Occurrence::new(name.clone(), line.key.as_str(), Some(value), line.line),
        );
    }
    tracing::debug!(
        path = %path,
        lines = lines.len(),
        options = raw.len(),
        "parsed property file"
    );
    report.finish().map_or(Ok(raw), Err)
}

#[cfg(test)]
mod tests;
