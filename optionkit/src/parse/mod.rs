//! Parsing front-end: recognising options in raw input.
//!
//! Parsing produces [`RawOptions`], the literal text captured by every
//! recognised option in the order the options first appeared. Nothing is
//! converted here; see [`crate::OptionsProcessor`] for the conversion pass.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::spec::AnySpec;
use crate::{OptionIdentifier, OptionName};

mod args;
mod report;

pub use args::parse_args;
pub(crate) use report::ErrorReport;

/// Parser behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Accept any unique prefix of a long name, such as `--verb` for
    /// `--verbose`. An exact match always wins.
    pub abbreviations: bool,
}

impl ParserConfig {
    /// Enables or disables long-name abbreviations.
    #[must_use]
    pub const fn with_abbreviations(mut self, enabled: bool) -> Self {
        self.abbreviations = enabled;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            abbreviations: true,
        }
    }
}

/// One appearance of an option in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    name: OptionName,
    written: String,
    raw: Option<Arc<str>>,
    position: usize,
}

impl Occurrence {
    pub(crate) fn new(
        name: OptionName,
        written: impl Into<String>,
        raw: Option<Arc<str>>,
        position: usize,
    ) -> Self {
        Self {
            name,
            written: written.into(),
            raw,
            position,
        }
    }

    /// Declared name the occurrence resolved to.
    #[must_use]
    pub const fn name(&self) -> &OptionName {
        &self.name
    }

    /// The option as written, such as `--num` for an abbreviation of
    /// `--number`, or the key of a property line.
    #[must_use]
    pub fn written(&self) -> &str {
        &self.written
    }

    /// Captured text. Flags capture nothing.
    #[must_use]
    pub fn raw(&self) -> Option<&Arc<str>> {
        self.raw.as_ref()
    }

    /// Index of the argument (or line) the occurrence came from.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RawEntry {
    pub(crate) spec: AnySpec,
    pub(crate) occurrences: Vec<Occurrence>,
}

/// Unconverted parse result.
///
/// Holds one entry per recognised option, in first-occurrence order, and the
/// flat list of every occurrence as seen.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    entries: Vec<RawEntry>,
    occurrences: Vec<Occurrence>,
}

impl RawOptions {
    pub(crate) fn record(&mut self, spec: &AnySpec, occurrence: Occurrence) {
        self.occurrences.push(occurrence.clone());
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.spec.identifier() == spec.identifier())
        {
            Some(entry) => entry.occurrences.push(occurrence),
            None => self.entries.push(RawEntry {
                spec: spec.clone(),
                occurrences: vec![occurrence],
            }),
        }
    }

    pub(crate) fn entries(&self) -> &[RawEntry] {
        &self.entries
    }

    /// Number of distinct options recognised.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no option was recognised.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every occurrence in input order.
    #[must_use]
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Identifiers in first-occurrence order.
    pub fn identifiers(&self) -> impl Iterator<Item = &OptionIdentifier> {
        self.entries.iter().map(|entry| entry.spec.identifier())
    }

    /// Whether the option `id` was given.
    #[must_use]
    pub fn contains(&self, id: &OptionIdentifier) -> bool {
        self.entries.iter().any(|entry| entry.spec.identifier() == id)
    }

    /// Whether an option bound to `name` was given, under any of its names.
    #[must_use]
    pub fn contains_name(&self, name: &OptionName) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.spec.names().contains(name))
    }

    /// Captured text of each occurrence of `id`, in input order.
    #[must_use]
    pub fn values(&self, id: &OptionIdentifier) -> Vec<&str> {
        self.occurrences_of(id)
            .iter()
            .filter_map(|occurrence| occurrence.raw().map(|raw| &**raw))
            .collect()
    }

    /// Occurrences of `id`, in input order.
    #[must_use]
    pub fn occurrences_of(&self, id: &OptionIdentifier) -> &[Occurrence] {
        self.entries
            .iter()
            .find(|entry| entry.spec.identifier() == id)
            .map(|entry| entry.occurrences.as_slice())
            .unwrap_or_default()
    }

    /// Drops the listed options before conversion, so they are neither
    /// converted nor validated nor reported.
    #[must_use]
    pub fn copy_with_excludes<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a OptionIdentifier>,
    ) -> Self {
        let excluded: BTreeSet<&OptionIdentifier> = ids.into_iter().collect();
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| !excluded.contains(entry.spec.identifier()))
                .cloned()
                .collect(),
            occurrences: self
                .occurrences
                .iter()
                .filter(|occurrence| {
                    self.entries.iter().any(|entry| {
                        !excluded.contains(entry.spec.identifier())
                            && entry.spec.names().contains(occurrence.name())
                    })
                })
                .cloned()
                .collect(),
        }
    }
}
