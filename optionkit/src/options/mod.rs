//! The resolved option store and its composition utilities.
//!
//! [`Options`] maps identifiers to type-erased values and keeps a secondary
//! index of the names bound to each contained identifier. Instances are never
//! changed after they are built; every composition returns a new instance.
//! Callers recover types through [`OptionValue`].

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::spec::{AnySpec, OptionSpec};
use crate::{OptionIdentifier, OptionName};

mod value;

pub use value::OptionValue;

type StoredValue = Arc<dyn Any + Send + Sync>;

#[derive(Clone)]
struct Entry {
    value: StoredValue,
    names: Arc<[OptionName]>,
}

/// Immutable mapping from option identity to resolved value.
///
/// An identifier is contained if and only if it has a value, and then every
/// name declared for it is contained too. No two contained identifiers share
/// a name.
///
/// # Examples
///
/// ```rust
/// use optionkit::{OptionSpec, Options, Scope};
/// use optionkit::convert::builtin;
///
/// let name = OptionSpec::scalar(["--name"], builtin::string())
///     .scope(Scope::new("app"))
///     .build()?;
/// let defaults = Options::new().copy_with_default_value(&name, "demo".to_owned());
/// assert_eq!(name.value().find(&defaults).map(String::as_str), Some("demo"));
/// assert!(defaults.contains_name(&"--name".try_into()?));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Default)]
pub struct Options {
    values: BTreeMap<OptionIdentifier, Entry>,
    names: BTreeMap<OptionName, OptionIdentifier>,
}

impl Options {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contained identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is contained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `id` has a value.
    #[must_use]
    pub fn contains(&self, id: &OptionIdentifier) -> bool {
        self.values.contains_key(id)
    }

    /// Whether any contained identifier is bound to `name`.
    #[must_use]
    pub fn contains_name(&self, name: &OptionName) -> bool {
        self.names.contains_key(name)
    }

    /// Identifier bound to `name`, if contained.
    #[must_use]
    pub fn identifier_of(&self, name: &OptionName) -> Option<&OptionIdentifier> {
        self.names.get(name)
    }

    /// Contained identifiers in identifier order.
    pub fn identifiers(&self) -> impl Iterator<Item = &OptionIdentifier> {
        self.values.keys()
    }

    /// Names contained for `id`.
    #[must_use]
    pub fn names_of(&self, id: &OptionIdentifier) -> Option<&[OptionName]> {
        self.values.get(id).map(|entry| entry.names.as_ref())
    }

    /// Untyped value of `id`. Use [`OptionValue`] for typed access.
    #[must_use]
    pub fn get_any(&self, id: &OptionIdentifier) -> Option<&(dyn Any + Send + Sync)> {
        self.values.get(id).map(|entry| entry.value.as_ref())
    }

    /// Combines several instances. Later instances override earlier ones on
    /// identifier collisions. A later identifier that claims a name bound to
    /// a different earlier identifier evicts that earlier identifier.
    #[must_use]
    pub fn concat<'a>(parts: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut combined = Self::new();
        for part in parts {
            for (id, entry) in &part.values {
                combined.insert_entry(id.clone(), entry.clone());
            }
        }
        combined
    }

    /// Keeps only the listed identifiers.
    #[must_use]
    pub fn copy_with<'a>(&self, ids: impl IntoIterator<Item = &'a OptionIdentifier>) -> Self {
        let mut projected = Self::new();
        for id in ids {
            if let Some(entry) = self.values.get(id) {
                projected.insert_entry(id.clone(), entry.clone());
            }
        }
        projected
    }

    /// Removes the listed identifiers together with their names.
    #[must_use]
    pub fn copy_without<'a>(&self, ids: impl IntoIterator<Item = &'a OptionIdentifier>) -> Self {
        let mut remaining = self.clone();
        for id in ids {
            remaining.remove(id);
        }
        remaining
    }

    /// Adds `value` for `spec` unless its identifier is already contained.
    #[must_use]
    pub fn copy_with_default_value<T: Any + Send + Sync>(
        &self,
        spec: &OptionSpec<T>,
        value: T,
    ) -> Self {
        if self.contains(spec.identifier()) {
            return self.clone();
        }
        let mut extended = self.clone();
        extended.insert(spec.any(), Arc::new(value));
        extended
    }

    /// Layers `self` over `parent`: identifiers missing here fall back to
    /// the parent's values, and local values always win.
    #[must_use]
    pub fn copy_with_parent(&self, parent: &Self) -> Self {
        Self::concat([parent, self])
    }

    pub(crate) fn insert(&mut self, spec: &AnySpec, value: StoredValue) {
        self.insert_entry(
            spec.identifier().clone(),
            Entry {
                value,
                names: Arc::from(spec.names()),
            },
        );
    }

    fn insert_entry(&mut self, id: OptionIdentifier, entry: Entry) {
        self.remove(&id);
        let evicted: Vec<OptionIdentifier> = entry
            .names
            .iter()
            .filter_map(|name| self.names.get(name))
            .cloned()
            .collect();
        for other in &evicted {
            self.remove(other);
        }
        for name in entry.names.iter() {
            self.names.insert(name.clone(), id.clone());
        }
        self.values.insert(id, entry);
    }

    fn remove(&mut self, id: &OptionIdentifier) {
        if let Some(entry) = self.values.remove(id) {
            for name in entry.names.iter() {
                if self.names.get(name) == Some(id) {
                    self.names.remove(name);
                }
            }
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.values
                    .iter()
                    .map(|(id, entry)| (id.to_string(), entry.names.as_ref())),
            )
            .finish()
    }
}
