//! The set of option declarations one invocation recognises.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};

use crate::spec::{AnySpec, Scope, SpecError};
use crate::{OptionIdentifier, OptionName};

/// An explicit catalogue of option declarations.
///
/// Catalogues are plain values passed to the parser and processor; there is
/// no process-wide registry.
///
/// # Examples
///
/// ```rust
/// use optionkit::{Catalogue, OptionSpec, Scope};
///
/// let verbose = OptionSpec::flag(["--verbose", "-v"]).scope(Scope::new("app")).build()?;
/// let catalogue = Catalogue::builder().add(&verbose).build()?;
/// assert!(catalogue.find_name(&"-v".try_into()?).is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    specs: Vec<AnySpec>,
    by_name: BTreeMap<OptionName, usize>,
    file: Option<Utf8PathBuf>,
}

/// Collects declarations and checks their names for clashes.
#[derive(Debug, Clone, Default)]
pub struct CatalogueBuilder {
    specs: Vec<AnySpec>,
}

impl CatalogueBuilder {
    /// Adds a declaration.
    #[must_use]
    pub fn add(mut self, spec: impl AsRef<AnySpec>) -> Self {
        self.specs.push(spec.as_ref().clone());
        self
    }

    /// Adds several declarations.
    #[must_use]
    pub fn extend<I>(mut self, specs: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<AnySpec>,
    {
        self.specs
            .extend(specs.into_iter().map(|spec| spec.as_ref().clone()));
        self
    }

    /// Freezes the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::DuplicateName`] when two declarations with
    /// different identifiers bind the same name. Adding one declaration
    /// twice is not an error.
    pub fn build(self) -> Result<Catalogue, SpecError> {
        Catalogue::from_specs(self.specs, None)
    }
}

impl Catalogue {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> CatalogueBuilder {
        CatalogueBuilder::default()
    }

    fn from_specs(specs: Vec<AnySpec>, file: Option<Utf8PathBuf>) -> Result<Self, SpecError> {
        let mut catalogue = Self {
            specs: Vec::with_capacity(specs.len()),
            by_name: BTreeMap::new(),
            file,
        };
        for spec in specs {
            if catalogue
                .specs
                .iter()
                .any(|known| known.identifier() == spec.identifier() && known.names() == spec.names())
            {
                continue;
            }
            if let Some(name) = spec
                .names()
                .iter()
                .find(|name| catalogue.by_name.contains_key(*name))
            {
                return Err(SpecError::DuplicateName { name: name.clone() });
            }
            let index = catalogue.specs.len();
            for name in spec.names() {
                catalogue.by_name.insert(name.clone(), index);
            }
            catalogue.specs.push(spec);
        }
        Ok(catalogue)
    }

    /// Declarations in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &AnySpec> {
        self.specs.iter()
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Declaration bound to `name`.
    #[must_use]
    pub fn find_name(&self, name: &OptionName) -> Option<&AnySpec> {
        self.by_name
            .get(name)
            .and_then(|index| self.specs.get(*index))
    }

    /// First declaration with identifier `id`.
    #[must_use]
    pub fn find(&self, id: &OptionIdentifier) -> Option<&AnySpec> {
        self.specs.iter().find(|spec| spec.identifier() == id)
    }

    /// A catalogue holding only the declarations that apply under `scope`.
    #[must_use]
    pub fn in_scope(&self, scope: &Scope) -> Self {
        self.filtered(|spec| spec.applies_to(scope))
    }

    /// Property file this catalogue was rewritten for.
    #[must_use]
    pub fn property_file(&self) -> Option<&Utf8Path> {
        self.file.as_deref()
    }

    /// The catalogue rewritten to read keys from the property file at
    /// `path`: options are presented by bare key, messages use their
    /// property-file variants, and flags accept `true`/`false` text.
    #[must_use]
    pub fn for_property_file(&self, path: &Utf8Path) -> Self {
        Self {
            specs: self.specs.iter().map(|spec| spec.in_file(path)).collect(),
            by_name: self.by_name.clone(),
            file: Some(path.to_owned()),
        }
    }

    /// Long names starting with `prefix`, in name order. An exact match is
    /// returned alone.
    pub(crate) fn long_names_with_prefix(&self, prefix: &str) -> Vec<&OptionName> {
        let exact = self
            .by_name
            .keys()
            .find(|name| name.is_long() && name.bare() == prefix);
        if let Some(name) = exact {
            return vec![name];
        }
        self.by_name
            .keys()
            .filter(|name| name.is_long() && name.bare().starts_with(prefix))
            .collect()
    }

    fn filtered(&self, keep: impl Fn(&AnySpec) -> bool) -> Self {
        let mut catalogue = Self {
            specs: Vec::new(),
            by_name: BTreeMap::new(),
            file: self.file.clone(),
        };
        for spec in self.specs.iter().filter(|spec| keep(spec)) {
            let index = catalogue.specs.len();
            for name in spec.names() {
                catalogue.by_name.insert(name.clone(), index);
            }
            catalogue.specs.push(spec.clone());
        }
        catalogue
    }
}
