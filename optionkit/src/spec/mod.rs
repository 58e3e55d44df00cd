//! Declarative option descriptors.
//!
//! An [`OptionSpec<T>`] is built once, from a static list of declarations,
//! and never changes afterwards. Its converter shape (flag, scalar or array)
//! is fixed during construction. Catalogues store specs as [`AnySpec`],
//! which keeps everything except the value type.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

use crate::merge::MergePolicy;
use crate::options::OptionValue;
use crate::{NameError, OptionIdentifier, OptionName};

mod builder;
mod erased;

pub use builder::OptionSpecBuilder;
pub(crate) use erased::ErasedConverter;

/// Opaque applicability tag, such as "applies when building an installer".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scope(Cow<'static, str>);

impl Scope {
    /// Tag from static text.
    #[must_use]
    pub const fn new(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    /// Tag from owned text.
    #[must_use]
    pub fn owned(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    /// The tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether an option takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueArity {
    /// A flag; presence is the value.
    None,
    /// A value must follow.
    Required,
    /// A value may follow; otherwise the default-for-missing-value is used.
    Optional,
}

/// Structural errors detected while declaring options.
///
/// These are programming errors in the option catalogue, not user errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpecError {
    /// The option was declared without names.
    #[error("an option needs at least one name")]
    NoNames,

    /// A declared name is malformed.
    #[error("invalid option name `{name}`: {source}")]
    InvalidName {
        /// The name as declared.
        name: String,
        /// Why it was rejected.
        #[source]
        source: NameError,
    },

    /// The option applies nowhere.
    #[error("option {option} has an empty scope")]
    EmptyScope {
        /// Primary name.
        option: OptionName,
    },

    /// `Concatenate` was requested for an option that is not an array.
    #[error("option {option} uses the concatenate merge policy but is not an array")]
    ConcatenateRequiresArray {
        /// Primary name.
        option: OptionName,
    },

    /// A value pattern was given to a flag.
    #[error("option {option} has a value pattern but takes no value")]
    PatternWithoutValue {
        /// Primary name.
        option: OptionName,
    },

    /// A default-for-missing-value was given to a flag.
    #[error("option {option} has a default for a missing value but takes no value")]
    DefaultWithoutValue {
        /// Primary name.
        option: OptionName,
    },

    /// Two declarations bind the same name.
    #[error("option name {name} is declared more than once")]
    DuplicateName {
        /// The contested name.
        name: OptionName,
    },
}

/// How an option is named in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Presentation {
    /// As written on the command line.
    CommandLine,
    /// As a bare key of the given property file.
    Property { file: Utf8PathBuf },
}

#[derive(Debug)]
struct SpecInner {
    identifier: OptionIdentifier,
    primary: OptionName,
    names: Vec<OptionName>,
    converter: ErasedConverter,
    scopes: BTreeSet<Scope>,
    merge_policy: MergePolicy,
    default_for_missing: Option<Arc<str>>,
    value_pattern: Option<String>,
    description: String,
    presentation: Presentation,
}

/// An option declaration with its value type erased.
///
/// Cloning is cheap; clones share the declaration.
#[derive(Debug, Clone)]
pub struct AnySpec(Arc<SpecInner>);

impl AnySpec {
    /// Identity of the option.
    #[must_use]
    pub fn identifier(&self) -> &OptionIdentifier {
        &self.0.identifier
    }

    /// Every name, primary first.
    #[must_use]
    pub fn names(&self) -> &[OptionName] {
        &self.0.names
    }

    /// The primary name.
    #[must_use]
    pub fn primary_name(&self) -> &OptionName {
        &self.0.primary
    }

    /// Applicability tags.
    #[must_use]
    pub fn scope(&self) -> &BTreeSet<Scope> {
        &self.0.scopes
    }

    /// Whether the option applies under `scope`.
    #[must_use]
    pub fn applies_to(&self, scope: &Scope) -> bool {
        self.0.scopes.contains(scope)
    }

    /// Merge policy for repeated occurrences.
    #[must_use]
    pub fn merge_policy(&self) -> MergePolicy {
        self.0.merge_policy
    }

    /// Usage pattern shown by help renderers, such as `<path>`.
    #[must_use]
    pub fn value_pattern(&self) -> Option<&str> {
        self.0.value_pattern.as_deref()
    }

    /// Human description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.0.description
    }

    /// Raw text used when the option appears without a value.
    #[must_use]
    pub fn default_for_missing_value(&self) -> Option<&Arc<str>> {
        self.0.default_for_missing.as_ref()
    }

    /// Whether the option takes a value, and whether it must.
    #[must_use]
    pub fn arity(&self) -> ValueArity {
        match (&self.0.converter, &self.0.default_for_missing) {
            (ErasedConverter::Flag, _) => ValueArity::None,
            (_, Some(_)) => ValueArity::Optional,
            (_, None) => ValueArity::Required,
        }
    }

    /// Whether values are arrays.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self.0.converter, ErasedConverter::Array(_))
    }

    /// Property file whose keys this spec was rewritten for.
    #[must_use]
    pub fn property_file(&self) -> Option<&Utf8Path> {
        match &self.0.presentation {
            Presentation::CommandLine => None,
            Presentation::Property { file } => Some(file),
        }
    }

    pub(crate) fn converter(&self) -> &ErasedConverter {
        &self.0.converter
    }

    /// Text naming an occurrence in diagnostics: the name as written on the
    /// command line, or the bare key in a property file.
    pub(crate) fn present(&self, name: &OptionName, written: &str) -> String {
        match self.0.presentation {
            Presentation::CommandLine => written.to_owned(),
            Presentation::Property { .. } => name.bare().to_owned(),
        }
    }

    /// The same declaration, read from the property file at `file`.
    pub(crate) fn in_file(&self, file: &Utf8Path) -> Self {
        Self(Arc::new(SpecInner {
            identifier: self.0.identifier.clone(),
            primary: self.0.primary.clone(),
            names: self.0.names.clone(),
            converter: self.0.converter.in_file(),
            scopes: self.0.scopes.clone(),
            merge_policy: self.0.merge_policy,
            default_for_missing: self.0.default_for_missing.clone(),
            value_pattern: self.0.value_pattern.clone(),
            description: self.0.description.clone(),
            presentation: Presentation::Property {
                file: file.to_owned(),
            },
        }))
    }
}

/// A typed option declaration.
///
/// # Examples
///
/// ```rust
/// use optionkit::convert::{ArrayConverter, builtin};
/// use optionkit::{MergePolicy, OptionSpec, Scope};
///
/// let number = OptionSpec::array(["--number", "-n"], ArrayConverter::delimited(builtin::integer::<i64>(), ','))
///     .scope(Scope::new("build"))
///     .merge_policy(MergePolicy::Concatenate)
///     .build()?;
/// assert_eq!(number.any().primary_name().to_string(), "--number");
/// assert!(number.any().is_array());
/// # Ok::<(), optionkit::SpecError>(())
/// ```
pub struct OptionSpec<T> {
    any: AnySpec,
    default_value: Option<Arc<T>>,
    marker: PhantomData<fn() -> T>,
}

impl<T> OptionSpec<T> {
    /// The untyped declaration, as stored in catalogues.
    #[must_use]
    pub const fn any(&self) -> &AnySpec {
        &self.any
    }

    /// Consumes the spec, keeping only the untyped declaration.
    #[must_use]
    pub fn erase(self) -> AnySpec {
        self.any
    }

    /// Identity of the option.
    #[must_use]
    pub fn identifier(&self) -> &OptionIdentifier {
        self.any.identifier()
    }

    /// Typed accessor for this option's value in an [`crate::Options`].
    #[must_use]
    pub fn value(&self) -> OptionValue<T> {
        OptionValue::new(
            self.any.identifier().clone(),
            self.default_value.clone(),
        )
    }
}

impl<T> Clone for OptionSpec<T> {
    fn clone(&self) -> Self {
        Self {
            any: self.any.clone(),
            default_value: self.default_value.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for OptionSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpec")
            .field("any", &self.any)
            .field("has_default_value", &self.default_value.is_some())
            .finish()
    }
}

impl<T> AsRef<AnySpec> for OptionSpec<T> {
    fn as_ref(&self) -> &AnySpec {
        &self.any
    }
}
