//! Immutable builder producing frozen [`OptionSpec`] values.

use std::any::Any;
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{AnySpec, ErasedConverter, OptionSpec, Presentation, Scope, SpecError, SpecInner};
use crate::convert::{ArrayConverter, ValueConverter};
use crate::merge::MergePolicy;
use crate::{OptionIdentifier, OptionName};

/// Builder for [`OptionSpec`].
///
/// Every method consumes the builder and returns a new one; builders are
/// [`Clone`], so a partially configured builder can be reused as a template
/// for several options.
pub struct OptionSpecBuilder<T> {
    names: Vec<String>,
    converter: ErasedConverter,
    scopes: BTreeSet<Scope>,
    merge_policy: MergePolicy,
    default_for_missing: Option<Arc<str>>,
    value_pattern: Option<String>,
    description: String,
    identifier: Option<OptionIdentifier>,
    default_value: Option<Arc<T>>,
}

fn collect_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Into::into).collect()
}

impl OptionSpec<bool> {
    /// Declares a flag: presence alone is the value.
    ///
    /// Names are written with their prefix, primary name first.
    #[must_use]
    pub fn flag<I, S>(names: I) -> OptionSpecBuilder<bool>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionSpecBuilder::with_converter(collect_names(names), ErasedConverter::Flag)
    }
}

impl<T: Any + Send + Sync> OptionSpec<T> {
    /// Declares an option with a single typed value.
    #[must_use]
    pub fn scalar<I, S>(names: I, converter: ValueConverter<T>) -> OptionSpecBuilder<T>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionSpecBuilder::with_converter(
            collect_names(names),
            ErasedConverter::Scalar(Arc::new(converter)),
        )
    }
}

impl<E: Any + Send + Sync> OptionSpec<Vec<E>> {
    /// Declares an option whose value is an array of elements.
    #[must_use]
    pub fn array<I, S>(names: I, converter: ArrayConverter<E>) -> OptionSpecBuilder<Vec<E>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OptionSpecBuilder::with_converter(
            collect_names(names),
            ErasedConverter::Array(Arc::new(converter)),
        )
    }
}

impl<T> OptionSpecBuilder<T> {
    fn with_converter(names: Vec<String>, converter: ErasedConverter) -> Self {
        Self {
            names,
            converter,
            scopes: BTreeSet::new(),
            merge_policy: MergePolicy::default(),
            default_for_missing: None,
            value_pattern: None,
            description: String::new(),
            identifier: None,
            default_value: None,
        }
    }

    /// Adds an applicability tag.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scopes.insert(scope);
        self
    }

    /// Adds several applicability tags.
    #[must_use]
    pub fn scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        self.scopes.extend(scopes);
        self
    }

    /// Sets how repeated occurrences are combined.
    #[must_use]
    pub const fn merge_policy(mut self, policy: MergePolicy) -> Self {
        self.merge_policy = policy;
        self
    }

    /// Raw text used when the option appears without a value. It goes
    /// through the same converter and validators as typed text.
    #[must_use]
    pub fn default_for_missing_value(mut self, raw: impl Into<Arc<str>>) -> Self {
        self.default_for_missing = Some(raw.into());
        self
    }

    /// Usage pattern for help renderers.
    #[must_use]
    pub fn value_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.value_pattern = Some(pattern.into());
        self
    }

    /// Human description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Uses `identifier` instead of a fresh one. Use
    /// [`OptionIdentifier::stable`] for options referenced from several
    /// independently built catalogues.
    #[must_use]
    pub fn identifier(mut self, identifier: OptionIdentifier) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// Value reported by [`crate::OptionValue::get_or_default`] when the
    /// option is absent.
    #[must_use]
    pub fn default_value(mut self, value: T) -> Self {
        self.default_value = Some(Arc::new(value));
        self
    }

    /// Freezes the declaration.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError`] when the name list is empty or malformed, the
    /// scope is empty, `Concatenate` is requested for a non-array option, or
    /// a flag is given a value pattern or a default-for-missing-value.
    pub fn build(self) -> Result<OptionSpec<T>, SpecError> {
        let mut names = Vec::with_capacity(self.names.len());
        for text in &self.names {
            let name = OptionName::parse(text).map_err(|source| SpecError::InvalidName {
                name: text.clone(),
                source,
            })?;
            if names.contains(&name) {
                return Err(SpecError::DuplicateName { name });
            }
            names.push(name);
        }
        let primary = names.first().cloned().ok_or(SpecError::NoNames)?;

        if self.scopes.is_empty() {
            return Err(SpecError::EmptyScope { option: primary });
        }
        let is_flag = matches!(self.converter, ErasedConverter::Flag);
        let is_array = matches!(self.converter, ErasedConverter::Array(_));
        if self.merge_policy == MergePolicy::Concatenate && !is_array {
            return Err(SpecError::ConcatenateRequiresArray { option: primary });
        }
        if is_flag && self.value_pattern.is_some() {
            return Err(SpecError::PatternWithoutValue { option: primary });
        }
        if is_flag && self.default_for_missing.is_some() {
            return Err(SpecError::DefaultWithoutValue { option: primary });
        }

        Ok(OptionSpec {
            any: AnySpec(Arc::new(SpecInner {
                identifier: self.identifier.unwrap_or_else(OptionIdentifier::fresh),
                primary,
                names,
                converter: self.converter,
                scopes: self.scopes,
                merge_policy: self.merge_policy,
                default_for_missing: self.default_for_missing,
                value_pattern: self.value_pattern,
                description: self.description,
                presentation: Presentation::CommandLine,
            })),
            default_value: self.default_value,
            marker: PhantomData,
        })
    }
}

impl<T> Clone for OptionSpecBuilder<T> {
    fn clone(&self) -> Self {
        Self {
            names: self.names.clone(),
            converter: self.converter.clone(),
            scopes: self.scopes.clone(),
            merge_policy: self.merge_policy,
            default_for_missing: self.default_for_missing.clone(),
            value_pattern: self.value_pattern.clone(),
            description: self.description.clone(),
            identifier: self.identifier.clone(),
            default_value: self.default_value.clone(),
        }
    }
}

impl<T> fmt::Debug for OptionSpecBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionSpecBuilder")
            .field("names", &self.names)
            .field("converter", &self.converter)
            .field("scopes", &self.scopes)
            .field("merge_policy", &self.merge_policy)
            .field("default_for_missing", &self.default_for_missing)
            .finish_non_exhaustive()
    }
}
