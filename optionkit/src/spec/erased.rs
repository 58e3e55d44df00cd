//! Converters with their value type erased, as stored in catalogues.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::StringToken;
use crate::convert::{ArrayConverter, ArrayFailures, ConversionFailure, ValueConverter, builtin};
use crate::merge::{MergePolicy, merge_arrays};

/// A converted value on its way into an [`crate::Options`].
pub(crate) type ErasedValue = Box<dyn Any + Send + Sync>;

/// Failures of an array option, keyed by the index of the occurrence that
/// produced them.
pub(crate) type OccurrenceFailures = Vec<(usize, ArrayFailures)>;

pub(crate) trait ScalarConversion: Send + Sync {
    fn convert_erased(&self, token: &StringToken) -> Result<ErasedValue, ConversionFailure>;

    fn file_scoped(&self) -> Arc<dyn ScalarConversion>;
}

impl<T: Any + Send + Sync> ScalarConversion for ValueConverter<T> {
    fn convert_erased(&self, token: &StringToken) -> Result<ErasedValue, ConversionFailure> {
        self.convert(token).map(|value| Box::new(value) as ErasedValue)
    }

    fn file_scoped(&self) -> Arc<dyn ScalarConversion> {
        Arc::new(self.in_file())
    }
}

pub(crate) trait ArrayConversion: Send + Sync {
    /// Converts each raw occurrence and merges the results by `policy`.
    fn convert_occurrences(
        &self,
        policy: MergePolicy,
        raws: &[Arc<str>],
    ) -> Result<ErasedValue, OccurrenceFailures>;

    fn file_scoped(&self) -> Arc<dyn ArrayConversion>;
}

impl<E: Any + Send + Sync> ArrayConversion for ArrayConverter<E> {
    fn convert_occurrences(
        &self,
        policy: MergePolicy,
        raws: &[Arc<str>],
    ) -> Result<ErasedValue, OccurrenceFailures> {
        let mut converted = Vec::with_capacity(raws.len());
        let mut failed = Vec::new();
        for (index, raw) in raws.iter().enumerate() {
            match self.convert(raw) {
                Ok(values) => converted.push(values),
                Err(failures) => failed.push((index, failures)),
            }
        }
        if failed.is_empty() {
            Ok(Box::new(merge_arrays(policy, converted)))
        } else {
            Err(failed)
        }
    }

    fn file_scoped(&self) -> Arc<dyn ArrayConversion> {
        Arc::new(self.in_file())
    }
}

/// Converter shape, fixed when the option is declared.
#[derive(Clone)]
pub(crate) enum ErasedConverter {
    /// Presence alone is the value.
    Flag,
    Scalar(Arc<dyn ScalarConversion>),
    Array(Arc<dyn ArrayConversion>),
}

impl ErasedConverter {
    /// Property files spell flags as `key=true`, so flags become lenient
    /// boolean scalars there.
    pub(crate) fn in_file(&self) -> Self {
        match self {
            Self::Flag => Self::Scalar(Arc::new(builtin::lenient_boolean())),
            Self::Scalar(converter) => Self::Scalar(converter.file_scoped()),
            Self::Array(converter) => Self::Array(converter.file_scoped()),
        }
    }
}

impl fmt::Debug for ErasedConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Flag => "Flag",
            Self::Scalar(_) => "Scalar",
            Self::Array(_) => "Array",
        })
    }
}
