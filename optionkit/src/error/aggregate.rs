//! Aggregation container and iteration support for multiple `OptionError` values.

use std::{error::Error, fmt, sync::Arc};

use super::OptionError;

/// Errors reported together by a single processing run, in report order.
///
/// # Examples
///
/// ```
/// use optionkit::OptionError;
/// let e = OptionError::aggregate(vec![
///     OptionError::UnrecognizedOption {
///         option: "--bogus".into(),
///         message: "Unrecognized option --bogus".into(),
///     },
///     OptionError::NonOptionArguments {
///         arguments: vec!["stray".into()],
///         message: "1 non-option arguments: stray".into(),
///     },
/// ]);
/// if let OptionError::Aggregate(agg) = e {
///     assert_eq!(agg.len(), 2);
/// }
/// ```
#[derive(Debug, Default)]
pub struct AggregatedErrors(Vec<Arc<OptionError>>);

impl AggregatedErrors {
    /// Create a new aggregation from a vector of errors.
    #[must_use]
    pub const fn new(errors: Vec<Arc<OptionError>>) -> Self {
        Self(errors)
    }

    /// Iterate over the contained errors.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = &OptionError> {
        self.0.iter().map(Arc::as_ref)
    }

    /// Number of errors in the aggregation.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the aggregation holds no errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The error that is reported first.
    #[must_use]
    pub fn first(&self) -> Option<&OptionError> {
        self.0.first().map(Arc::as_ref)
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {e}", i + 1)?;
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

impl<'a> IntoIterator for &'a AggregatedErrors {
    type Item = &'a OptionError;
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, Arc<OptionError>>,
        fn(&'a Arc<OptionError>) -> &'a OptionError,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(Arc::as_ref)
    }
}

impl IntoIterator for AggregatedErrors {
    type Item = Arc<OptionError>;
    type IntoIter = std::vec::IntoIter<Arc<OptionError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
