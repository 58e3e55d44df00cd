//! Option identity, distinct from option names.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_FRESH: AtomicU64 = AtomicU64::new(0);

/// Identity of an option inside [`crate::Options`].
///
/// Declarations that describe the same option under different aliases share
/// one identifier. Stable identifiers compare equal when built from the same
/// text, so modules that never see each other's declarations can still refer
/// to one option. Fresh identifiers are unique for the life of the process.
///
/// # Examples
///
/// ```rust
/// use optionkit::OptionIdentifier;
///
/// assert_eq!(OptionIdentifier::stable("icon"), OptionIdentifier::stable("icon"));
/// assert_ne!(OptionIdentifier::fresh(), OptionIdentifier::fresh());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionIdentifier(Repr);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Repr {
    Stable(Arc<str>),
    Fresh(u64),
}

impl OptionIdentifier {
    /// Derives an identifier from `key`.
    #[must_use]
    pub fn stable(key: impl AsRef<str>) -> Self {
        Self(Repr::Stable(Arc::from(key.as_ref())))
    }

    /// Generates a new identifier that is unequal to every other identifier.
    #[must_use]
    pub fn fresh() -> Self {
        Self(Repr::Fresh(NEXT_FRESH.fetch_add(1, Ordering::Relaxed)))
    }

    /// Whether the identifier was derived from a stable key.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self.0, Repr::Stable(_))
    }
}

impl fmt::Display for OptionIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Stable(key) => f.write_str(key),
            Repr::Fresh(id) => write!(f, "#{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OptionIdentifier;
    use std::collections::HashSet;

    #[test]
    fn stable_identifiers_follow_their_key() {
        let first = OptionIdentifier::stable("input");
        assert_eq!(first, OptionIdentifier::stable(String::from("input")));
        assert_ne!(first, OptionIdentifier::stable("output"));
        assert!(first.is_stable());
    }

    #[test]
    fn fresh_identifiers_never_collide() {
        let ids: HashSet<_> = (0..64).map(|_| OptionIdentifier::fresh()).collect();
        assert_eq!(ids.len(), 64);
        assert!(ids.iter().all(|id| !id.is_stable()));
    }
}
