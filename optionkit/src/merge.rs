//! Combining repeated occurrences of one option into its final value.

use std::ops::Range;

/// Rule for collapsing several occurrences of an option.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MergePolicy {
    /// The first occurrence wins.
    UseFirst,
    /// The last occurrence wins.
    #[default]
    UseLast,
    /// Every occurrence's elements are appended in command-line order.
    /// Only valid for array options.
    Concatenate,
}

/// Indices of the occurrences whose values the policy keeps, out of
/// `occurrences` in command-line order.
///
/// # Examples
///
/// ```rust
/// use optionkit::{MergePolicy, selected_occurrences};
///
/// assert_eq!(selected_occurrences(MergePolicy::UseFirst, 3), 0..1);
/// assert_eq!(selected_occurrences(MergePolicy::UseLast, 3), 2..3);
/// assert_eq!(selected_occurrences(MergePolicy::Concatenate, 3), 0..3);
/// assert!(selected_occurrences(MergePolicy::UseLast, 0).is_empty());
/// ```
#[must_use]
pub const fn selected_occurrences(policy: MergePolicy, occurrences: usize) -> Range<usize> {
    match policy {
        MergePolicy::UseFirst if occurrences == 0 => 0..0,
        MergePolicy::UseFirst => 0..1,
        MergePolicy::UseLast => occurrences.saturating_sub(1)..occurrences,
        MergePolicy::Concatenate => 0..occurrences,
    }
}

/// Picks the value the policy keeps from per-occurrence scalar values.
///
/// `Concatenate` is rejected for scalar options when the option is declared,
/// so it is treated like `UseLast` here.
#[must_use]
pub fn merge_values<T>(policy: MergePolicy, values: Vec<T>) -> Option<T> {
    match policy {
        MergePolicy::UseFirst => values.into_iter().next(),
        MergePolicy::UseLast | MergePolicy::Concatenate => values.into_iter().last(),
    }
}

/// Merges per-occurrence array values.
#[must_use]
pub fn merge_arrays<E>(policy: MergePolicy, values: Vec<Vec<E>>) -> Vec<E> {
    match policy {
        MergePolicy::Concatenate => values.into_iter().flatten().collect(),
        single => merge_values(single, values).unwrap_or_default(),
    }
}
