//! Text helpers for asserting on rendered messages.

/// Removes the Unicode bidi isolate markers Fluent places around arguments.
#[must_use]
pub fn strip_isolates(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(*ch, '\u{2068}' | '\u{2069}'))
        .collect()
}

/// Rendered form of each message, with isolate markers removed.
#[must_use]
pub fn plain_messages<I, S>(messages: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    messages
        .into_iter()
        .map(|message| strip_isolates(message.as_ref()))
        .collect()
}
