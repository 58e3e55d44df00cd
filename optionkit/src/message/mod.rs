//! Rendering of user-facing messages.
//!
//! Detection code never builds message text itself. It pairs a
//! [`MessageTemplate`] with the offending value and option name, and the
//! [`MessageFormatter`] decides how that becomes text: which argument goes
//! in which position ([`ArgumentOrder`]), and which [`Localizer`] resolves
//! the template identifier.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use fluent_bundle::FluentValue;

use crate::localizer::{LocalizationArgs, Localizer, NoOpLocalizer};

pub mod templates;

/// How the value and option name of a message map onto positional arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArgumentOrder {
    /// `{0}` is the value, `{1}` the option name.
    #[default]
    ValueThenName,
    /// `{0}` is the option name, `{1}` the value.
    NameThenValue,
    /// `{0}` is the option name.
    NameOnly,
    /// `{0}` is the value.
    ValueOnly,
    /// The message takes no positional arguments.
    None,
}

/// Optional one-line advice attached to a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Advice {
    id: Cow<'static, str>,
    fallback: Cow<'static, str>,
}

impl Advice {
    /// Localisation identifier of the advice.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Text used when the localizer has no entry for the identifier.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

/// A message identifier, its fallback text and its argument ordering.
///
/// Fallback text refers to positional arguments as `{0}` and `{1}` and to
/// the originating property file as `{file}`. Fluent resources receive the
/// same values as `$arg0`, `$arg1` and `$file`.
///
/// # Examples
///
/// ```rust
/// use optionkit::message::{ArgumentOrder, MessageArgs, MessageFormatter, MessageTemplate};
///
/// let template = MessageTemplate::new(
///     "app-port-range",
///     "Port {1} is out of range: {0}",
///     ArgumentOrder::ValueThenName,
/// );
/// let text = MessageFormatter::default()
///     .format(&template, &MessageArgs::new().value("99999").name("--port"));
/// assert_eq!(text, "Port --port is out of range: 99999");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageTemplate {
    id: Cow<'static, str>,
    fallback: Cow<'static, str>,
    order: ArgumentOrder,
    advice: Option<Advice>,
}

impl MessageTemplate {
    /// Builds a template from static text.
    #[must_use]
    pub const fn new(id: &'static str, fallback: &'static str, order: ArgumentOrder) -> Self {
        Self {
            id: Cow::Borrowed(id),
            fallback: Cow::Borrowed(fallback),
            order,
            advice: None,
        }
    }

    /// Builds a template from owned text.
    #[must_use]
    pub fn owned(id: impl Into<String>, fallback: impl Into<String>, order: ArgumentOrder) -> Self {
        Self {
            id: Cow::Owned(id.into()),
            fallback: Cow::Owned(fallback.into()),
            order,
            advice: None,
        }
    }

    /// Attaches advice rendered alongside the message.
    #[must_use]
    pub fn with_advice(
        mut self,
        id: impl Into<Cow<'static, str>>,
        fallback: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.advice = Some(Advice {
            id: id.into(),
            fallback: fallback.into(),
        });
        self
    }

    /// Returns a copy with a different argument ordering.
    #[must_use]
    pub const fn with_order(mut self, order: ArgumentOrder) -> Self {
        self.order = order;
        self
    }

    /// Localisation identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Text used when the localizer has no entry for the identifier.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Argument ordering policy.
    #[must_use]
    pub const fn order(&self) -> ArgumentOrder {
        self.order
    }

    /// Advice attached to the template, if any.
    #[must_use]
    pub const fn advice(&self) -> Option<&Advice> {
        self.advice.as_ref()
    }

    /// Whether this template already refers to a property file.
    #[must_use]
    pub fn is_file_scoped(&self) -> bool {
        self.id.ends_with(templates::FILE_SUFFIX)
    }

    /// The variant of this template used for values read from a property file.
    #[must_use]
    pub fn in_file(&self) -> Self {
        templates::file_variant(self)
    }
}

/// Values available to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageArgs {
    value: Option<String>,
    name: Option<String>,
    file: Option<String>,
}

impl MessageArgs {
    /// Empty argument set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the offending value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the presented option name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the originating property file.
    #[must_use]
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the originating property file when one is known.
    #[must_use]
    pub fn maybe_file(mut self, file: Option<impl Into<String>>) -> Self {
        self.file = file.map(Into::into);
        self
    }

    /// Positional arguments in the order requested by `order`.
    #[must_use]
    pub fn positional(&self, order: ArgumentOrder) -> Vec<&str> {
        let value = self.value.as_deref().unwrap_or_default();
        let name = self.name.as_deref().unwrap_or_default();
        match order {
            ArgumentOrder::ValueThenName => vec![value, name],
            ArgumentOrder::NameThenValue => vec![name, value],
            ArgumentOrder::NameOnly => vec![name],
            ArgumentOrder::ValueOnly => vec![value],
            ArgumentOrder::None => Vec::new(),
        }
    }

    fn localization_args(&self, order: ArgumentOrder) -> LocalizationArgs<'_> {
        const POSITIONS: [&str; 2] = ["arg0", "arg1"];
        let mut args: LocalizationArgs<'_> = POSITIONS
            .into_iter()
            .zip(self.positional(order))
            .map(|(key, text)| (key, FluentValue::from(text)))
            .collect();
        if let Some(file) = self.file.as_deref() {
            args.insert("file", FluentValue::from(file));
        }
        args
    }
}

/// Turns templates into text through a [`Localizer`].
///
/// The default formatter uses [`NoOpLocalizer`], so every message is the
/// template's fallback text with its arguments substituted.
#[derive(Clone)]
pub struct MessageFormatter {
    localizer: Arc<dyn Localizer>,
}

impl MessageFormatter {
    /// Formatter backed by `localizer`.
    #[must_use]
    pub fn new(localizer: Arc<dyn Localizer>) -> Self {
        Self { localizer }
    }

    /// Renders `template` with `args`.
    #[must_use]
    pub fn format(&self, template: &MessageTemplate, args: &MessageArgs) -> String {
        let fallback = substitute(template.fallback(), args, template.order());
        let fluent_args = args.localization_args(template.order());
        self.localizer
            .message(template.id(), Some(&fluent_args), &fallback)
    }

    /// Renders the advice attached to `template`, if any.
    #[must_use]
    pub fn advice(&self, template: &MessageTemplate, args: &MessageArgs) -> Option<String> {
        let advice = template.advice()?;
        let fallback = substitute(advice.fallback(), args, template.order());
        let fluent_args = args.localization_args(template.order());
        Some(
            self.localizer
                .message(advice.id(), Some(&fluent_args), &fallback),
        )
    }
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new(Arc::new(NoOpLocalizer::new()))
    }
}

impl fmt::Debug for MessageFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageFormatter")
            .field("localizer", &"<localizer>")
            .finish()
    }
}

/// Replaces `{0}`, `{1}` and `{file}` in `text`. Unknown placeholders are
/// left as written.
fn substitute(text: &str, args: &MessageArgs, order: ArgumentOrder) -> String {
    let positional = args.positional(order);
    let mut rendered = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        let (before, from_brace) = rest.split_at(open);
        rendered.push_str(before);
        let Some(close) = from_brace.find('}') else {
            rendered.push_str(from_brace);
            return rendered;
        };
        let (placeholder, after) = from_brace.split_at(close + 1);
        let key = placeholder.trim_start_matches('{').trim_end_matches('}');
        let replacement = match key {
            "file" => args.file.as_deref(),
            _ => key
                .parse::<usize>()
                .ok()
                .and_then(|idx| positional.get(idx).copied()),
        };
        rendered.push_str(replacement.unwrap_or(placeholder));
        rest = after;
    }
    rendered.push_str(rest);
    rendered
}
