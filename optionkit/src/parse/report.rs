//! Collects recognition errors while input is being parsed.

use camino::Utf8Path;

use crate::message::{MessageArgs, MessageFormatter, MessageTemplate, templates};
use crate::{OptionError, OptionName};

/// Recognition errors of one parse.
///
/// Only the earliest error by input position is surfaced. Later ones are
/// counted, and all non-option arguments are folded into one error at the
/// position of the first.
pub(crate) struct ErrorReport<'a> {
    formatter: &'a MessageFormatter,
    file: Option<&'a Utf8Path>,
    first: Option<(usize, OptionError)>,
    suppressed: usize,
    non_options: Vec<(usize, String)>,
}

impl<'a> ErrorReport<'a> {
    pub(crate) const fn new(formatter: &'a MessageFormatter, file: Option<&'a Utf8Path>) -> Self {
        Self {
            formatter,
            file,
            first: None,
            suppressed: 0,
            non_options: Vec::new(),
        }
    }

    fn render(&self, template: &MessageTemplate, args: MessageArgs) -> String {
        let located = args.maybe_file(self.file.map(Utf8Path::as_str));
        if self.file.is_some() {
            self.formatter.format(&template.in_file(), &located)
        } else {
            self.formatter.format(template, &located)
        }
    }

    /// Keeps the error built by `build` unless an earlier one is already held.
    fn keep(&mut self, position: usize, build: impl FnOnce(&Self) -> OptionError) {
        match &self.first {
            Some((held, _)) if *held <= position => {
                self.suppressed += 1;
                return;
            }
            Some(_) => self.suppressed += 1,
            None => {}
        }
        let error = build(&*self);
        self.first = Some((position, error));
    }

    pub(crate) fn unrecognized(&mut self, position: usize, option: &str) {
        self.keep(position, |report| OptionError::UnrecognizedOption {
            option: option.to_owned(),
            message: report.render(
                &templates::UNRECOGNIZED_OPTION,
                MessageArgs::new().name(option),
            ),
        });
    }

    pub(crate) fn missing_argument(&mut self, position: usize, name: &OptionName, option: &str) {
        self.keep(position, |report| OptionError::MissingArgument {
            name: name.clone(),
            option: option.to_owned(),
            message: report.render(
                &templates::MISSING_ARGUMENT,
                MessageArgs::new().name(option),
            ),
        });
    }

    pub(crate) fn unexpected_argument(
        &mut self,
        position: usize,
        name: &OptionName,
        option: &str,
        value: &str,
    ) {
        self.keep(position, |report| OptionError::UnexpectedArgument {
            name: name.clone(),
            option: option.to_owned(),
            value: value.to_owned(),
            message: report.render(
                &templates::UNEXPECTED_ARGUMENT,
                MessageArgs::new().name(option).value(value),
            ),
        });
    }

    pub(crate) fn ambiguous(&mut self, position: usize, option: &str, candidates: Vec<OptionName>) {
        self.keep(position, |report| {
            let listed = candidates
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            OptionError::AmbiguousOption {
                option: option.to_owned(),
                message: report.render(
                    &templates::AMBIGUOUS_OPTION,
                    MessageArgs::new().name(option).value(listed),
                ),
                candidates,
            }
        });
    }

    pub(crate) fn non_option(&mut self, position: usize, argument: &str) {
        self.non_options.push((position, argument.to_owned()));
    }

    /// The first recognition error, or `None` when the input was clean.
    pub(crate) fn finish(mut self) -> Option<OptionError> {
        if let Some(&(position, _)) = self.non_options.first() {
            let arguments: Vec<String> = self
                .non_options
                .drain(..)
                .map(|(_, argument)| argument)
                .collect();
            self.keep(position, |report| {
                let message = report.render(
                    &templates::NON_OPTION_ARGUMENTS,
                    MessageArgs::new()
                        .value(arguments.len().to_string())
                        .name(arguments.join(" ")),
                );
                OptionError::NonOptionArguments { arguments, message }
            });
        }
        if self.suppressed > 0 {
            tracing::debug!(
                suppressed = self.suppressed,
                "suppressed recognition errors after the first"
            );
        }
        self.first.map(|(_, error)| error)
    }
}
