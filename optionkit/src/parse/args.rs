//! Walking argv-style input.

use std::sync::Arc;

use super::{ErrorReport, Occurrence, ParserConfig, RawOptions};
use crate::message::MessageFormatter;
use crate::spec::{AnySpec, ValueArity};
use crate::{Catalogue, OptionName, OptionsResult};

const TERMINATOR: &str = "--";

/// Recognises options in command-line arguments.
///
/// Accepts `--name`, `--name value`, `--name=value`, `-x`, `-xvalue`,
/// `-x value` and `-x=value`; flags may be packed as `-abc`. Everything after
/// `--` is a non-option argument.
///
/// # Errors
///
/// Returns the recognition error at the earliest argument position: an
/// unrecognised, ambiguous or misused option, a missing argument, or one
/// error listing all non-option arguments. Later recognition errors are
/// only counted.
///
/// # Examples
///
/// ```rust
/// use optionkit::{Catalogue, OptionSpec, ParserConfig, Scope, parse_args};
/// use optionkit::convert::builtin;
/// use optionkit::message::MessageFormatter;
///
/// let name = OptionSpec::scalar(["--name", "-n"], builtin::string())
///     .scope(Scope::new("app"))
///     .build()?;
/// let catalogue = Catalogue::builder().add(&name).build()?;
/// let raw = parse_args(
///     &catalogue,
///     ["--name=first", "-n", "second"],
///     ParserConfig::default(),
///     &MessageFormatter::default(),
/// )?;
/// assert_eq!(raw.values(name.identifier()), ["first", "second"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_args<I, S>(
    catalogue: &Catalogue,
    args: I,
    config: ParserConfig,
    formatter: &MessageFormatter,
) -> OptionsResult<RawOptions>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let arguments: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut walker = ArgWalker {
        catalogue,
        config,
        args: &arguments,
        next: 0,
        raw: RawOptions::default(),
        report: ErrorReport::new(formatter, None),
    };
    walker.run();

    let ArgWalker { raw, report, .. } = walker;
    tracing::debug!(
        arguments = arguments.len(),
        options = raw.len(),
        occurrences = raw.occurrences().len(),
        "parsed command line"
    );
    report.finish().map_or(Ok(raw), Err)
}

enum LongMatch<'c> {
    Found(&'c AnySpec, &'c OptionName),
    Ambiguous(Vec<OptionName>),
    Unknown,
}

struct ArgWalker<'a> {
    catalogue: &'a Catalogue,
    config: ParserConfig,
    args: &'a [String],
    next: usize,
    raw: RawOptions,
    report: ErrorReport<'a>,
}

impl<'a> ArgWalker<'a> {
    fn run(&mut self) {
        let args = self.args;
        while let Some(arg) = args.get(self.next) {
            let position = self.next;
            self.next += 1;
            if arg == TERMINATOR {
                for (offset, rest) in args.iter().enumerate().skip(self.next) {
                    self.report.non_option(offset, rest);
                }
                self.next = args.len();
            } else if let Some(body) = arg.strip_prefix(TERMINATOR) {
                self.long(position, body);
            } else if let Some(body) = arg.strip_prefix('-').filter(|body| !body.is_empty()) {
                self.short_cluster(position, body);
            } else {
                self.report.non_option(position, arg);
            }
        }
    }

    fn long(&mut self, position: usize, body: &'a str) {
        let (key, inline) = match body.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (body, None),
        };
        let written = format!("{TERMINATOR}{key}");
        match self.resolve_long(key) {
            LongMatch::Found(spec, name) => {
                self.take_value(position, spec, name, &written, inline);
            }
            LongMatch::Ambiguous(candidates) => {
                self.report.ambiguous(position, &written, candidates);
            }
            LongMatch::Unknown => self.report.unrecognized(position, &written),
        }
    }

    fn short_cluster(&mut self, position: usize, body: &'a str) {
        if body.chars().nth(1).is_some() {
            let exact = self.exact_long(body);
            let leading = self.short_spec(body.chars().next());
            if let (Some(long), Some((_, short))) = (exact, leading) {
                self.report.ambiguous(
                    position,
                    &format!("-{body}"),
                    vec![long.clone(), short.clone()],
                );
                return;
            }
        }

        let mut rest = body;
        while let Some(letter) = rest.chars().next() {
            rest = rest.get(letter.len_utf8()..).unwrap_or_default();
            let written = format!("-{letter}");
            let Some((spec, name)) = self.short_spec(Some(letter)) else {
                self.report.unrecognized(position, &written);
                return;
            };
            if spec.arity() == ValueArity::None {
                if let Some(value) = rest.strip_prefix('=') {
                    self.report
                        .unexpected_argument(position, name, &written, value);
                    return;
                }
                self.raw
                    .record(spec, Occurrence::new(name.clone(), written, None, position));
                continue;
            }
            let inline = (!rest.is_empty()).then(|| rest.strip_prefix('=').unwrap_or(rest));
            self.take_value(position, spec, name, &written, inline);
            return;
        }
    }

    fn take_value(
        &mut self,
        position: usize,
        spec: &AnySpec,
        name: &OptionName,
        written: &str,
        inline: Option<&str>,
    ) {
        let args = self.args;
        let raw = match (spec.arity(), inline) {
            (ValueArity::None, Some(value)) => {
                self.report
                    .unexpected_argument(position, name, written, value);
                return;
            }
            (ValueArity::None, None) => None,
            (_, Some(value)) => Some(Arc::from(value)),
            (ValueArity::Required, None) => match args.get(self.next) {
                Some(next) if !self.is_recognized_option(next) => {
                    self.next += 1;
                    Some(Arc::from(next.as_str()))
                }
                _ => {
                    self.report.missing_argument(position, name, written);
                    return;
                }
            },
            (ValueArity::Optional, None) => match args.get(self.next) {
                Some(next) if !is_option_shaped(next) => {
                    self.next += 1;
                    Some(Arc::from(next.as_str()))
                }
                _ => spec.default_for_missing_value().cloned(),
            },
        };
        self.raw
            .record(spec, Occurrence::new(name.clone(), written, raw, position));
    }

    fn resolve_long(&self, key: &str) -> LongMatch<'a> {
        if key.is_empty() {
            return LongMatch::Unknown;
        }
        if !self.config.abbreviations {
            return self
                .exact_long(key)
                .and_then(|name| Some((self.catalogue.find_name(name)?, name)))
                .map_or(LongMatch::Unknown, |(spec, name)| LongMatch::Found(spec, name));
        }
        let candidates = self.catalogue.long_names_with_prefix(key);
        match candidates.as_slice() {
            [] => LongMatch::Unknown,
            [name] => self
                .catalogue
                .find_name(name)
                .map_or(LongMatch::Unknown, |spec| LongMatch::Found(spec, *name)),
            many => LongMatch::Ambiguous(many.iter().map(|name| (*name).clone()).collect()),
        }
    }

    fn exact_long(&self, key: &str) -> Option<&'a OptionName> {
        let name = OptionName::from_bare(key).ok().filter(OptionName::is_long)?;
        let spec = self.catalogue.find_name(&name)?;
        spec.names().iter().find(|declared| **declared == name)
    }

    fn short_spec(&self, letter: Option<char>) -> Option<(&'a AnySpec, &'a OptionName)> {
        let mut buffer = [0_u8; 4];
        let name = OptionName::from_bare(letter?.encode_utf8(&mut buffer)).ok()?;
        let spec = self.catalogue.find_name(&name)?;
        let declared = spec.names().iter().find(|declared| **declared == name)?;
        Some((spec, declared))
    }

    /// Whether `arg` would be consumed as an option rather than a value.
    fn is_recognized_option(&self, arg: &str) -> bool {
        if arg == TERMINATOR {
            return true;
        }
        if let Some(body) = arg.strip_prefix(TERMINATOR) {
            let key = body.split_once('=').map_or(body, |(key, _)| key);
            return !matches!(self.resolve_long(key), LongMatch::Unknown);
        }
        arg.strip_prefix('-')
            .is_some_and(|body| self.short_spec(body.chars().next()).is_some())
    }
}

fn is_option_shaped(arg: &str) -> bool {
    arg.len() > 1 && arg.starts_with('-')
}
