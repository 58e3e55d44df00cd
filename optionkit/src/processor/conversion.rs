//! The conversion and validation pass over parsed options.

use std::sync::Arc;

use camino::Utf8Path;

use crate::convert::ConversionFailure;
use crate::error::ValueError;
use crate::merge::selected_occurrences;
use crate::message::{MessageArgs, MessageFormatter};
use crate::parse::{Occurrence, RawEntry, RawOptions};
use crate::spec::{AnySpec, ErasedConverter};
use crate::{OptionError, Options, OptionsResult, StringToken};

type Stored = Arc<dyn std::any::Any + Send + Sync>;

/// Converts every entry of `raw`, collecting all failures in the order
/// their options first appeared.
pub(crate) fn convert_all(raw: &RawOptions, formatter: &MessageFormatter) -> OptionsResult<Options> {
    let mut options = Options::new();
    let mut errors = Vec::new();
    for entry in raw.entries() {
        match convert_entry(entry, formatter) {
            Ok(value) => options.insert(&entry.spec, value),
            Err(failures) => errors.extend(failures),
        }
    }
    tracing::debug!(
        converted = options.len(),
        errors = errors.len(),
        "converted options"
    );
    OptionError::try_aggregate(errors).map_or(Ok(options), Err)
}

fn raw_text(occurrence: &Occurrence) -> Arc<str> {
    occurrence.raw().cloned().unwrap_or_else(|| Arc::from(""))
}

fn convert_entry(entry: &RawEntry, formatter: &MessageFormatter) -> Result<Stored, Vec<OptionError>> {
    let spec = &entry.spec;
    let policy = spec.merge_policy();
    let selected = selected_occurrences(policy, entry.occurrences.len());
    match spec.converter() {
        ErasedConverter::Flag => Ok(Arc::new(true)),
        ErasedConverter::Scalar(converter) => {
            let mut outcome = Err(Vec::new());
            for (index, occurrence) in entry.occurrences.iter().enumerate() {
                let kept = index == selected.start;
                match converter.convert_erased(&StringToken::whole(raw_text(occurrence))) {
                    Ok(value) if kept => outcome = Ok(Stored::from(value)),
                    Err(failure) if kept => {
                        outcome = Err(vec![render(spec, occurrence, failure, formatter)]);
                    }
                    Ok(_) => {}
                    Err(failure) => tracing::trace!(
                        option = occurrence.written(),
                        value = failure.token.value(),
                        "ignoring failure of a discarded occurrence"
                    ),
                }
            }
            outcome
        }
        ErasedConverter::Array(converter) => {
            let chosen = entry.occurrences.get(selected).unwrap_or_default();
            let raws: Vec<Arc<str>> = chosen.iter().map(raw_text).collect();
            converter
                .convert_occurrences(policy, &raws)
                .map(Stored::from)
                .map_err(|failed| {
                    failed
                        .into_iter()
                        .filter_map(|(index, failures)| Some((chosen.get(index)?, failures)))
                        .flat_map(|(occurrence, failures)| {
                            failures
                                .into_iter()
                                .map(move |failure| render(spec, occurrence, failure, formatter))
                        })
                        .collect()
                })
        }
    }
}

fn render(
    spec: &AnySpec,
    occurrence: &Occurrence,
    failure: ConversionFailure,
    formatter: &MessageFormatter,
) -> OptionError {
    let option = spec.present(occurrence.name(), occurrence.written());
    let args = MessageArgs::new()
        .value(failure.token.value())
        .name(option.as_str())
        .maybe_file(spec.property_file().map(Utf8Path::as_str));
    let message = formatter.format(&failure.template, &args);
    let advice = formatter.advice(&failure.template, &args);
    OptionError::from(ValueError {
        kind: failure.kind,
        option,
        name: occurrence.name().clone(),
        token: failure.token,
        message,
        advice,
        cause: failure.cause,
    })
}
