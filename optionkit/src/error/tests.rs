//! Unit tests for error aggregation and inspection helpers.

use rstest::rstest;
use std::error::Error as _;
use std::sync::Arc;

use super::{OptionError, ValueError, ValueErrorKind};
use crate::{OptionName, StringToken};

fn unrecognized(option: &str) -> OptionError {
    OptionError::UnrecognizedOption {
        option: option.to_owned(),
        message: format!("Unrecognized option {option}"),
    }
}

fn value_error(kind: ValueErrorKind) -> ValueError {
    let cause: Arc<dyn std::error::Error + Send + Sync> =
        Arc::new("x".parse::<i32>().expect_err("not a number"));
    ValueError {
        kind,
        option: "--count".to_owned(),
        name: OptionName::parse("--count").expect("valid name"),
        token: StringToken::whole("x"),
        message: "Invalid value 'x' of option --count".to_owned(),
        advice: Some("Use digits".to_owned()),
        cause: Some(cause),
    }
}

fn run_aggregate_tests<F>(name: &str, runner: F)
where
    F: Fn(Vec<Arc<OptionError>>) -> OptionError,
{
    assert_single_owned(name, &runner);
    assert_single_shared(name, &runner);
    assert_multi_entry(name, &runner);
}

fn assert_single_owned<F>(name: &str, runner: &F)
where
    F: Fn(Vec<Arc<OptionError>>) -> OptionError,
{
    let outcome = runner(vec![Arc::new(unrecognized("--a"))]);
    assert!(
        matches!(outcome, OptionError::UnrecognizedOption { .. }),
        "{name}: expected UnrecognizedOption, got {outcome:?}"
    );
}

fn assert_single_shared<F>(name: &str, runner: &F)
where
    F: Fn(Vec<Arc<OptionError>>) -> OptionError,
{
    let shared = Arc::new(unrecognized("--a"));
    let outcome = runner(vec![Arc::clone(&shared)]);
    match outcome {
        OptionError::Aggregate(aggregate) => {
            assert_eq!(aggregate.len(), 1, "{name}: expected one entry");
        }
        other => panic!("{name}: expected Aggregate, got {other:?}"),
    }
}

fn assert_multi_entry<F>(name: &str, runner: &F)
where
    F: Fn(Vec<Arc<OptionError>>) -> OptionError,
{
    let outcome = runner(vec![
        Arc::new(unrecognized("--a")),
        Arc::new(unrecognized("--b")),
    ]);
    match outcome {
        OptionError::Aggregate(aggregate) => assert_eq!(aggregate.len(), 2, "{name}"),
        other => panic!("{name}: expected Aggregate, got {other:?}"),
    }
}

#[test]
fn aggregate_behaviour() {
    run_aggregate_tests("aggregate", OptionError::aggregate);
}

#[test]
fn try_aggregate_behaviour() {
    run_aggregate_tests("try_aggregate", |errors| {
        OptionError::try_aggregate(errors).expect("non-empty input")
    });
}

#[test]
fn try_aggregate_of_nothing_is_none() {
    assert!(OptionError::try_aggregate(Vec::<OptionError>::new()).is_none());
}

#[test]
fn errors_flattens_nested_aggregates_in_order() {
    let inner = OptionError::aggregate(vec![unrecognized("--b"), unrecognized("--c")]);
    let outer = OptionError::aggregate(vec![unrecognized("--a"), inner]);
    let options: Vec<_> = outer.errors().iter().filter_map(|e| e.option()).collect();
    assert_eq!(options, vec!["--a", "--b", "--c"]);
    assert_eq!(outer.first().option(), Some("--a"));
}

#[test]
fn aggregate_display_numbers_entries() {
    let err = OptionError::aggregate(vec![unrecognized("--a"), unrecognized("--b")]);
    let rendered = err.to_string();
    assert!(rendered.contains("1: Unrecognized option --a"));
    assert!(rendered.contains("2: Unrecognized option --b"));
}

#[rstest]
#[case(ValueErrorKind::Conversion)]
#[case(ValueErrorKind::Validation)]
fn value_errors_map_to_matching_variant(#[case] kind: ValueErrorKind) {
    let err = OptionError::from(value_error(kind));
    match (&err, kind) {
        (OptionError::Conversion(_), ValueErrorKind::Conversion)
        | (OptionError::Validation(_), ValueErrorKind::Validation) => {}
        _ => panic!("unexpected variant {err:?}"),
    }
    assert_eq!(err.to_string(), "Invalid value 'x' of option --count");
    assert_eq!(err.advice(), Some("Use digits"));
    assert_eq!(err.option(), Some("--count"));
    assert!(!err.is_recognition());
}

#[test]
fn value_error_exposes_cause_as_source() {
    let err = value_error(ValueErrorKind::Conversion);
    let source = err.source().expect("cause should be the source");
    assert!(source.to_string().contains("invalid digit"));
    assert_eq!(err.token().value(), "x");
}

#[test]
fn recognition_errors_are_classified() {
    assert!(unrecognized("--a").is_recognition());
    let file = OptionError::File {
        path: "missing.properties".into(),
        source: std::io::Error::from(std::io::ErrorKind::NotFound),
    };
    assert!(!file.is_recognition());
    assert!(file.to_string().contains("missing.properties"));
}
