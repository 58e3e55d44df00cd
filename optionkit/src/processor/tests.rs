//! Unit tests for the conversion pass.

use rstest::{fixture, rstest};

use super::*;
use crate::convert::{ArrayConverter, Validator, builtin};
use crate::merge::MergePolicy;
use crate::message::templates;
use crate::spec::{OptionSpec, Scope};
use crate::{OptionError, ValueErrorKind};

const APP: Scope = Scope::new("app");

struct Fixture {
    processor: OptionsProcessor,
    verbose: OptionSpec<bool>,
    count: OptionSpec<u32>,
    first: OptionSpec<String>,
    level: OptionSpec<u8>,
    number: OptionSpec<Vec<i64>>,
    tags: OptionSpec<Vec<String>>,
}

fn positive() -> Validator<i64> {
    Validator::new(templates::VALIDATION_FAILED, |n: &i64| *n > 0)
}

#[fixture]
fn fixture() -> Fixture {
    let verbose = OptionSpec::flag(["--verbose", "-v"])
        .scope(APP)
        .build()
        .expect("verbose");
    let count = OptionSpec::scalar(["--count", "-c"], builtin::integer::<u32>())
        .scope(APP)
        .build()
        .expect("count");
    let first = OptionSpec::scalar(["--first"], builtin::string())
        .scope(APP)
        .merge_policy(MergePolicy::UseFirst)
        .build()
        .expect("first");
    let level = OptionSpec::scalar(["--level", "-l"], builtin::integer::<u8>())
        .scope(APP)
        .default_for_missing_value("1")
        .build()
        .expect("level");
    let number = OptionSpec::array(
        ["--number", "-n"],
        ArrayConverter::delimited(builtin::integer::<i64>().with_validator(positive()), ','),
    )
    .scope(APP)
    .build()
    .expect("number");
    let tags = OptionSpec::array(["--tag", "-t"], ArrayConverter::delimited(builtin::string(), ','))
        .scope(APP)
        .merge_policy(MergePolicy::Concatenate)
        .build()
        .expect("tags");
    let catalogue = Catalogue::builder()
        .add(&verbose)
        .add(&count)
        .add(&first)
        .add(&level)
        .add(&number)
        .add(&tags)
        .build()
        .expect("catalogue");
    Fixture {
        processor: OptionsProcessor::new(catalogue),
        verbose,
        count,
        first,
        level,
        number,
        tags,
    }
}

fn value_errors(err: &OptionError) -> Vec<(ValueErrorKind, String, String)> {
    err.errors()
        .iter()
        .filter_map(|error| error.value_error())
        .map(|error| {
            (
                error.kind(),
                error.option().to_owned(),
                error.token().value().to_owned(),
            )
        })
        .collect()
}

#[rstest]
fn flags_are_true_when_present(fixture: Fixture) {
    let options = fixture.processor.process(["-v"]).expect("valid");
    assert_eq!(fixture.verbose.value().find(&options), Some(&true));
    assert!(!fixture.count.value().contained_in(&options));
}

#[rstest]
fn last_occurrence_wins_even_when_earlier_ones_are_invalid(fixture: Fixture) {
    let options = fixture
        .processor
        .process(["--count=oops", "-c", "-3", "--count", "12"])
        .expect("last value is valid");
    assert_eq!(fixture.count.value().find(&options), Some(&12));
}

#[rstest]
fn failing_last_occurrence_is_reported_as_written(fixture: Fixture) {
    let err = fixture
        .processor
        .process(["--count", "1", "--cou=x"])
        .expect_err("invalid last value");
    assert_eq!(
        value_errors(&err),
        [(ValueErrorKind::Conversion, "--cou".to_owned(), "x".to_owned())]
    );
    assert_eq!(err.to_string(), "Option --cou expects a number, but was given 'x'");
}

#[rstest]
fn use_first_keeps_the_first_occurrence(fixture: Fixture) {
    let options = fixture
        .processor
        .process(["--first", "a", "--first", "b"])
        .expect("valid");
    assert_eq!(
        fixture.first.value().find(&options).map(String::as_str),
        Some("a")
    );
}

#[rstest]
fn default_for_missing_value_is_converted(fixture: Fixture) {
    let options = fixture.processor.process(["--level"]).expect("valid");
    assert_eq!(fixture.level.value().find(&options), Some(&1));
}

#[rstest]
fn every_bad_array_element_is_reported_in_order(fixture: Fixture) {
    let err = fixture
        .processor
        .process(["--number=56,23", "-n", "2,-17,0,56"])
        .expect_err("invalid elements");
    assert_eq!(
        value_errors(&err),
        [
            (ValueErrorKind::Validation, "-n".to_owned(), "-17".to_owned()),
            (ValueErrorKind::Validation, "-n".to_owned(), "0".to_owned()),
        ]
    );
    let offsets: Vec<_> = err
        .errors()
        .iter()
        .filter_map(|error| error.value_error())
        .map(|error| error.token().offset())
        .collect();
    assert_eq!(offsets, [2, 6]);
}

#[rstest]
fn concatenate_flattens_occurrences_in_order(fixture: Fixture) {
    let options = fixture
        .processor
        .process(["-t", "a,b", "--tag=b", "-tc"])
        .expect("valid");
    assert_eq!(
        fixture.tags.value().find(&options).cloned(),
        Some(vec!["a".to_owned(), "b".to_owned(), "b".to_owned(), "c".to_owned()])
    );
}

#[rstest]
fn errors_of_different_options_keep_first_occurrence_order(fixture: Fixture) {
    let err = fixture
        .processor
        .process(["-n", "-1", "--count", "x", "-n", "-2"])
        .expect_err("several failures");
    let options: Vec<_> = value_errors(&err)
        .into_iter()
        .map(|(_, option, value)| format!("{option}={value}"))
        .collect();
    assert_eq!(options, ["-n=-2", "--count=x"]);
}

#[rstest]
fn recognition_errors_skip_conversion(fixture: Fixture) {
    let err = fixture
        .processor
        .process(["--count", "x", "--bogus"])
        .expect_err("unknown option");
    assert!(matches!(err, OptionError::UnrecognizedOption { .. }));
}

#[rstest]
fn excluded_options_are_not_converted(fixture: Fixture) {
    let raw = fixture
        .processor
        .parse(["--count", "x", "-v"])
        .expect("recognised");
    let options = fixture
        .processor
        .convert(&raw.copy_with_excludes([fixture.count.identifier()]))
        .expect("count excluded");
    assert!(fixture.verbose.value().contained_in(&options));
    assert!(!fixture.count.value().contained_in(&options));
}

#[rstest]
fn options_on_the_same_line_are_unaffected_by_a_failing_one(fixture: Fixture) {
    let raw = fixture
        .processor
        .parse(["-v", "-n", "3,x", "--count", "4"])
        .expect("recognised");
    let err = fixture.processor.convert(&raw).expect_err("bad element");
    assert_eq!(
        value_errors(&err),
        [(ValueErrorKind::Conversion, "-n".to_owned(), "x".to_owned())]
    );
    let options = fixture
        .processor
        .convert(&raw.copy_with_excludes([fixture.number.identifier()]))
        .expect("rest converts");
    assert_eq!(fixture.count.value().find(&options), Some(&4));
}
