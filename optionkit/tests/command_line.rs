//! End-to-end processing of command lines.
#![expect(
    clippy::panic_in_result_fn,
    reason = "assertions state the expected outcome of each scenario"
)]

mod common;

use anyhow::{Context, Result};
use common::{demo, messages};
use optionkit::{OptionError, ValueErrorKind};
use rstest::rstest;

#[test]
fn every_failing_array_element_is_reported() -> Result<()> {
    let demo = demo()?;
    let err = demo
        .processor()
        .process(["--number=56,23", "-n", "2,-17,0,56"])
        .err()
        .context("two elements are not positive")?;

    let failures: Vec<_> = err
        .errors()
        .iter()
        .filter_map(|error| error.value_error())
        .map(|error| {
            (
                error.kind(),
                error.option().to_owned(),
                error.token().value().to_owned(),
                error.token().tokenized_string().to_owned(),
            )
        })
        .collect();
    assert_eq!(
        failures,
        [
            (
                ValueErrorKind::Validation,
                "-n".to_owned(),
                "-17".to_owned(),
                "2,-17,0,56".to_owned()
            ),
            (
                ValueErrorKind::Validation,
                "-n".to_owned(),
                "0".to_owned(),
                "2,-17,0,56".to_owned()
            ),
        ]
    );
    assert_eq!(
        messages(&err),
        [
            "Value '-17' of option -n is not valid",
            "Value '0' of option -n is not valid"
        ]
    );
    Ok(())
}

#[test]
fn valid_arrays_keep_the_last_occurrence() -> Result<()> {
    let demo = demo()?;
    let options = demo
        .processor()
        .process(["--number=56,23", "-n", "2,17"])?;
    assert_eq!(demo.number.value().find(&options), Some(&vec![2, 17]));
    Ok(())
}

#[rstest]
#[case(&["-a"], true)]
#[case(&[], false)]
fn flags_report_presence(#[case] args: &[&str], #[case] present: bool) -> Result<()> {
    let demo = demo()?;
    let options = demo.processor().process(args.iter().copied())?;
    assert_eq!(demo.all.value().contained_in(&options), present);
    assert_eq!(demo.all.value().get_or_default(&options), present);
    Ok(())
}

#[rstest]
#[case(&["--name=value"])]
#[case(&["--name", "value"])]
#[case(&["-Nvalue"])]
#[case(&["-N", "value"])]
fn value_spellings_are_equivalent(#[case] args: &[&str]) -> Result<()> {
    let demo = demo()?;
    let options = demo.processor().process(args.iter().copied())?;
    assert_eq!(
        demo.name.value().find(&options).map(String::as_str),
        Some("value")
    );
    Ok(())
}

#[test]
fn absent_options_fall_back_to_declared_defaults() -> Result<()> {
    let demo = demo()?;
    let options = demo.processor().process(["-v"])?;
    assert!(!demo.level.value().contained_in(&options));
    assert_eq!(demo.level.value().get_or_default(&options), 0);
    let given = demo.processor().process(["--level"])?;
    assert_eq!(demo.level.value().get_or_default(&given), 1);
    Ok(())
}

#[test]
fn concatenated_arrays_keep_duplicates() -> Result<()> {
    let demo = demo()?;
    let options = demo
        .processor()
        .process(["--tag", "x,y", "-tx", "--tag=", "-vt", "z"])?;
    assert_eq!(
        demo.tags.value().find(&options).cloned(),
        Some(vec![
            "x".to_owned(),
            "y".to_owned(),
            "x".to_owned(),
            String::new(),
            "z".to_owned()
        ])
    );
    assert!(demo.verbose.value().contained_in(&options));
    Ok(())
}

#[test]
fn recognition_errors_come_before_conversion() -> Result<()> {
    let demo = demo()?;
    let err = demo
        .processor()
        .process(["--level=high", "--nonsense", "--bogus", "stray", "--name"])
        .err()
        .context("bad command line")?;
    assert!(err.is_recognition());
    assert_eq!(messages(&err), ["Unrecognized option: --nonsense"]);
    Ok(())
}

#[test]
fn only_the_first_recognition_error_is_surfaced() -> Result<()> {
    let demo = demo()?;
    let err = demo
        .processor()
        .process(["--name", "--level=3", "--bogus", "--number"])
        .err()
        .context("two missing values and an unknown option")?;
    assert_eq!(err.errors().len(), 1);
    assert_eq!(messages(&err), ["Option --name requires an argument"]);
    Ok(())
}

#[test]
fn aggregated_errors_render_numbered_lines() -> Result<()> {
    let demo = demo()?;
    let err = demo
        .processor()
        .process(["--level=high", "-n", "x"])
        .err()
        .context("two conversion failures")?;
    assert!(matches!(err, OptionError::Aggregate(_)));
    assert_eq!(
        err.to_string(),
        "multiple option errors:\n\
         1: Option --level expects a number, but was given 'high'\n\
         2: Option -n expects a number, but was given 'x'"
    );
    Ok(())
}
