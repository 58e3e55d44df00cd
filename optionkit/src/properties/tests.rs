//! Unit tests for property-file reading.

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use rstest::rstest;

use super::*;
use crate::convert::builtin;
use crate::spec::{OptionSpec, Scope};
use crate::OptionsProcessor;

const APP: Scope = Scope::new("app");

fn pairs(text: &str) -> Vec<(String, String, usize)> {
    parse_properties(text)
        .into_iter()
        .map(|line| (line.key, line.value, line.line))
        .collect()
}

#[rstest]
#[case("name=value", "name", "value")]
#[case("name = value", "name", "value")]
#[case("  name:value", "name", "value")]
#[case("name: a=b", "name", "a=b")]
#[case("name", "name", "")]
#[case("name=", "name", "")]
#[case("name = trailing  ", "name", "trailing  ")]
fn lines_split_at_the_first_separator(
    #[case] text: &str,
    #[case] key: &str,
    #[case] value: &str,
) {
    assert_eq!(pairs(text), [(key.to_owned(), value.to_owned(), 1)]);
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let text = "# comment\n\n   ! also a comment\nname=x\n   \nlevel=2\n";
    let lines: Vec<_> = pairs(text)
        .into_iter()
        .map(|(key, _, line)| (key, line))
        .collect();
    assert_eq!(lines, [("name".to_owned(), 4), ("level".to_owned(), 6)]);
}

#[test]
fn missing_file_is_a_file_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.properties"))
        .expect("utf-8 temp path");
    let err = read_property_file(&path).expect_err("file is absent");
    match err {
        OptionError::File { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected File, got {other:?}"),
    }
}

fn processor() -> Result<(OptionsProcessor, OptionSpec<bool>, OptionSpec<u8>)> {
    let verbose = OptionSpec::flag(["--verbose", "-v"]).scope(APP).build()?;
    let level = OptionSpec::scalar(["--level", "-l"], builtin::integer::<u8>())
        .scope(APP)
        .default_for_missing_value("1")
        .build()?;
    let catalogue = Catalogue::builder().add(&verbose).add(&level).build()?;
    Ok((OptionsProcessor::new(catalogue), verbose, level))
}

#[rstest]
#[case("verbose=true", true)]
#[case("verbose=TRUE", true)]
#[case("verbose=yes", false)]
#[case("verbose=", false)]
fn flags_read_boolean_text(#[case] text: &str, #[case] expected: bool) -> Result<()> {
    let (processor, verbose, _) = processor()?;
    let raw = processor.parse_property_text(Utf8Path::new("app.properties"), text)?;
    let options = processor.convert(&raw)?;
    assert_eq!(verbose.value().find(&options), Some(&expected));
    Ok(())
}

#[test]
fn empty_value_uses_the_default_for_missing_value() -> Result<()> {
    let (processor, _, level) = processor()?;
    let raw = processor.parse_property_text(Utf8Path::new("app.properties"), "level =")?;
    let options = processor.convert(&raw)?;
    assert_eq!(level.value().find(&options), Some(&1));
    Ok(())
}

#[rstest]
#[case("--level=2")]
#[case("l=2")]
#[case("lev=2")]
#[case("colour=red")]
fn keys_must_be_exact_long_names(#[case] text: &str) -> Result<()> {
    let (processor, _, _) = processor()?;
    let err = processor
        .parse_property_text(Utf8Path::new("app.properties"), text)
        .err()
        .context("key should be rejected")?;
    assert!(matches!(err, OptionError::UnrecognizedOption { .. }));
    assert!(err.to_string().contains("in file 'app.properties'"));
    Ok(())
}

#[test]
fn conversion_errors_name_the_key_and_file() -> Result<()> {
    let (processor, _, _) = processor()?;
    let raw = processor.parse_property_text(Utf8Path::new("conf/app.properties"), "level=high")?;
    let err = processor
        .convert(&raw)
        .err()
        .context("level should fail")?;
    assert_eq!(
        err.to_string(),
        "Property 'level' in file 'conf/app.properties' expects a number, but was given 'high'"
    );
    assert_eq!(err.option(), Some("level"));
    Ok(())
}
