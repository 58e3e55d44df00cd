//! Reading options from property files on disk.
#![expect(
    clippy::panic_in_result_fn,
    reason = "assertions state the expected outcome of each scenario"
)]

#[expect(
    dead_code,
    reason = "this binary uses only part of the shared declarations"
)]
mod common;

use anyhow::{Context, Result};
use camino::Utf8Path;
use common::{demo, messages};
use optionkit::OptionError;
use test_helpers::cwd;
use test_helpers::properties::{PropertyFile, property_text};

#[test]
fn property_file_values_go_through_the_same_conversion() -> Result<()> {
    let demo = demo()?;
    let file = PropertyFile::write(
        "app.properties",
        "# demo settings\nname = build\nverbose: TRUE\nnumber=3,5\ntag=a\ntag=b,c\n",
    )?;
    let options = demo.processor().process_property_file(file.path())?;

    assert_eq!(
        demo.name.value().find(&options).map(String::as_str),
        Some("build")
    );
    assert_eq!(demo.verbose.value().find(&options), Some(&true));
    assert_eq!(demo.number.value().find(&options), Some(&vec![3, 5]));
    assert_eq!(
        demo.tags.value().find(&options).cloned(),
        Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
    );
    Ok(())
}

#[test]
fn errors_name_the_key_and_the_file() -> Result<()> {
    let demo = demo()?;
    let file = PropertyFile::write(
        "app.properties",
        &property_text(&[("level", "loud"), ("number", "4,-2")]),
    )?;
    let err = demo
        .processor()
        .process_property_file(file.path())
        .err()
        .context("invalid values")?;
    let path = file.path();
    assert_eq!(
        messages(&err),
        [
            format!("Property 'level' in file '{path}' expects a number, but was given 'loud'"),
            format!("Value '-2' of property 'number' in file '{path}' is not valid"),
        ]
    );
    let options: Vec<_> = err
        .errors()
        .into_iter()
        .filter_map(OptionError::option)
        .collect();
    assert_eq!(options, ["level", "number"]);
    Ok(())
}

#[test]
fn unknown_keys_are_reported_once() -> Result<()> {
    let demo = demo()?;
    let file = PropertyFile::write("app.properties", "colour=red\nsize=9\nname=x\n")?;
    let err = demo
        .processor()
        .process_property_file(file.path())
        .err()
        .context("unknown keys")?;
    assert_eq!(
        messages(&err),
        [format!(
            "Unrecognized property 'colour' in file '{}'",
            file.path()
        )]
    );
    Ok(())
}

#[test]
fn unreadable_files_become_file_errors() -> Result<()> {
    let demo = demo()?;
    let file = PropertyFile::missing("absent.properties")?;
    let err = demo
        .processor()
        .process_property_file(file.path())
        .err()
        .context("file is absent")?;
    match &err {
        OptionError::File { path, .. } => assert_eq!(path, file.path()),
        other => panic!("expected File, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Failed to read property file"));
    Ok(())
}

#[test]
fn relative_paths_resolve_against_the_working_directory() -> Result<()> {
    let demo = demo()?;
    let file = PropertyFile::write("local.properties", "level=\n")?;
    let guard = cwd::set_dir(file.dir())?;
    let result = demo
        .processor()
        .process_property_file(Utf8Path::new("local.properties"));
    guard.restore()?;
    let options = result?;
    assert_eq!(demo.level.value().find(&options), Some(&1));
    Ok(())
}
