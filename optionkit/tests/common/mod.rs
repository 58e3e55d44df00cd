//! Shared option declarations for integration tests.

use optionkit::convert::{ArrayConverter, Validator, builtin};
use optionkit::message::templates;
use optionkit::{Catalogue, MergePolicy, OptionError, OptionSpec, OptionsProcessor, Scope};

pub const APP: Scope = Scope::new("app");

/// Options of a small command with flags, a string, a counted level and
/// numeric arrays.
pub struct Demo {
    pub all: OptionSpec<bool>,
    pub verbose: OptionSpec<bool>,
    pub name: OptionSpec<String>,
    pub level: OptionSpec<u8>,
    pub number: OptionSpec<Vec<i64>>,
    pub tags: OptionSpec<Vec<String>>,
    pub catalogue: Catalogue,
}

impl Demo {
    pub fn processor(&self) -> OptionsProcessor {
        OptionsProcessor::new(self.catalogue.clone())
    }
}

pub fn positive() -> Validator<i64> {
    Validator::new(templates::VALIDATION_FAILED, |n: &i64| *n > 0)
}

pub fn demo() -> anyhow::Result<Demo> {
    let all = OptionSpec::flag(["--all", "-a"]).scope(APP).build()?;
    let verbose = OptionSpec::flag(["--verbose", "-v"])
        .scope(APP)
        .description("Print progress")
        .build()?;
    let name = OptionSpec::scalar(["--name", "-N"], builtin::string())
        .scope(APP)
        .value_pattern("NAME")
        .build()?;
    let level = OptionSpec::scalar(["--level", "-l"], builtin::integer::<u8>())
        .scope(APP)
        .default_for_missing_value("1")
        .default_value(0)
        .build()?;
    let number = OptionSpec::array(
        ["--number", "-n"],
        ArrayConverter::delimited(builtin::integer::<i64>().with_validator(positive()), ','),
    )
    .scope(APP)
    .build()?;
    let tags = OptionSpec::array(
        ["--tag", "-t"],
        ArrayConverter::delimited(builtin::string(), ','),
    )
    .scope(APP)
    .merge_policy(MergePolicy::Concatenate)
    .build()?;
    let catalogue = Catalogue::builder()
        .add(&all)
        .add(&verbose)
        .add(&name)
        .add(&level)
        .add(&number)
        .add(&tags)
        .build()?;
    Ok(Demo {
        all,
        verbose,
        name,
        level,
        number,
        tags,
        catalogue,
    })
}

/// Rendered message of every error, in order.
pub fn messages(err: &OptionError) -> Vec<String> {
    err.errors().iter().map(ToString::to_string).collect()
}
