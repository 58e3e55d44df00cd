//! Unit tests for message lookup backends.

use std::sync::{Arc, Mutex};

use fluent_bundle::FluentValue;
use rstest::rstest;
use unic_langid::langid;

use super::*;

fn value_args(value: &'static str, name: &'static str) -> LocalizationArgs<'static> {
    LocalizationArgs::from([
        ("arg0", FluentValue::from(value)),
        ("arg1", FluentValue::from(name)),
    ])
}

fn recording_hook() -> (RenderFailureHook, Arc<Mutex<Vec<(String, CatalogueLayer)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let hook: RenderFailureHook = Arc::new(move |failure: &RenderFailure<'_>| {
        sink.lock().expect("failure log").push((failure.id.to_owned(), failure.layer));
    });
    (hook, seen)
}

#[test]
fn noop_localizer_uses_the_fallback() {
    assert_eq!(
        NoOpLocalizer::new().message("optionkit-invalid-value", None, "fallback"),
        "fallback"
    );
}

#[rstest]
#[case("optionkit-invalid-value", "Invalid value 'x1' of option --count")]
#[case("optionkit-invalid-number", "Option --count expects a number, but was given 'x1'")]
fn embedded_catalogue_renders_engine_messages(#[case] id: &str, #[case] expected: &str) {
    let localizer = FluentLocalizer::embedded(langid!("en-US")).expect("embedded catalogue");
    let resolved = localizer.lookup(id, Some(&value_args("x1", "--count")));
    assert_eq!(resolved.as_deref(), Some(expected));
}

#[test]
fn application_messages_take_precedence() {
    let localizer = FluentLocalizer::builder(langid!("en-US"))
        .messages("optionkit-invalid-value = { $arg1 } cannot be { $arg0 }")
        .try_build()
        .expect("localizer");
    let args = value_args("x1", "--count");
    assert_eq!(
        localizer.lookup("optionkit-invalid-value", Some(&args)).as_deref(),
        Some("--count cannot be x1")
    );
    assert_eq!(
        localizer.lookup("optionkit-empty-path", Some(&args)).as_deref(),
        Some("Option x1 requires a non-empty path")
    );
}

#[test]
fn broken_application_message_falls_through_to_the_embedded_one() {
    let (hook, seen) = recording_hook();
    let localizer = FluentLocalizer::builder(langid!("en-US"))
        .messages("optionkit-invalid-value = { $missing } broke")
        .on_render_failure(hook)
        .try_build()
        .expect("localizer");

    let resolved = localizer.lookup(
        "optionkit-invalid-value",
        Some(&value_args("x1", "--count")),
    );
    assert_eq!(
        resolved.as_deref(),
        Some("Invalid value 'x1' of option --count")
    );
    assert_eq!(
        *seen.lock().expect("failure log"),
        [("optionkit-invalid-value".to_owned(), CatalogueLayer::Application)]
    );
}

#[test]
fn messages_without_arguments_fail_when_they_reference_variables() {
    let (hook, seen) = recording_hook();
    let localizer = FluentLocalizer::builder(langid!("en-US"))
        .on_render_failure(hook)
        .try_build()
        .expect("localizer");
    assert!(localizer.lookup("optionkit-invalid-value", None).is_none());
    assert_eq!(seen.lock().expect("failure log").len(), 1);
}

#[test]
fn without_embedded_only_application_messages_resolve() {
    let localizer = FluentLocalizer::builder(langid!("fr-FR"))
        .without_embedded()
        .messages("app-greeting = Bonjour")
        .try_build()
        .expect("application catalogue");
    assert_eq!(localizer.lookup("app-greeting", None).as_deref(), Some("Bonjour"));
    assert!(
        localizer
            .lookup("optionkit-invalid-value", Some(&value_args("x", "-n")))
            .is_none()
    );
}

#[test]
fn isolation_marks_are_opt_in() {
    let args = value_args("x1", "--count");
    let plain = FluentLocalizer::embedded(langid!("en-US")).expect("embedded catalogue");
    let isolated = FluentLocalizer::builder(langid!("en-US"))
        .use_isolating(true)
        .try_build()
        .expect("embedded catalogue");
    let text = isolated
        .lookup("optionkit-invalid-value", Some(&args))
        .expect("message exists");
    assert!(text.contains('\u{2068}'));
    assert!(
        !plain
            .lookup("optionkit-invalid-value", Some(&args))
            .expect("message exists")
            .contains('\u{2068}')
    );
}

#[test]
fn unsupported_locale_is_rejected() {
    let err = FluentLocalizer::embedded(langid!("xx-YY")).expect_err("no embedded messages");
    assert!(matches!(
        err,
        FluentLocalizerError::UnsupportedLocale(ref locale) if *locale == langid!("xx-YY")
    ));
}

#[rstest]
#[case("= no identifier")]
#[case("optionkit-invalid-value = {")]
fn invalid_application_messages_fail_to_build(#[case] source: &str) {
    let err = FluentLocalizer::builder(langid!("en-US"))
        .messages(source)
        .try_build()
        .expect_err("resource should not parse");
    assert!(matches!(
        err,
        FluentLocalizerError::Syntax {
            layer: CatalogueLayer::Application,
            ..
        }
    ));
}

#[test]
fn duplicate_application_messages_fail_to_build() {
    let err = FluentLocalizer::builder(langid!("en-US"))
        .messages("app-title = One")
        .messages("app-title = Two")
        .try_build()
        .expect_err("duplicate identifier");
    assert!(matches!(
        err,
        FluentLocalizerError::Duplicate {
            layer: CatalogueLayer::Application,
            ..
        }
    ));
}
