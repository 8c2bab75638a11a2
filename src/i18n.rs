use crate::error::SelectorError;
use crate::render::view::EmptyState;
use fluent_templates::fluent_bundle::FluentValue;
use fluent_templates::{static_loader, Loader};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

static_loader! {
    static LOCALES = {
        locales: "locales",
        fallback_language: "en-US",
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

/// Message without arguments.
pub fn message(key: &str) -> String {
    LOCALES.lookup(&resolve_language(), key)
}

pub fn localize_error(err: &SelectorError) -> String {
    let langid = resolve_language();
    match err {
        SelectorError::RestrictedScheme(_) => LOCALES.lookup(&langid, "error-restricted-scheme"),
        SelectorError::NoHostname(detail) => with_detail(&langid, "error-no-hostname", detail),
        SelectorError::NoActiveTab => LOCALES.lookup(&langid, "error-no-active-tab"),
        SelectorError::NoUrl => LOCALES.lookup(&langid, "error-no-url"),
        SelectorError::PermissionDenied(_) => LOCALES.lookup(&langid, "error-permission-denied"),
        SelectorError::InvalidDomain(detail) => with_detail(&langid, "error-invalid-domain", detail),
        SelectorError::Timeout(seconds) => {
            let mut args = HashMap::new();
            args.insert("seconds", FluentValue::from(*seconds));
            LOCALES.lookup_with_args(&langid, "error-timeout", &args)
        }
        SelectorError::ApiUnavailable(_) => LOCALES.lookup(&langid, "error-api-unavailable"),
        SelectorError::NothingSelected => LOCALES.lookup(&langid, "error-nothing-selected"),
        SelectorError::ExportFailed(detail) => with_detail(&langid, "error-export-failed", detail),
        SelectorError::Io(detail) => with_detail(&langid, "error-unknown", &detail.to_string()),
        SelectorError::Json(detail) => with_detail(&langid, "error-unknown", &detail.to_string()),
        SelectorError::Unknown(detail) => with_detail(&langid, "error-unknown", detail),
    }
}

pub fn empty_state_message(state: &EmptyState) -> String {
    let langid = resolve_language();
    match state {
        EmptyState::NoCookies => LOCALES.lookup(&langid, "empty-no-cookies"),
        EmptyState::NoMatches(term) => {
            let mut args = HashMap::new();
            args.insert("term", FluentValue::from(term.as_str()));
            LOCALES.lookup_with_args(&langid, "empty-no-matches", &args)
        }
    }
}

pub fn retrying_message(seconds: u64) -> String {
    let mut args = HashMap::new();
    args.insert("seconds", FluentValue::from(seconds));
    LOCALES.lookup_with_args(&resolve_language(), "status-retrying", &args)
}

pub fn retry_label(attempt: u32, max: u32) -> String {
    let langid = resolve_language();
    if attempt >= max {
        return LOCALES.lookup(&langid, "retry-label-exhausted");
    }
    if attempt == 0 {
        return LOCALES.lookup(&langid, "retry-label");
    }
    let mut args = HashMap::new();
    args.insert("attempt", FluentValue::from(attempt));
    args.insert("max", FluentValue::from(max));
    LOCALES.lookup_with_args(&langid, "retry-label-attempt", &args)
}

/// Message keyed on a cookie count, with singular/plural handled by the bundle.
pub fn count_message(key: &str, count: usize, filename: Option<&str>) -> String {
    let mut args = HashMap::new();
    args.insert("count", FluentValue::from(count));
    if let Some(filename) = filename {
        args.insert("filename", FluentValue::from(filename));
    }
    LOCALES.lookup_with_args(&resolve_language(), key, &args)
}

fn with_detail(langid: &LanguageIdentifier, key: &str, detail: &str) -> String {
    let args = HashMap::from([("detail", FluentValue::from(detail))]);
    LOCALES.lookup_with_args(langid, key, &args)
}

/// Popup language from the POSIX locale variables, first match wins.
fn resolve_language() -> LanguageIdentifier {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .filter_map(|value| locale_tag(&value))
        .find_map(|tag| tag.parse::<LanguageIdentifier>().ok())
        .unwrap_or_else(|| "en-US".parse().unwrap_or_default())
}

/// `en_US.UTF-8@euro` -> `en-US`. The `C` and `POSIX` locales carry no
/// language.
fn locale_tag(value: &str) -> Option<String> {
    let base = value
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}
