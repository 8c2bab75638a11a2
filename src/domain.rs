//! Active-tab domain resolution

use crate::error::{Result, SelectorError};
use url::Url;

/// URL prefixes the host browser never exposes cookies for.
const RESTRICTED_PREFIXES: &[&str] = &[
    "chrome://",
    "chrome-extension://",
    "moz-extension://",
    "about:",
    "edge://",
    "opera://",
    "brave://",
    "data:",
    "file://",
];

/// Resolve the cookie domain for a tab URL.
///
/// Internal browser pages, extension pages, local files and data URIs are
/// rejected with [`SelectorError::RestrictedScheme`]; anything without a
/// parseable host yields [`SelectorError::NoHostname`]. A single leading
/// `www.` label is stripped.
pub fn resolve_domain(url: &str) -> Result<String> {
    let trimmed = url.trim();
    if is_restricted(trimmed) {
        return Err(SelectorError::RestrictedScheme(trimmed.to_string()));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| SelectorError::NoHostname(format!("'{}': {}", trimmed, e)))?;
    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(SelectorError::NoHostname(trimmed.to_string())),
    };

    let domain = host.strip_prefix("www.").unwrap_or(host);
    if domain.is_empty() {
        return Err(SelectorError::NoHostname(trimmed.to_string()));
    }
    Ok(domain.to_string())
}

/// Whether the URL points at a page the cookie API cannot see.
pub fn is_restricted(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    RESTRICTED_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

/// Parent of a subdomain, e.g. `app.example.com` -> `example.com`.
///
/// Two-label domains have no parent worth querying.
pub fn parent_domain(domain: &str) -> Option<&str> {
    let trimmed = domain.trim_start_matches('.');
    if trimmed.split('.').count() <= 2 {
        return None;
    }
    trimmed.split_once('.').map(|(_, parent)| parent)
}
