use cookie_selector::domain::resolve_domain;
use cookie_selector::SelectorError;

#[test]
fn test_version() {
    assert!(!cookie_selector::VERSION.is_empty());
}

#[test]
fn test_resolve_domain_strips_www() {
    let domain = resolve_domain("https://www.example.com/login").expect("domain should resolve");
    assert_eq!(domain, "example.com");
}

#[test]
fn test_resolve_domain_rejects_internal_pages() {
    let err = resolve_domain("chrome://extensions").unwrap_err();
    assert!(matches!(err, SelectorError::RestrictedScheme(_)));
}
