use super::{matches_domain, matches_url, FixtureBrowser};
use crate::browser::{ClipboardApi, Cookie, CookieApi, CookieQuery, DownloadApi, DownloadRequest};
use std::fs;
use tempfile::tempdir;
use url::Url;

fn cookie(name: &str, domain: &str, path: &str, secure: bool) -> Cookie {
    Cookie {
        name: name.to_string(),
        value: format!("{name}-value"),
        domain: domain.to_string(),
        path: path.to_string(),
        secure,
        http_only: false,
    }
}

#[test]
fn matches_domain_accepts_subdomains_only_on_label_boundary() {
    assert!(matches_domain("example.com", "example.com"));
    assert!(matches_domain(".example.com", "example.com"));
    assert!(matches_domain("app.example.com", ".example.com"));
    assert!(!matches_domain("badexample.com", "example.com"));
    assert!(!matches_domain("example.com", "app.example.com"));
}

#[test]
fn matches_url_checks_path_and_secure() {
    let url = Url::parse("http://app.example.com/account/settings").expect("url");
    assert!(matches_url(&cookie("a", ".example.com", "/", false), &url));
    assert!(matches_url(&cookie("b", "app.example.com", "/account", false), &url));
    assert!(!matches_url(&cookie("c", "app.example.com", "/acc", false), &url));
    assert!(!matches_url(&cookie("d", ".example.com", "/", true), &url));
    assert!(!matches_url(&cookie("e", "other.com", "/", false), &url));
}

#[tokio::test]
async fn query_filters_by_domain_and_url() {
    let temp = tempdir().expect("tempdir");
    let browser = FixtureBrowser::new(
        None,
        vec![
            cookie("sid", ".example.com", "/", false),
            cookie("pref", "app.example.com", "/", false),
            cookie("other", "other.com", "/", false),
        ],
        temp.path().to_path_buf(),
    );

    let by_domain = browser
        .query(&CookieQuery::for_domain("example.com"))
        .await
        .expect("query");
    assert_eq!(by_domain.len(), 2);

    let by_url = browser
        .query(&CookieQuery::for_url("https://other.com/"))
        .await
        .expect("query");
    assert_eq!(by_url.len(), 1);
    assert_eq!(by_url[0].name, "other");
}

#[tokio::test]
async fn remove_drops_matching_cookie() {
    let temp = tempdir().expect("tempdir");
    let target = cookie("sid", ".example.com", "/", false);
    let browser = FixtureBrowser::new(None, vec![target.clone()], temp.path().to_path_buf());
    browser.remove(&target).await.expect("remove");
    assert_eq!(browser.cookie_count(), 0);
}

#[tokio::test]
async fn download_and_clipboard_are_captured() {
    let temp = tempdir().expect("tempdir");
    let browser = FixtureBrowser::new(None, Vec::new(), temp.path().join("out"));
    browser
        .download(
            DownloadRequest {
                filename: "cookies.json",
                mime_type: "application/json",
                content: "{}",
            },
            false,
        )
        .await
        .expect("download");
    let written = fs::read_to_string(temp.path().join("out/cookies.json")).expect("read");
    assert_eq!(written, "{}");
    assert_eq!(browser.downloads().len(), 1);

    browser.write_text("copied").await.expect("clipboard");
    assert_eq!(browser.clipboard().as_deref(), Some("copied"));
}

#[test]
fn from_file_reads_extension_shaped_json() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("cookies.json");
    fs::write(
        &path,
        r#"[{"name":"sid","value":"abc","domain":".example.com","path":"/","secure":true,"httpOnly":true,"expirationDate":1700000000}]"#,
    )
    .expect("write");
    let browser = FixtureBrowser::from_file(None, &path, temp.path().to_path_buf()).expect("load");
    assert_eq!(browser.cookie_count(), 1);
}
