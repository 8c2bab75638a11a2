use super::format::{csv, export_filename, CSV_HEADER, key_value_json, netscape, values_text};
use super::*;
use crate::browser::{AnchorApi, ClipboardApi, DownloadApi};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn record(name: &str, value: &str, domain: &str) -> CookieRecord {
    CookieRecord {
        name: name.to_string(),
        value: value.to_string(),
        domain: domain.to_string(),
        path: "/".to_string(),
        secure: true,
        http_only: false,
        selected: true,
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
}

/// Capability double that fails on demand and counts calls.
#[derive(Default)]
struct Flaky {
    fail: bool,
    calls: AtomicUsize,
    written: Mutex<Option<String>>,
}

impl Flaky {
    fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    fn working() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn hit(&self, content: &str) -> crate::error::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SelectorError::Unknown("refused".to_string()));
        }
        *self.written.lock().expect("lock") = Some(content.to_string());
        Ok(())
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DownloadApi for Flaky {
    async fn download(&self, request: DownloadRequest<'_>, _prompt: bool) -> crate::error::Result<()> {
        self.hit(request.content)
    }
}

#[async_trait]
impl AnchorApi for Flaky {
    async fn click_download(&self, request: DownloadRequest<'_>) -> crate::error::Result<()> {
        self.hit(request.content)
    }
}

#[async_trait]
impl ClipboardApi for Flaky {
    async fn write_text(&self, content: &str) -> crate::error::Result<()> {
        self.hit(content)
    }
}

fn platform(download: &Arc<Flaky>, anchor: &Arc<Flaky>, clipboard: &Arc<Flaky>) -> Platform {
    Platform {
        downloads: Some(download.clone()),
        anchor: Some(anchor.clone()),
        clipboard: Some(clipboard.clone()),
        ..Platform::default()
    }
}

#[test]
fn key_value_json_keeps_first_position_and_last_value() {
    let a = record("a", "1", "example.com");
    let b = record("b", "2", "example.com");
    let a2 = record("a", "3", ".example.com");
    let json = key_value_json(&[&a, &b, &a2]).expect("json");

    assert_eq!(json, "{\n  \"a\": \"3\",\n  \"b\": \"2\"\n}");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(parsed["a"], "3");
    assert_eq!(parsed["b"], "2");
}

#[test]
fn full_json_lists_every_field_without_selection() {
    let sid = record("sid", "abc", "example.com");
    let json = format::full_json(&[&sid]).expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
    assert_eq!(
        parsed,
        serde_json::json!([{
            "name": "sid",
            "value": "abc",
            "domain": "example.com",
            "path": "/",
            "secure": true,
            "httpOnly": false
        }])
    );
}

#[test]
fn netscape_lines_are_dot_prefixed() {
    let dotted = record("sid", "abc", ".example.com");
    let mut host_only = record("pref", "dark", "example.com");
    host_only.secure = false;
    host_only.path = String::new();

    let text = netscape(&[&dotted, &host_only]);
    assert!(text.starts_with("# Netscape HTTP Cookie File\n"));
    let lines: Vec<&str> = text.lines().filter(|l| !l.starts_with('#') && !l.is_empty()).collect();
    assert_eq!(
        lines,
        vec![
            ".example.com\tTRUE\t/\tTRUE\t0\tsid\tabc",
            ".example.com\tFALSE\t/\tFALSE\t0\tpref\tdark",
        ]
    );
}

#[test]
fn csv_quotes_every_field() {
    let mut tricky = record("q", "say \"hi\", bye", "example.com");
    tricky.http_only = true;
    let text = csv(&[&tricky]).expect("csv");
    assert_eq!(
        text,
        "Name,Value,Domain,Path,Secure,HttpOnly\n\
         \"q\",\"say \"\"hi\"\", bye\",\"example.com\",\"/\",\"true\",\"true\""
    );
}

#[test]
fn csv_keeps_multiline_values_inside_one_field() {
    let first = record("note", "line one\nline two", "example.com");
    let second = record("empty", "", "example.com");
    let text = csv(&[&first, &second]).expect("csv");
    assert_eq!(
        text,
        "Name,Value,Domain,Path,Secure,HttpOnly\n\
         \"note\",\"line one\nline two\",\"example.com\",\"/\",\"true\",\"false\"\n\
         \"empty\",\"\",\"example.com\",\"/\",\"true\",\"false\""
    );
}

#[test]
fn csv_without_rows_is_just_the_header() {
    assert_eq!(csv(&[]).expect("csv"), CSV_HEADER);
}

#[test]
fn filenames_carry_domain_and_date() {
    assert_eq!(
        export_filename(ExportFormat::KeyValueJson, "example.com", date()),
        "cookies_example.com_2024-03-09.json"
    );
    assert_eq!(
        export_filename(ExportFormat::FullJson, "example.com", date()),
        "cookies_all_example.com_2024-03-09.json"
    );
    assert_eq!(
        export_filename(ExportFormat::Netscape, "example.com", date()),
        "cookies_example.com_2024-03-09.txt"
    );
    assert_eq!(
        export_filename(ExportFormat::Csv, "example.com", date()),
        "cookies_example.com_2024-03-09.csv"
    );
}

#[test]
fn values_are_listed_as_name_colon_value() {
    let a = record("a", "1", "example.com");
    let b = record("b", "2", "example.com");
    assert_eq!(values_text(&[&a, &b]), "a: 1\nb: 2");
}

#[test]
fn empty_selection_is_rejected_up_front() {
    for format in ExportFormat::ALL {
        for destination in [
            ExportDestination::DownloadDirect,
            ExportDestination::DownloadPrompt,
            ExportDestination::Clipboard,
        ] {
            let err = ExportJob::new(format, Vec::new(), destination).unwrap_err();
            assert!(matches!(err, SelectorError::NothingSelected));
        }
    }
}

#[tokio::test]
async fn native_download_is_preferred() {
    let (download, anchor, clipboard) = (Flaky::working(), Flaky::working(), Flaky::working());
    let platform = platform(&download, &anchor, &clipboard);
    let sid = record("sid", "abc", "example.com");
    let job = ExportJob::new(ExportFormat::KeyValueJson, vec![&sid], ExportDestination::DownloadDirect)
        .expect("job");

    let outcome = run_export(&platform, &job, "example.com", date()).await.expect("export");
    assert_eq!(outcome.method, DeliveryMethod::Native);
    assert_eq!(outcome.filename, "cookies_example.com_2024-03-09.json");
    assert_eq!((download.calls(), anchor.calls(), clipboard.calls()), (1, 0, 0));
    assert_eq!(outcome.message(), "Successfully exported 1 cookie to cookies_example.com_2024-03-09.json");
}

#[tokio::test]
async fn falls_back_to_anchor_then_clipboard() {
    let (download, anchor, clipboard) = (Flaky::failing(), Flaky::working(), Flaky::working());
    let sid = record("sid", "abc", "example.com");
    let job = ExportJob::new(ExportFormat::Csv, vec![&sid], ExportDestination::DownloadPrompt)
        .expect("job");

    let outcome = run_export(&platform(&download, &anchor, &clipboard), &job, "example.com", date())
        .await
        .expect("export");
    assert_eq!(outcome.method, DeliveryMethod::Anchor);

    let anchor = Flaky::failing();
    let outcome = run_export(&platform(&download, &anchor, &clipboard), &job, "example.com", date())
        .await
        .expect("export");
    assert_eq!(outcome.method, DeliveryMethod::Clipboard);
    let copied = clipboard.written.lock().expect("lock").clone();
    assert!(copied.expect("clipboard").starts_with("Name,Value"));
}

#[tokio::test]
async fn fails_only_when_every_method_fails() {
    let (download, anchor, clipboard) = (Flaky::failing(), Flaky::failing(), Flaky::failing());
    let sid = record("sid", "abc", "example.com");
    let job = ExportJob::new(ExportFormat::Netscape, vec![&sid], ExportDestination::DownloadDirect)
        .expect("job");

    let err = run_export(&platform(&download, &anchor, &clipboard), &job, "example.com", date())
        .await
        .unwrap_err();
    assert!(matches!(err, SelectorError::ExportFailed(_)));
    assert_eq!((download.calls(), anchor.calls(), clipboard.calls()), (1, 1, 1));
}

#[tokio::test]
async fn clipboard_destination_skips_downloads() {
    let (download, anchor, clipboard) = (Flaky::working(), Flaky::working(), Flaky::working());
    let a = record("a", "1", "example.com");
    let b = record("b", "2", "example.com");
    let job = ExportJob::new(ExportFormat::KeyValueJson, vec![&a, &b], ExportDestination::Clipboard)
        .expect("job");

    let outcome = run_export(&platform(&download, &anchor, &clipboard), &job, "example.com", date())
        .await
        .expect("export");
    assert_eq!(outcome.method, DeliveryMethod::Clipboard);
    assert_eq!(download.calls(), 0);
    assert_eq!(outcome.message(), "Successfully copied 2 cookies to clipboard");
}

#[tokio::test]
async fn copy_selected_values_needs_a_selection() {
    let clipboard = Flaky::working();
    let platform = Platform {
        clipboard: Some(clipboard.clone()),
        ..Platform::default()
    };
    let err = copy_selected_values(&platform, &[]).await.unwrap_err();
    assert!(matches!(err, SelectorError::NothingSelected));
    assert_eq!(clipboard.calls(), 0);

    let records = vec![record("a", "1", "example.com"), record("b", "2", "example.com")];
    copy_all_names(&platform, &records).await.expect("copy names");
    assert_eq!(clipboard.written.lock().expect("lock").as_deref(), Some("a\nb"));
}
