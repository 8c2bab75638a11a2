//! File-backed browser used by the command-line harness and tests.
//!
//! Cookies come from a JSON array in the shape the extension cookie API
//! returns (`name`, `value`, `domain`, `path`, `secure`, `httpOnly`).
//! Downloads are written into a directory and the clipboard is kept in memory.

use super::{
    AnchorApi, ClipboardApi, Cookie, CookieApi, CookieQuery, DownloadApi, DownloadRequest,
    PermissionApi, Tab, TabApi,
};
use crate::error::{Result, SelectorError};
use async_trait::async_trait;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use url::Url;

pub struct FixtureBrowser {
    tab_url: Option<String>,
    download_dir: PathBuf,
    state: Mutex<FixtureState>,
}

#[derive(Default)]
struct FixtureState {
    cookies: Vec<Cookie>,
    clipboard: Option<String>,
    downloads: Vec<PathBuf>,
}

impl FixtureBrowser {
    pub fn new(tab_url: Option<String>, cookies: Vec<Cookie>, download_dir: PathBuf) -> Self {
        Self {
            tab_url,
            download_dir,
            state: Mutex::new(FixtureState {
                cookies,
                ..FixtureState::default()
            }),
        }
    }

    /// Load the cookie jar from a JSON file.
    pub fn from_file(tab_url: Option<String>, path: &Path, download_dir: PathBuf) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let cookies: Vec<Cookie> = serde_json::from_str(&raw)?;
        debug!("Loaded {} fixture cookies from {:?}", cookies.len(), path);
        Ok(Self::new(tab_url, cookies, download_dir))
    }

    /// Download directory used when the caller does not pick one.
    pub fn default_download_dir() -> PathBuf {
        dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn clipboard(&self) -> Option<String> {
        self.lock().clipboard.clone()
    }

    pub fn downloads(&self) -> Vec<PathBuf> {
        self.lock().downloads.clone()
    }

    pub fn cookie_count(&self) -> usize {
        self.lock().cookies.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FixtureState> {
        // A poisoned jar still holds consistent data; nothing panics mid-update.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_download(&self, request: DownloadRequest<'_>) -> Result<PathBuf> {
        fs::create_dir_all(&self.download_dir)?;
        let target = self.download_dir.join(request.filename);
        fs::write(&target, request.content)?;
        self.lock().downloads.push(target.clone());
        Ok(target)
    }
}

#[async_trait]
impl TabApi for FixtureBrowser {
    async fn active_tab(&self) -> Result<Tab> {
        Ok(Tab {
            url: self.tab_url.clone(),
        })
    }
}

#[async_trait]
impl CookieApi for FixtureBrowser {
    async fn query(&self, query: &CookieQuery) -> Result<Vec<Cookie>> {
        let url = match &query.url {
            Some(raw) => Some(Url::parse(raw).map_err(|e| {
                SelectorError::InvalidDomain(format!("invalid query URL '{}': {}", raw, e))
            })?),
            None => None,
        };

        let state = self.lock();
        let matched = state
            .cookies
            .iter()
            .filter(|cookie| {
                query
                    .domain
                    .as_deref()
                    .map_or(true, |domain| matches_domain(&cookie.domain, domain))
            })
            .filter(|cookie| url.as_ref().map_or(true, |url| matches_url(cookie, url)))
            .cloned()
            .collect();
        Ok(matched)
    }

    async fn remove(&self, cookie: &Cookie) -> Result<()> {
        let mut state = self.lock();
        state.cookies.retain(|c| {
            !(c.name == cookie.name && c.domain == cookie.domain && c.path == cookie.path)
        });
        Ok(())
    }
}

#[async_trait]
impl DownloadApi for FixtureBrowser {
    async fn download(&self, request: DownloadRequest<'_>, prompt: bool) -> Result<()> {
        let target = self.write_download(request)?;
        debug!("Saved download to {:?} (prompt: {})", target, prompt);
        Ok(())
    }
}

#[async_trait]
impl AnchorApi for FixtureBrowser {
    async fn click_download(&self, request: DownloadRequest<'_>) -> Result<()> {
        self.write_download(request).map(|_| ())
    }
}

#[async_trait]
impl ClipboardApi for FixtureBrowser {
    async fn write_text(&self, content: &str) -> Result<()> {
        self.lock().clipboard = Some(content.to_string());
        Ok(())
    }
}

#[async_trait]
impl PermissionApi for FixtureBrowser {
    async fn request(&self, _capability: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Domain filter semantics of the extension cookie API: the cookie domain
/// equals the filter or is one of its subdomains. Leading dots are ignored.
pub fn matches_domain(cookie_domain: &str, filter: &str) -> bool {
    let cookie_domain = cookie_domain.trim_start_matches('.');
    let filter = filter.trim_start_matches('.');
    if cookie_domain.eq_ignore_ascii_case(filter) {
        return true;
    }
    let (cookie_bytes, filter_bytes) = (cookie_domain.as_bytes(), filter.as_bytes());
    if cookie_bytes.len() <= filter_bytes.len() {
        return false;
    }
    let start = cookie_bytes.len() - filter_bytes.len();
    cookie_bytes[start..].eq_ignore_ascii_case(filter_bytes) && cookie_bytes[start - 1] == b'.'
}

/// Whether the cookie would be sent with a request to `url`.
pub fn matches_url(cookie: &Cookie, url: &Url) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    if !matches_domain(host, &cookie.domain) {
        return false;
    }
    if cookie.secure && url.scheme() != "https" {
        return false;
    }
    path_matches(&cookie.path, url.path())
}

fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if cookie_path.is_empty() || request_path == cookie_path {
        return true;
    }
    if let Some(rest) = request_path.strip_prefix(cookie_path) {
        return cookie_path.ends_with('/') || rest.starts_with('/');
    }
    false
}

#[cfg(test)]
mod tests;
