//! Host browser capabilities
//!
//! The popup never talks to a browser directly. Everything it needs from the
//! host (active tab, cookie store, downloads, clipboard, permissions) comes
//! through the object-safe traits in this module, bundled into a [`Platform`].
//! A capability the host does not provide is simply `None`.

use crate::error::{Result, SelectorError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod fixture;

/// A cookie exactly as the host cookie store reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    #[serde(default)]
    pub value: String,
    pub domain: String,
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
}

fn default_path() -> String {
    "/".to_string()
}

/// The active browser tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub url: Option<String>,
}

/// Filter passed to the cookie store; unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieQuery {
    pub domain: Option<String>,
    pub url: Option<String>,
}

impl CookieQuery {
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            url: None,
        }
    }

    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            domain: None,
            url: Some(url.into()),
        }
    }
}

/// A generated file handed to a download capability
#[derive(Debug, Clone, Copy)]
pub struct DownloadRequest<'a> {
    pub filename: &'a str,
    pub mime_type: &'a str,
    pub content: &'a str,
}

#[async_trait]
pub trait TabApi: Send + Sync {
    /// Fails with `NoActiveTab` when no tab is focused.
    async fn active_tab(&self) -> Result<Tab>;
}

#[async_trait]
pub trait CookieApi: Send + Sync {
    async fn query(&self, query: &CookieQuery) -> Result<Vec<Cookie>>;

    async fn remove(&self, cookie: &Cookie) -> Result<()>;
}

/// Native download support (e.g. a browser downloads API)
#[async_trait]
pub trait DownloadApi: Send + Sync {
    async fn download(&self, request: DownloadRequest<'_>, prompt: bool) -> Result<()>;
}

/// Same-document fallback: a hidden anchor with a `download` attribute
#[async_trait]
pub trait AnchorApi: Send + Sync {
    async fn click_download(&self, request: DownloadRequest<'_>) -> Result<()>;
}

#[async_trait]
pub trait ClipboardApi: Send + Sync {
    async fn write_text(&self, content: &str) -> Result<()>;
}

#[async_trait]
pub trait PermissionApi: Send + Sync {
    /// Resolves to whether the user granted the capability.
    async fn request(&self, capability: &str) -> Result<bool>;
}

/// Every capability the popup may use
#[derive(Clone, Default)]
pub struct Platform {
    pub tabs: Option<Arc<dyn TabApi>>,
    pub cookies: Option<Arc<dyn CookieApi>>,
    pub downloads: Option<Arc<dyn DownloadApi>>,
    pub anchor: Option<Arc<dyn AnchorApi>>,
    pub clipboard: Option<Arc<dyn ClipboardApi>>,
    pub permissions: Option<Arc<dyn PermissionApi>>,
}

impl Platform {
    /// Build a platform where one object provides every capability.
    pub fn from_browser<B>(browser: Arc<B>) -> Self
    where
        B: TabApi + CookieApi + DownloadApi + AnchorApi + ClipboardApi + PermissionApi + 'static,
    {
        Self {
            tabs: Some(browser.clone()),
            cookies: Some(browser.clone()),
            downloads: Some(browser.clone()),
            anchor: Some(browser.clone()),
            clipboard: Some(browser.clone()),
            permissions: Some(browser),
        }
    }

    pub fn tabs(&self) -> Result<&Arc<dyn TabApi>> {
        self.tabs.as_ref().ok_or_else(|| {
            SelectorError::PermissionDenied("tabs API not available".to_string())
        })
    }

    pub fn cookies(&self) -> Result<&Arc<dyn CookieApi>> {
        self.cookies.as_ref().ok_or_else(|| {
            SelectorError::ApiUnavailable("cookies API not available".to_string())
        })
    }
}
