//! Error handling for cookie-selector

use std::fmt;
use thiserror::Error;

/// Main error type for cookie-selector operations
#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("Restricted page: {0}")]
    RestrictedScheme(String),

    #[error("URL has no hostname: {0}")]
    NoHostname(String),

    #[error("No active tab found")]
    NoActiveTab,

    #[error("Unable to access tab URL")]
    NoUrl,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid domain: {0:?}")]
    InvalidDomain(String),

    #[error("Cookie retrieval timed out after {0} seconds")]
    Timeout(u64),

    #[error("Cookie API unavailable: {0}")]
    ApiUnavailable(String),

    #[error("No cookies selected")]
    NothingSelected,

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Unknown(String),
}

/// Flat classification of every failure the popup can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RestrictedScheme,
    NoHostname,
    NoActiveTab,
    NoUrl,
    PermissionDenied,
    InvalidDomain,
    Timeout,
    ApiUnavailable,
    NothingSelected,
    ExportFailed,
    Unknown,
}

impl SelectorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SelectorError::RestrictedScheme(_) => ErrorKind::RestrictedScheme,
            SelectorError::NoHostname(_) => ErrorKind::NoHostname,
            SelectorError::NoActiveTab => ErrorKind::NoActiveTab,
            SelectorError::NoUrl => ErrorKind::NoUrl,
            SelectorError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            SelectorError::InvalidDomain(_) => ErrorKind::InvalidDomain,
            SelectorError::Timeout(_) => ErrorKind::Timeout,
            SelectorError::ApiUnavailable(_) => ErrorKind::ApiUnavailable,
            SelectorError::NothingSelected => ErrorKind::NothingSelected,
            SelectorError::ExportFailed(_) => ErrorKind::ExportFailed,
            SelectorError::Io(_) | SelectorError::Json(_) | SelectorError::Unknown(_) => {
                ErrorKind::Unknown
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::RestrictedScheme => "restricted-scheme",
            ErrorKind::NoHostname => "no-hostname",
            ErrorKind::NoActiveTab => "no-active-tab",
            ErrorKind::NoUrl => "no-url",
            ErrorKind::PermissionDenied => "permission-denied",
            ErrorKind::InvalidDomain => "invalid-domain",
            ErrorKind::Timeout => "timeout",
            ErrorKind::ApiUnavailable => "api-unavailable",
            ErrorKind::NothingSelected => "nothing-selected",
            ErrorKind::ExportFailed => "export-failed",
            ErrorKind::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Result type alias for cookie-selector operations
pub type Result<T> = std::result::Result<T, SelectorError>;
