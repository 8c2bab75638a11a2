//! What the popup shows outside the list: loading and error panels, toasts

use crate::error::{ErrorKind, SelectorError};
use crate::i18n;
use crate::retry::RetryController;
use std::time::Duration;

/// Retry button as rendered on the error panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryButton {
    pub label: String,
    pub enabled: bool,
}

impl RetryButton {
    pub fn from_controller(retry: &RetryController) -> Self {
        Self {
            label: retry.label(),
            enabled: !retry.exhausted(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupStatus {
    Loading(String),
    Ready,
    Error {
        kind: ErrorKind,
        message: String,
        retry: Option<RetryButton>,
        offer_permissions: bool,
    },
}

impl PopupStatus {
    pub fn loading() -> Self {
        PopupStatus::Loading(i18n::message("status-loading"))
    }

    /// Countdown shown while a retry waits out its backoff.
    pub fn retrying(delay: Duration) -> Self {
        let seconds = delay.as_millis().div_ceil(1000) as u64;
        PopupStatus::Loading(i18n::retrying_message(seconds))
    }

    pub fn requesting_permissions() -> Self {
        PopupStatus::Loading(i18n::message("status-requesting-permissions"))
    }

    pub fn for_error(err: &SelectorError, retry: &RetryController) -> Self {
        let kind = err.kind();
        let actions = ErrorActions::for_kind(kind);
        PopupStatus::Error {
            kind,
            message: i18n::localize_error(err),
            retry: actions.retry.then(|| RetryButton::from_controller(retry)),
            offer_permissions: actions.permissions,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PopupStatus::Error { .. })
    }
}

/// Recovery actions the error panel offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorActions {
    pub retry: bool,
    pub permissions: bool,
}

impl ErrorActions {
    pub fn for_kind(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::RestrictedScheme => Self {
                retry: false,
                permissions: false,
            },
            ErrorKind::PermissionDenied => Self {
                retry: true,
                permissions: true,
            },
            _ => Self {
                retry: true,
                permissions: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Short-lived notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
}

impl Toast {
    pub const SUCCESS_DURATION: Duration = Duration::from_secs(3);
    pub const CLIPBOARD_DURATION: Duration = Duration::from_secs(4);
    pub const ERROR_DURATION: Duration = Duration::from_secs(5);

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Success,
            duration: Self::SUCCESS_DURATION,
        }
    }

    /// Success notice for a clipboard write, kept up a little longer.
    pub fn copied(message: impl Into<String>) -> Self {
        Self {
            duration: Self::CLIPBOARD_DURATION,
            ..Self::success(message)
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Error,
            duration: Self::ERROR_DURATION,
        }
    }
}

/// How bad an error that escaped every handler is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
    Fatal,
}

impl Severity {
    /// Only critical and fatal failures interrupt the user.
    pub fn surfaces(self) -> bool {
        self >= Severity::Critical
    }
}
