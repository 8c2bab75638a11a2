//! cookie-selector - pick and export the cookies of the active browser tab
//!
//! This crate holds the core of a cookie selector popup: resolving the active
//! tab's domain, aggregating its cookies from the host cookie store, a
//! filterable selection list with frame-batched and windowed rendering, and
//! export to JSON, Netscape and CSV through downloads or the clipboard.

pub mod aggregate;
pub mod browser;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod domain;
pub mod error;
pub mod exit_code;
pub mod export;
pub mod i18n;
pub mod list;
pub mod logging;
pub mod popup;
pub mod record;
pub mod render;
pub mod retry;
pub mod status;
pub mod surface;

pub use error::{Result, SelectorError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
