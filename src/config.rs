//! Configuration management for cookie-selector

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Export formats offered by the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// `{"name": "value", ...}`
    KeyValueJson,
    /// Array of objects carrying every cookie field
    FullJson,
    Netscape,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::KeyValueJson,
        ExportFormat::FullJson,
        ExportFormat::Netscape,
        ExportFormat::Csv,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::KeyValueJson | ExportFormat::FullJson => "json",
            ExportFormat::Netscape => "txt",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::KeyValueJson | ExportFormat::FullJson => "application/json",
            ExportFormat::Netscape => "text/plain",
            ExportFormat::Csv => "text/csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = match self {
            ExportFormat::KeyValueJson => "json",
            ExportFormat::FullJson => "json-all",
            ExportFormat::Netscape => "netscape",
            ExportFormat::Csv => "csv",
        };
        write!(f, "{}", format)
    }
}

impl FromStr for ExportFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "key-value" => Ok(ExportFormat::KeyValueJson),
            "json-all" | "full-json" => Ok(ExportFormat::FullJson),
            "netscape" | "txt" => Ok(ExportFormat::Netscape),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(()),
        }
    }
}

/// Timing knobs for cookie loading and retries
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Upper bound for the whole aggregation, not per query
    pub aggregation_timeout: Duration,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub retry_max_delay: Duration,
}

/// Rendering and search knobs
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub search_debounce: Duration,
    /// Lists longer than this switch to windowed rendering
    pub virtualize_threshold: usize,
    pub batch_size: usize,
    pub item_height: u32,
    pub window_buffer: usize,
    pub viewport_height: u32,
    pub preview_chars: usize,
    pub long_name_chars: usize,
}

/// Where exported files land when the fixture platform handles downloads
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub download_dir: Option<PathBuf>,
    pub default_format: ExportFormat,
}

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct SelectorConfig {
    pub load: LoadConfig,
    pub view: ViewConfig,
    pub export: ExportConfig,
}

impl Default for LoadConfig {
    fn default() -> Self {
        LoadConfig {
            aggregation_timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_base_delay: Duration::from_secs(1),
            retry_max_delay: Duration::from_secs(5),
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            search_debounce: Duration::from_millis(300),
            virtualize_threshold: 50,
            batch_size: 20,
            item_height: 60,
            window_buffer: 5,
            viewport_height: 400,
            preview_chars: 15,
            long_name_chars: 20,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            download_dir: None,
            default_format: ExportFormat::KeyValueJson,
        }
    }
}
