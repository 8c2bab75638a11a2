//! Export of selected cookies
//!
//! An export renders the selected records in one [`ExportFormat`] and
//! delivers the text either as a downloaded file or through the clipboard.
//! Nothing is rendered or delivered when the selection is empty.

use crate::browser::{DownloadRequest, Platform};
use crate::config::ExportFormat;
use crate::error::{Result, SelectorError};
use crate::i18n;
use crate::record::CookieRecord;
use chrono::NaiveDate;
use log::info;
use std::fmt;

pub mod deliver;
pub mod format;

pub use format::export_filename;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDestination {
    DownloadDirect,
    /// Let the user pick the location
    DownloadPrompt,
    Clipboard,
}

/// How the content actually reached the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMethod {
    Native,
    Anchor,
    Clipboard,
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self {
            DeliveryMethod::Native => "native download",
            DeliveryMethod::Anchor => "fallback download",
            DeliveryMethod::Clipboard => "clipboard",
        };
        write!(f, "{}", method)
    }
}

#[derive(Debug, Clone)]
pub struct ExportJob<'a> {
    pub format: ExportFormat,
    pub records: Vec<&'a CookieRecord>,
    pub destination: ExportDestination,
}

impl<'a> ExportJob<'a> {
    /// Fails with `NothingSelected` for an empty selection.
    pub fn new(
        format: ExportFormat,
        records: Vec<&'a CookieRecord>,
        destination: ExportDestination,
    ) -> Result<Self> {
        if records.is_empty() {
            return Err(SelectorError::NothingSelected);
        }
        Ok(Self {
            format,
            records,
            destination,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub method: DeliveryMethod,
    pub filename: String,
    pub count: usize,
}

impl ExportOutcome {
    /// Toast text for a successful export.
    pub fn message(&self) -> String {
        match self.method {
            DeliveryMethod::Clipboard => i18n::count_message("toast-copied", self.count, None),
            DeliveryMethod::Native | DeliveryMethod::Anchor => {
                i18n::count_message("toast-exported", self.count, Some(&self.filename))
            }
        }
    }
}

/// Render and deliver `job`; `domain` and `date` name the file.
pub async fn run_export(
    platform: &Platform,
    job: &ExportJob<'_>,
    domain: &str,
    date: NaiveDate,
) -> Result<ExportOutcome> {
    if job.records.is_empty() {
        return Err(SelectorError::NothingSelected);
    }

    let content = format::render(job.format, &job.records)?;
    let filename = export_filename(job.format, domain, date);
    let request = DownloadRequest {
        filename: &filename,
        mime_type: job.format.mime_type(),
        content: &content,
    };

    let method = deliver::deliver(platform, request, job.destination).await?;
    info!(
        "Exported {} cookies as {} via {}",
        job.records.len(),
        job.format,
        method
    );
    Ok(ExportOutcome {
        method,
        filename,
        count: job.records.len(),
    })
}

/// Copy every record's name, selected or not.
pub async fn copy_all_names(platform: &Platform, records: &[CookieRecord]) -> Result<()> {
    deliver::write_clipboard(platform, &format::names_text(records)).await
}

/// Copy `name: value` for each selected record.
pub async fn copy_selected_values(platform: &Platform, selected: &[&CookieRecord]) -> Result<()> {
    if selected.is_empty() {
        return Err(SelectorError::NothingSelected);
    }
    deliver::write_clipboard(platform, &format::values_text(selected)).await
}

#[cfg(test)]
mod tests;
