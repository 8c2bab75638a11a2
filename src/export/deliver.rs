//! Getting generated content to the user

use super::{DeliveryMethod, ExportDestination};
use crate::browser::{DownloadRequest, Platform};
use crate::error::{Result, SelectorError};
use log::{debug, warn};

/// Hand `request` over through the first method that works.
///
/// Downloads go native download, then anchor click, then clipboard. The
/// clipboard destination only ever writes the clipboard.
pub async fn deliver(
    platform: &Platform,
    request: DownloadRequest<'_>,
    destination: ExportDestination,
) -> Result<DeliveryMethod> {
    let prompt = match destination {
        ExportDestination::Clipboard => {
            return write_clipboard(platform, request.content)
                .await
                .map(|_| DeliveryMethod::Clipboard)
                .map_err(|e| SelectorError::ExportFailed(e.to_string()));
        }
        ExportDestination::DownloadDirect => false,
        ExportDestination::DownloadPrompt => true,
    };

    match &platform.downloads {
        Some(downloads) => match downloads.download(request, prompt).await {
            Ok(()) => return Ok(DeliveryMethod::Native),
            Err(e) => warn!("Native download of {} failed: {}", request.filename, e),
        },
        None => debug!("No native download support, using fallback"),
    }

    match &platform.anchor {
        Some(anchor) => match anchor.click_download(request).await {
            Ok(()) => return Ok(DeliveryMethod::Anchor),
            Err(e) => warn!("Fallback download of {} failed: {}", request.filename, e),
        },
        None => debug!("No anchor download support, using clipboard"),
    }

    match write_clipboard(platform, request.content).await {
        Ok(()) => Ok(DeliveryMethod::Clipboard),
        Err(e) => {
            warn!("Clipboard copy failed: {}", e);
            Err(SelectorError::ExportFailed(
                "all export methods failed, please try again or check browser permissions"
                    .to_string(),
            ))
        }
    }
}

pub async fn write_clipboard(platform: &Platform, content: &str) -> Result<()> {
    match &platform.clipboard {
        Some(clipboard) => clipboard.write_text(content).await,
        None => Err(SelectorError::ApiUnavailable(
            "clipboard API not available".to_string(),
        )),
    }
}
