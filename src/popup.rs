//! Popup controller
//!
//! `PopupController` owns every piece of popup state: the resolved domain,
//! the cookie list, the renderer, the pending search and the retry budget.
//! UI events call its methods; it mutates the state and redraws the parts
//! of the [`Surface`] that changed.
//!
//! Failures while loading become an error status with recovery actions.
//! Failures of user actions (export, copy, clear) become toasts and leave
//! the list untouched.

use crate::aggregate::aggregate;
use crate::browser::Platform;
use crate::config::{ExportFormat, SelectorConfig};
use crate::debounce::Debouncer;
use crate::domain::resolve_domain;
use crate::error::{Result, SelectorError};
use crate::export::{self, DeliveryMethod, ExportDestination, ExportJob, ExportOutcome};
use crate::i18n;
use crate::list::ListState;
use crate::render::{ItemAction, ItemInput, Renderer};
use crate::retry::RetryController;
use crate::status::{PopupStatus, Severity, Toast};
use crate::surface::Surface;
use log::{debug, error, info, warn};
use std::time::Duration;

/// Permission requested from the host when cookie access is denied
const COOKIE_PERMISSION: &str = "cookies";

/// Pause between animation frames when frames are driven by a timer
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct PopupController<S: Surface> {
    config: SelectorConfig,
    platform: Platform,
    domain: Option<String>,
    tab_url: Option<String>,
    list: ListState,
    renderer: Renderer,
    search: Debouncer<String>,
    retry: RetryController,
    status: PopupStatus,
    surface: S,
}

impl<S: Surface> PopupController<S> {
    pub fn new(config: SelectorConfig, platform: Platform, surface: S) -> Self {
        Self {
            renderer: Renderer::new(config.view.clone()),
            search: Debouncer::new(config.view.search_debounce),
            retry: RetryController::new(&config.load),
            config,
            platform,
            domain: None,
            tab_url: None,
            list: ListState::new(),
            status: PopupStatus::loading(),
            surface,
        }
    }

    /// Resolve the active tab's domain and load its cookies.
    ///
    /// On failure the error status is shown and the error returned.
    pub async fn initialize(&mut self) -> Result<()> {
        self.set_status(PopupStatus::loading());
        match self.load().await {
            Ok(count) => {
                self.retry.reset();
                self.set_status(PopupStatus::Ready);
                info!(
                    "Found {} cookies for domain: {}",
                    count,
                    self.domain.as_deref().unwrap_or_default()
                );
                Ok(())
            }
            Err(err) => {
                match &err {
                    SelectorError::RestrictedScheme(url) => {
                        info!("Restricted URL detected: {}", url);
                        self.surface.show_domain(&i18n::message("status-restricted-domain"));
                    }
                    _ => error!("Error initializing popup: {}", err),
                }
                self.show_error(&err);
                Err(err)
            }
        }
    }

    /// Retry initialization after the backoff delay.
    ///
    /// Once the retry budget is spent the call fails without touching the
    /// host at all.
    pub async fn retry(&mut self) -> Result<()> {
        let delay = self.retry.begin()?;
        self.set_status(PopupStatus::retrying(delay));
        tokio::time::sleep(delay).await;
        self.initialize().await
    }

    /// Ask the host for cookie access and reload when it is granted.
    pub async fn request_permissions(&mut self) -> Result<bool> {
        self.set_status(PopupStatus::requesting_permissions());
        let granted = match &self.platform.permissions {
            Some(permissions) => permissions.request(COOKIE_PERMISSION).await,
            None => Err(SelectorError::PermissionDenied(
                "permissions API not available".to_string(),
            )),
        };

        match granted {
            Ok(true) => {
                info!("Permissions granted, retrying initialization");
                self.retry.reset();
                self.initialize().await?;
                Ok(true)
            }
            Ok(false) => {
                let err = SelectorError::PermissionDenied("permissions were not granted".to_string());
                self.show_error(&err);
                Ok(false)
            }
            Err(err) => {
                self.show_error(&err);
                Err(err)
            }
        }
    }

    /// Reload the cookie list for the current domain.
    pub async fn refresh(&mut self) -> Result<usize> {
        match self.load_cookies().await {
            Ok(count) => {
                self.set_status(PopupStatus::Ready);
                self.toast(Toast::success(i18n::message("toast-refreshed")));
                Ok(count)
            }
            Err(err) => {
                warn!("Failed to refresh cookie list: {}", err);
                self.toast(Toast::error(i18n::localize_error(&err)));
                Err(err)
            }
        }
    }

    /// Remove every loaded cookie from the host store, then reload.
    pub async fn clear_all_cookies(&mut self) -> Result<usize> {
        let result = self.remove_all().await;
        match result {
            Ok(deleted) => {
                self.toast(Toast::success(i18n::count_message("toast-cleared", deleted, None)));
                self.load_cookies().await?;
                Ok(deleted)
            }
            Err(err) => {
                warn!("Failed to clear cookies: {}", err);
                self.toast(Toast::error(i18n::localize_error(&err)));
                Err(err)
            }
        }
    }

    /// Queue a search term; it applies after the input has been quiet.
    pub fn on_search_input(&mut self, term: &str) {
        self.search.push(term.to_string());
    }

    /// Apply the queued search term if its quiet period has passed.
    pub fn poll_search(&mut self) -> bool {
        match self.search.take_ready(tokio::time::Instant::now()) {
            Some(term) => {
                self.apply_filter(&term);
                true
            }
            None => false,
        }
    }

    /// Wait for the queued search term and apply it.
    pub async fn settle_search(&mut self) -> bool {
        match self.search.settled().await {
            Some(term) => {
                self.apply_filter(&term);
                true
            }
            None => false,
        }
    }

    /// Apply a search term immediately, dropping any queued one.
    pub fn apply_filter(&mut self, term: &str) {
        self.search.cancel();
        self.list.set_filter(term);
        self.renderer.request(&self.list);
    }

    pub fn set_selected(&mut self, name: &str, domain: &str, selected: bool) -> bool {
        if !self.list.set_selected(name, domain, selected) {
            return false;
        }
        self.redraw_record(name, domain);
        true
    }

    pub fn toggle_selection(&mut self, name: &str, domain: &str) -> Option<bool> {
        let selected = self.list.toggle(name, domain)?;
        debug!(
            "Cookie {:?} {}",
            name,
            if selected { "selected" } else { "deselected" }
        );
        self.redraw_record(name, domain);
        Some(selected)
    }

    pub fn select_all(&mut self) -> usize {
        let count = self.list.select_all();
        debug!("Selected all {} visible cookies", count);
        self.renderer.refresh_visible(&self.list, &mut self.surface);
        self.show_summary();
        count
    }

    pub fn deselect_all(&mut self) -> usize {
        let count = self.list.deselect_all();
        self.renderer.refresh_visible(&self.list, &mut self.surface);
        self.show_summary();
        count
    }

    /// Route keyboard or pointer input on the item for `record_index`.
    pub fn handle_item_input(&mut self, record_index: usize, input: ItemInput) {
        let Some(record) = self.list.records().get(record_index) else {
            return;
        };
        let (name, domain) = (record.name.clone(), record.domain.clone());
        match input.action() {
            ItemAction::ToggleSelection => {
                self.toggle_selection(&name, &domain);
            }
            ItemAction::ToggleExpanded => {
                self.renderer
                    .toggle_expanded(&self.list, record_index, &mut self.surface);
            }
            ItemAction::MoveFocus(direction) => {
                self.renderer
                    .move_focus(&self.list, record_index, direction, &mut self.surface);
            }
        }
    }

    /// Export the selection; the result is also reported as a toast.
    pub async fn export(
        &mut self,
        format: ExportFormat,
        destination: ExportDestination,
    ) -> Result<ExportOutcome> {
        let domain = self.domain.clone().unwrap_or_default();
        let date = chrono::Local::now().date_naive();
        let result = match ExportJob::new(format, self.list.selected_records(), destination) {
            Ok(job) => export::run_export(&self.platform, &job, &domain, date).await,
            Err(err) => Err(err),
        };

        match &result {
            Ok(outcome) => {
                let toast = match outcome.method {
                    DeliveryMethod::Clipboard => Toast::copied(outcome.message()),
                    DeliveryMethod::Native | DeliveryMethod::Anchor => {
                        Toast::success(outcome.message())
                    }
                };
                self.toast(toast);
            }
            Err(err) => {
                warn!("Export failed: {}", err);
                self.toast(Toast::error(i18n::localize_error(err)));
            }
        }
        result
    }

    /// Copy the selection to the clipboard in `format`.
    pub async fn copy(&mut self, format: ExportFormat) -> Result<ExportOutcome> {
        self.export(format, ExportDestination::Clipboard).await
    }

    pub async fn copy_all_names(&mut self) -> Result<()> {
        let result = export::copy_all_names(&self.platform, self.list.records()).await;
        self.report_copy(&result, "toast-copied-names");
        result
    }

    pub async fn copy_selected_values(&mut self) -> Result<()> {
        let result =
            export::copy_selected_values(&self.platform, &self.list.selected_records()).await;
        self.report_copy(&result, "toast-copied-values");
        result
    }

    /// Run one animation frame. Returns whether more frames are needed.
    pub fn tick(&mut self) -> bool {
        self.renderer.tick(&self.list, &mut self.surface)
    }

    /// Run frames back to back until rendering settles.
    pub fn flush_frames(&mut self) -> usize {
        let mut frames = 1;
        while self.tick() {
            frames += 1;
        }
        frames
    }

    /// Run frames on a timer until rendering settles, applying a queued
    /// search term whenever it becomes due.
    pub async fn run_frames(&mut self) {
        loop {
            self.poll_search();
            if !self.tick() && !self.search.is_pending() {
                break;
            }
            tokio::time::sleep(FRAME_INTERVAL).await;
        }
    }

    pub fn on_scroll(&mut self, scroll_top: u32) {
        self.renderer.on_scroll(scroll_top);
    }

    /// Last-resort handler for failures no caller dealt with.
    pub fn report_uncaught(&mut self, err: &SelectorError, severity: Severity) {
        error!("Uncaught error ({:?}): {}", severity, err);
        if severity.surfaces() {
            self.show_error(err);
        }
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn retry_state(&self) -> &RetryController {
        &self.retry
    }

    pub fn status(&self) -> &PopupStatus {
        &self.status
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    async fn load(&mut self) -> Result<usize> {
        let tab = self.platform.tabs()?.active_tab().await?;
        let url = tab.url.filter(|url| !url.trim().is_empty()).ok_or(SelectorError::NoUrl)?;
        let domain = resolve_domain(&url)?;
        debug!("Resolved domain {} from {}", domain, url);
        self.surface.show_domain(&domain);
        self.domain = Some(domain);
        self.tab_url = Some(url);
        self.load_cookies().await
    }

    async fn load_cookies(&mut self) -> Result<usize> {
        let domain = self
            .domain
            .clone()
            .ok_or_else(|| SelectorError::InvalidDomain(String::new()))?;
        let api = self.platform.cookies()?.clone();
        let records = aggregate(
            api.as_ref(),
            &domain,
            self.tab_url.as_deref(),
            self.config.load.aggregation_timeout,
        )
        .await?;

        let count = records.len();
        self.list.load(records);
        self.renderer.reset();
        self.renderer.request(&self.list);
        self.show_summary();
        Ok(count)
    }

    async fn remove_all(&self) -> Result<usize> {
        let api = self.platform.cookies()?;
        let mut deleted = 0;
        for record in self.list.records() {
            api.remove(&record.to_cookie()).await?;
            deleted += 1;
        }
        Ok(deleted)
    }

    fn redraw_record(&mut self, name: &str, domain: &str) {
        if let Some(index) = self.list.position(name, domain) {
            self.renderer.refresh_item(&self.list, index, &mut self.surface);
        }
        self.show_summary();
    }

    fn report_copy(&mut self, result: &Result<()>, success_key: &str) {
        match result {
            Ok(()) => self.toast(Toast::copied(i18n::message(success_key))),
            Err(err) => {
                warn!("Copy failed: {}", err);
                self.toast(Toast::error(i18n::localize_error(err)));
            }
        }
    }

    fn show_error(&mut self, err: &SelectorError) {
        let status = PopupStatus::for_error(err, &self.retry);
        self.set_status(status);
    }

    fn set_status(&mut self, status: PopupStatus) {
        self.surface.show_status(&status);
        self.status = status;
    }

    fn show_summary(&mut self) {
        let summary = self.list.selection_summary();
        self.surface.show_summary(&summary);
    }

    fn toast(&mut self, toast: Toast) {
        self.surface.show_toast(&toast);
    }
}
