//! Query panel: wholesale list refresh plus an id-keyed detail view.

use std::time::Duration;

use crate::error::ApiError;
use crate::forms::banner_message;
use crate::types::DataItem;

/// Default polling interval while auto-refresh is on.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(5000);

/// State machine for the query panel.
///
/// Every refresh replaces the held collection wholesale; there is no
/// incremental diffing. The panel never owns a timer — the host drives
/// refreshes and is responsible for cancelling its interval on every exit
/// path. Selection is not reconciled against refreshed data: a selection
/// whose id has disappeared simply keeps showing its stale detail until the
/// user selects again.
#[derive(Debug, Clone)]
pub struct QueryPanel {
    items: Vec<DataItem>,
    loading: bool,
    error: Option<String>,
    selected: Option<i64>,
    detail: Option<DataItem>,
    auto_refresh: bool,
    refresh_interval: Duration,
}

impl QueryPanel {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            selected: None,
            detail: None,
            auto_refresh: false,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }

    pub fn items(&self) -> &[DataItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    pub fn detail(&self) -> Option<&DataItem> {
        self.detail.as_ref()
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.auto_refresh = enabled;
    }

    pub fn set_refresh_interval(&mut self, interval: Duration) {
        self.refresh_interval = interval;
    }

    /// Mark a refresh as in flight. Clears the previous error banner.
    pub fn begin_refresh(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Absorb a `list` result, replacing the collection wholesale.
    pub fn apply_list(&mut self, result: Result<Vec<DataItem>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => self.items = items,
            Err(err) => self.error = Some(banner_message(&err, "failed to fetch items")),
        }
    }

    /// Select an item, returning the id the host should fetch the detail for.
    pub fn select(&mut self, id: i64) -> i64 {
        self.selected = Some(id);
        id
    }

    /// Absorb the detail fetch for the current selection.
    pub fn apply_detail(&mut self, result: Result<DataItem, ApiError>) {
        match result {
            Ok(item) => self.detail = Some(item),
            Err(err) => {
                self.error = Some(format!(
                    "failed to fetch item details: {}",
                    banner_message(&err, &err.to_string())
                ));
            }
        }
    }

    /// Full state reset, as performed when the refresh bus signals a
    /// mutation elsewhere. Auto-refresh settings survive the reset.
    pub fn reset(&mut self) {
        let auto_refresh = self.auto_refresh;
        let refresh_interval = self.refresh_interval;
        *self = Self::new();
        self.auto_refresh = auto_refresh;
        self.refresh_interval = refresh_interval;
    }
}

impl Default for QueryPanel {
    fn default() -> Self {
        Self::new()
    }
}
