//! Delete form: look up for confirmation, then explicitly confirm or cancel.

use crate::error::ApiError;
use crate::forms::{banner_message, not_found_message, parse_id, FormError};
use crate::types::DataItem;

/// Where the form is in its two-phase workflow. The delete action is only
/// reachable from `Confirming`, so a delete without a prior successful
/// lookup is unrepresentable.
#[derive(Debug, Clone)]
pub enum DeletePhase {
    Idle,
    Confirming { id: i64, item: DataItem },
}

/// State machine for the delete form.
///
/// Success clears all local state and raises a transient success banner
/// which the host auto-clears after a fixed delay. Cancelling a pending
/// confirmation never touches the network. Deleting an id that is already
/// gone surfaces the error state rather than silently succeeding — the
/// server answers 404.
#[derive(Debug, Clone)]
pub struct DeleteForm {
    id_input: String,
    phase: DeletePhase,
    deleting: bool,
    error: Option<String>,
    success: bool,
}

impl DeleteForm {
    pub fn new() -> Self {
        Self {
            id_input: String::new(),
            phase: DeletePhase::Idle,
            deleting: false,
            error: None,
            success: false,
        }
    }

    pub fn set_id_input(&mut self, raw: &str) {
        self.id_input = raw.to_string();
    }

    pub fn id_input(&self) -> &str {
        &self.id_input
    }

    pub fn phase(&self) -> &DeletePhase {
        &self.phase
    }

    pub fn pending_item(&self) -> Option<&DataItem> {
        match &self.phase {
            DeletePhase::Confirming { item, .. } => Some(item),
            DeletePhase::Idle => None,
        }
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Validate the id input and hand the host the id to look up for the
    /// confirmation display.
    pub fn begin_lookup(&mut self) -> Result<i64, FormError> {
        let id = parse_id(&self.id_input).inspect_err(|e| {
            self.error = Some(e.to_string());
        })?;
        self.error = None;
        self.success = false;
        Ok(id)
    }

    /// Absorb the lookup result. A failed lookup drops any previously
    /// pending confirmation.
    pub fn apply_lookup(&mut self, id: i64, result: Result<DataItem, ApiError>) {
        match result {
            Ok(item) => {
                self.phase = DeletePhase::Confirming { id, item };
            }
            Err(ApiError::NotFound) => {
                self.error = Some(not_found_message(id));
                self.phase = DeletePhase::Idle;
            }
            Err(err) => {
                self.error = Some(banner_message(&err, "failed to fetch item"));
                self.phase = DeletePhase::Idle;
            }
        }
    }

    /// Confirm the pending delete, handing the host the id to send.
    pub fn confirm(&mut self) -> Option<i64> {
        if self.deleting {
            return None;
        }
        let DeletePhase::Confirming { id, .. } = &self.phase else {
            return None;
        };
        let id = *id;
        self.deleting = true;
        self.error = None;
        self.success = false;
        Some(id)
    }

    /// Absorb the delete result. Success clears everything; failure keeps
    /// the pending confirmation so the user can retry.
    pub fn apply_delete(&mut self, result: Result<(), ApiError>) {
        self.deleting = false;
        match result {
            Ok(()) => {
                self.id_input.clear();
                self.phase = DeletePhase::Idle;
                self.success = true;
            }
            Err(ApiError::NotFound) => {
                // The item vanished between lookup and confirm, or this is a
                // repeated delete of the same id.
                self.error = Some("failed to delete item: it no longer exists".to_string());
                self.phase = DeletePhase::Idle;
            }
            Err(err) => {
                self.error = Some(banner_message(&err, "failed to delete item"));
            }
        }
    }

    /// Drop the pending confirmation without contacting the remote.
    pub fn cancel(&mut self) {
        self.phase = DeletePhase::Idle;
        self.error = None;
    }

    /// Hook for the host's banner timer.
    pub fn clear_success(&mut self) {
        self.success = false;
    }
}

impl Default for DeleteForm {
    fn default() -> Self {
        Self::new()
    }
}
