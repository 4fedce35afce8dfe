//! Update form: fetch the original, edit a draft, submit when dirty.

use crate::error::ApiError;
use crate::forms::{banner_message, not_found_message, parse_id, FormError};
use crate::types::{DataItem, ItemPatch, NewDataItem};

/// Where the form is in its two-phase workflow. A draft only exists once a
/// lookup has succeeded, so "editing without an original" is unrepresentable.
#[derive(Debug, Clone)]
pub enum UpdatePhase {
    Idle,
    Loaded {
        id: i64,
        original: DataItem,
        draft: NewDataItem,
    },
}

/// State machine for the update form.
///
/// The submit payload is the full draft, not a diff of the changed fields:
/// the wire contract accepts any subset, and sending the whole copy keeps
/// the payload equal to what the user sees on screen. Success keeps the id
/// and the loaded state, re-seeding the original from the server's response,
/// so repeated edits against the same id need no refetch.
#[derive(Debug, Clone)]
pub struct UpdateForm {
    id_input: String,
    phase: UpdatePhase,
    fetching: bool,
    submitting: bool,
    error: Option<String>,
    success: bool,
}

impl UpdateForm {
    pub fn new() -> Self {
        Self {
            id_input: String::new(),
            phase: UpdatePhase::Idle,
            fetching: false,
            submitting: false,
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

    pub fn phase(&self) -> &UpdatePhase {
        &self.phase
    }

    pub fn original(&self) -> Option<&DataItem> {
        match &self.phase {
            UpdatePhase::Loaded { original, .. } => Some(original),
            UpdatePhase::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&NewDataItem> {
        match &self.phase {
            UpdatePhase::Loaded { draft, .. } => Some(draft),
            UpdatePhase::Idle => None,
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Validate the id input and hand the host the id to look up.
    ///
    /// A non-numeric id sets the error banner locally and never reaches the
    /// network. Starting a lookup discards any previously loaded state.
    pub fn begin_lookup(&mut self) -> Result<i64, FormError> {
        let id = parse_id(&self.id_input).inspect_err(|e| {
            self.error = Some(e.to_string());
        })?;
        self.fetching = true;
        self.error = None;
        self.success = false;
        self.phase = UpdatePhase::Idle;
        Ok(id)
    }

    /// Absorb the lookup result for the id issued by `begin_lookup`.
    pub fn apply_lookup(&mut self, id: i64, result: Result<DataItem, ApiError>) {
        self.fetching = false;
        match result {
            Ok(item) => {
                let draft = NewDataItem {
                    name: item.name.clone(),
                    description: item.description.clone(),
                    value: item.value,
                };
                self.phase = UpdatePhase::Loaded {
                    id,
                    original: item,
                    draft,
                };
            }
            Err(ApiError::NotFound) => {
                self.error = Some(not_found_message(id));
            }
            Err(err) => {
                self.error = Some(banner_message(&err, "failed to fetch item"));
            }
        }
    }

    pub fn set_name(&mut self, name: &str) {
        if let UpdatePhase::Loaded { draft, .. } = &mut self.phase {
            draft.name = name.to_string();
        }
    }

    pub fn set_description(&mut self, description: &str) {
        if let UpdatePhase::Loaded { draft, .. } = &mut self.phase {
            draft.description = description.to_string();
        }
    }

    /// Coerced on every edit; unparseable input coerces to 0.
    pub fn set_value(&mut self, raw: &str) {
        if let UpdatePhase::Loaded { draft, .. } = &mut self.phase {
            draft.value = raw.trim().parse().unwrap_or(0.0);
        }
    }

    /// Whether any draft field differs verbatim from the original.
    pub fn is_dirty(&self) -> bool {
        match &self.phase {
            UpdatePhase::Loaded { original, draft, .. } => {
                draft.name != original.name
                    || draft.description != original.description
                    || draft.value != original.value
            }
            UpdatePhase::Idle => false,
        }
    }

    /// Whether the submit action is currently enabled.
    pub fn can_submit(&self) -> bool {
        self.is_dirty() && !self.submitting
    }

    /// Hand the host the id and patch to send, or `None` while the form is
    /// not loaded, clean, or already submitting.
    pub fn submit(&mut self) -> Option<(i64, ItemPatch)> {
        if !self.can_submit() {
            return None;
        }
        let UpdatePhase::Loaded { id, draft, .. } = &self.phase else {
            return None;
        };
        let patch = ItemPatch {
            name: Some(draft.name.clone()),
            description: Some(draft.description.clone()),
            value: Some(draft.value),
        };
        let id = *id;
        self.submitting = true;
        self.error = None;
        self.success = false;
        Some((id, patch))
    }

    /// Absorb the submit result. Success re-seeds the original from the
    /// server's response, clearing the dirty flag without losing the form.
    pub fn apply_submit(&mut self, result: Result<DataItem, ApiError>) {
        self.submitting = false;
        match result {
            Ok(item) => {
                if let UpdatePhase::Loaded { original, draft, .. } = &mut self.phase {
                    draft.name = item.name.clone();
                    draft.description = item.description.clone();
                    draft.value = item.value;
                    *original = item;
                }
                self.success = true;
            }
            Err(err) => {
                self.error = Some(banner_message(&err, "failed to update item"));
            }
        }
    }

    /// Restore the draft to the original fetched values.
    pub fn reset(&mut self) {
        if let UpdatePhase::Loaded { original, draft, .. } = &mut self.phase {
            draft.name = original.name.clone();
            draft.description = original.description.clone();
            draft.value = original.value;
        }
        self.error = None;
        self.success = false;
    }

    /// Hook for the host's banner timer.
    pub fn clear_success(&mut self) {
        self.success = false;
    }
}

impl Default for UpdateForm {
    fn default() -> Self {
        Self::new()
    }
}
