//! Create form: three required fields, submit, clear-on-success.

use crate::error::ApiError;
use crate::forms::{banner_message, FormError};
use crate::types::{DataItem, NewDataItem};

/// State machine for the creation form.
///
/// A successful submit clears the fields and retains the created item for
/// display and upward reporting; a failed submit keeps the fields so the
/// user can correct and retry.
#[derive(Debug, Clone, Default)]
pub struct CreateForm {
    name: String,
    description: String,
    value: f64,
    submitting: bool,
    error: Option<String>,
    last_created: Option<DataItem>,
}

impl CreateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    /// Coerce the raw input to a number on every edit; unparseable input
    /// coerces to 0.
    pub fn set_value(&mut self, raw: &str) {
        self.value = raw.trim().parse().unwrap_or(0.0);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_created(&self) -> Option<&DataItem> {
        self.last_created.as_ref()
    }

    /// Validate the fields and hand the host the payload to send.
    pub fn submit(&mut self) -> Result<NewDataItem, FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::EmptyField("name"));
        }
        if self.description.trim().is_empty() {
            return Err(FormError::EmptyField("description"));
        }
        self.submitting = true;
        self.error = None;
        Ok(NewDataItem {
            name: self.name.clone(),
            description: self.description.clone(),
            value: self.value,
        })
    }

    /// Absorb the transport's result for the submit issued last.
    pub fn apply_submit(&mut self, result: Result<DataItem, ApiError>) {
        self.submitting = false;
        match result {
            Ok(item) => {
                self.name.clear();
                self.description.clear();
                self.value = 0.0;
                self.last_created = Some(item);
            }
            Err(err) => {
                self.error = Some(banner_message(&err, "failed to create item"));
            }
        }
    }
}
