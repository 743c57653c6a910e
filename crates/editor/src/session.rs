//! Editing session lifecycle.
//!
//! One session owns one draft. The machine is synchronous; network effects
//! (the re-fetch on start-edit, the save) belong to the caller, which drives
//! the transitions via [`EditingSession::begin`], [`EditingSession::begin_save`]
//! and friends. Resets and edits are local until the next successful save.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::{diff, path, reset, styles};

/// Where the session currently is.
///
/// Viewing: no draft, content shown read-only. Editing: a draft exists and
/// accepts mutations. Saving: a save is in flight; the draft is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Viewing,
    Editing,
    Saving,
}

/// Outcome of a blocking yes/no prompt for a destructive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no active editing session")]
    NotEditing,
    #[error("an editing session is already active")]
    AlreadyEditing,
    #[error("a save is already in flight")]
    SaveInFlight,
}

/// A single editing session over one content section.
#[derive(Debug, Default)]
pub struct EditingSession {
    state: Option<SessionInner>,
    /// Style panels currently expanded in the UI. Reset on every `begin`.
    expanded: HashSet<String>,
    /// One-shot user-visible message from the last failed action.
    notice: Option<String>,
    pub uploading_image: bool,
    pub deleting_image: bool,
}

#[derive(Debug)]
struct SessionInner {
    draft: Value,
    defaults: Option<Value>,
    saving: bool,
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        match &self.state {
            None => SessionState::Viewing,
            Some(inner) if inner.saving => SessionState::Saving,
            Some(_) => SessionState::Editing,
        }
    }

    pub fn is_saving(&self) -> bool {
        self.state() == SessionState::Saving
    }

    pub fn draft(&self) -> Option<&Value> {
        self.state.as_ref().map(|inner| &inner.draft)
    }

    pub fn has_defaults(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|inner| inner.defaults.is_some())
    }

    /// Last failure message, cleared by the read.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Surface a one-shot user-visible message (a failed upload, a failed
    /// delete). Overwrites any message not yet read.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    /// Start editing: deep-clone the section's content into the draft and
    /// snapshot its defaults. Clears the expansion set.
    pub fn begin(&mut self, content: &Value, defaults: Option<&Value>) -> Result<(), SessionError> {
        if self.state.is_some() {
            return Err(SessionError::AlreadyEditing);
        }
        self.state = Some(SessionInner {
            draft: content.clone(),
            defaults: defaults.cloned(),
            saving: false,
        });
        self.expanded.clear();
        self.notice = None;
        Ok(())
    }

    /// Discard the draft unconditionally and return to viewing.
    pub fn cancel(&mut self) {
        self.state = None;
        self.expanded.clear();
    }

    /// Discard an active session in order to edit another section. The
    /// unsaved-changes guard: requires explicit confirmation while editing.
    pub fn discard_for_switch(&mut self, confirm: Confirmation) -> Result<(), SessionError> {
        if self.state.is_some() && confirm == Confirmation::Declined {
            return Err(SessionError::AlreadyEditing);
        }
        self.cancel();
        Ok(())
    }

    // ---- draft mutation ----

    pub fn update_field(&mut self, field: &str, value: Value) -> Result<(), SessionError> {
        let inner = self.editing_mut()?;
        path::set_mut(&mut inner.draft, field, value);
        Ok(())
    }

    pub fn update_nested(&mut self, path: &str, value: Value) -> Result<(), SessionError> {
        let inner = self.editing_mut()?;
        path::set_mut(&mut inner.draft, path, value);
        Ok(())
    }

    pub fn update_style(&mut self, field: &str, property: &str, value: Value) -> Result<(), SessionError> {
        let inner = self.editing_mut()?;
        styles::update_style_field(&mut inner.draft, field, property, value);
        Ok(())
    }

    pub fn nested_value(&self, path: &str) -> Option<&Value> {
        path::get(self.draft()?, path)
    }

    // ---- change detection ----

    pub fn is_style_property_changed(&self, field: &str, property: &str) -> bool {
        let Some(inner) = &self.state else { return false };
        let Some(defaults) = &inner.defaults else { return false };
        diff::is_style_property_changed(&inner.draft, defaults, field, property)
    }

    pub fn is_nested_content_changed(&self, path: &str) -> bool {
        let Some(inner) = &self.state else { return false };
        let Some(defaults) = &inner.defaults else { return false };
        diff::is_nested_content_changed(&inner.draft, defaults, path)
    }

    // ---- selective reset ----

    pub fn reset_field(&mut self, field: &str) -> Result<(), SessionError> {
        let inner = self.editing_mut()?;
        reset::reset_field(&mut inner.draft, inner.defaults.as_ref(), field);
        Ok(())
    }

    pub fn reset_style_property(&mut self, field: &str, property: &str) -> Result<(), SessionError> {
        let inner = self.editing_mut()?;
        reset::reset_style_property(&mut inner.draft, inner.defaults.as_ref(), field, property);
        Ok(())
    }

    pub fn reset_nested(&mut self, path: &str) -> Result<(), SessionError> {
        let inner = self.editing_mut()?;
        reset::reset_nested(&mut inner.draft, inner.defaults.as_ref(), path);
        Ok(())
    }

    /// Replace the whole draft with the defaults snapshot. Destructive and
    /// irreversible within the session, so it takes the prompt outcome;
    /// declining aborts with no state change.
    pub fn reset_all(&mut self, confirm: Confirmation) -> Result<(), SessionError> {
        if confirm == Confirmation::Declined {
            return Ok(());
        }
        let inner = self.editing_mut()?;
        if let Some(restored) = reset::reset_all(inner.defaults.as_ref()) {
            inner.draft = restored;
        }
        Ok(())
    }

    // ---- expansion tracking ----

    /// Flip the expanded state of one field's style panel.
    pub fn toggle_style_field(&mut self, field: &str) {
        if !self.expanded.remove(field) {
            self.expanded.insert(field.to_string());
        }
    }

    pub fn is_style_field_expanded(&self, field: &str) -> bool {
        self.expanded.contains(field)
    }

    // ---- save transitions ----

    /// Freeze the draft for saving and hand back the payload to send.
    pub fn begin_save(&mut self) -> Result<Value, SessionError> {
        let inner = self.state.as_mut().ok_or(SessionError::NotEditing)?;
        if inner.saving {
            return Err(SessionError::SaveInFlight);
        }
        inner.saving = true;
        Ok(inner.draft.clone())
    }

    /// The save landed: drop the draft and return to viewing.
    pub fn complete_save(&mut self) {
        self.state = None;
        self.expanded.clear();
    }

    /// The save failed: keep the draft exactly as it was, surface a notice,
    /// and stay in the editing state so the user can retry.
    pub fn fail_save(&mut self, message: impl Into<String>) {
        if let Some(inner) = self.state.as_mut() {
            inner.saving = false;
        }
        self.notice = Some(message.into());
    }

    fn editing_mut(&mut self) -> Result<&mut SessionInner, SessionError> {
        let inner = self.state.as_mut().ok_or(SessionError::NotEditing)?;
        if inner.saving {
            return Err(SessionError::SaveInFlight);
        }
        Ok(inner)
    }
}
