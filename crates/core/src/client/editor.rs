//! The async editing flow: one selected section, one session, one API.
//!
//! Field editors receive this as their single context object: draft access,
//! change detection and resets go through [`Editor::session`] /
//! [`Editor::session_mut`]; everything that touches the network goes through
//! the methods here.

use serde_json::Value;

use content_studio_editor::{Confirmation, EditingSession, SessionError, SessionState};

use crate::section::model::ContentSection;

use super::{ApiClientError, ContentApi};

/// URL prefix of images served by the studio itself. Only these are ever
/// deleted remotely; externally-hosted image URLs are cleared locally.
pub const LOCAL_UPLOADS_PREFIX: &str = "/uploads/";

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiClientError),
    #[error("unknown section: {0}")]
    UnknownSection(String),
    #[error("no active section")]
    NoActiveSection,
    #[error("an upload is already in flight")]
    UploadInFlight,
    #[error("an image delete is already in flight")]
    DeleteInFlight,
}

pub struct Editor<B> {
    api: B,
    sections: Vec<ContentSection>,
    active_key: Option<String>,
    session: EditingSession,
}

impl<B: ContentApi> Editor<B> {
    pub fn new(api: B) -> Self {
        Self {
            api,
            sections: Vec::new(),
            active_key: None,
            session: EditingSession::new(),
        }
    }

    pub fn api(&self) -> &B {
        &self.api
    }

    pub fn sections(&self) -> &[ContentSection] {
        &self.sections
    }

    pub fn active_section(&self) -> Option<&ContentSection> {
        let key = self.active_key.as_deref()?;
        self.sections.iter().find(|s| s.section == key)
    }

    pub fn session(&self) -> &EditingSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditingSession {
        &mut self.session
    }

    /// Fetch the full section list.
    pub async fn refresh(&mut self) -> Result<(), ApiClientError> {
        self.sections = self.api.fetch_sections().await?;
        Ok(())
    }

    /// Begin editing `key`. Re-fetches the section list first so the draft
    /// clones the freshest server copy. An active session is only discarded
    /// with explicit confirmation; a save in flight blocks the switch.
    pub async fn start_edit(&mut self, key: &str, confirm: Confirmation) -> Result<(), EditorError> {
        if self.session.is_saving() {
            return Err(SessionError::SaveInFlight.into());
        }
        self.session.discard_for_switch(confirm)?;
        self.refresh().await?;

        let section = self
            .sections
            .iter()
            .find(|s| s.section == key)
            .ok_or_else(|| EditorError::UnknownSection(key.to_string()))?;
        let content = section.content.clone();
        let defaults = section.defaults.clone();

        self.session.begin(&content, defaults.as_ref())?;
        self.active_key = Some(key.to_string());
        tracing::debug!(section = key, "editing session started");
        Ok(())
    }

    /// Push the whole draft to the API. Success re-fetches every section and
    /// returns to viewing; failure records a notice and stays in the editing
    /// state with the draft untouched.
    pub async fn save(&mut self) -> Result<(), EditorError> {
        let (id, key) = {
            let section = self.active_section().ok_or(EditorError::NoActiveSection)?;
            (section.id, section.section.clone())
        };
        let draft = self.session.begin_save()?;

        match self.api.save_section(id, &key, &draft).await {
            Ok(()) => {
                self.session.complete_save();
                self.refresh().await?;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(section = %key, %error, "save failed");
                self.session.fail_save(error.to_string());
                Err(error.into())
            }
        }
    }

    /// Discard the draft unconditionally.
    pub fn cancel(&mut self) {
        self.session.cancel();
    }

    /// Upload an image and write its URL at `path` in the draft.
    pub async fn upload_image(
        &mut self,
        path: &str,
        bytes: Vec<u8>,
        file_name: &str,
        folder: &str,
    ) -> Result<String, EditorError> {
        if self.session.state() != SessionState::Editing {
            return Err(SessionError::NotEditing.into());
        }
        if self.session.uploading_image {
            return Err(EditorError::UploadInFlight);
        }
        self.session.uploading_image = true;
        let result = self.api.upload_image(bytes, file_name, folder).await;
        self.session.uploading_image = false;

        match result {
            Ok(url) => {
                self.session.update_nested(path, Value::String(url.clone()))?;
                Ok(url)
            }
            Err(error) => {
                self.session.notify(error.to_string());
                Err(error.into())
            }
        }
    }

    /// Clear the image URL at `path`. Studio-hosted images (under
    /// `/uploads/`) are deleted remotely first; anything else is only
    /// cleared from the draft. Destructive, so it takes the prompt outcome;
    /// declining aborts with no state change.
    pub async fn clear_image(&mut self, path: &str, confirm: Confirmation) -> Result<(), EditorError> {
        if confirm == Confirmation::Declined {
            return Ok(());
        }
        if self.session.state() != SessionState::Editing {
            return Err(SessionError::NotEditing.into());
        }
        let current = self
            .session
            .nested_value(path)
            .and_then(Value::as_str)
            .map(str::to_string);

        if let Some(url) = current.filter(|u| u.starts_with(LOCAL_UPLOADS_PREFIX)) {
            if self.session.deleting_image {
                return Err(EditorError::DeleteInFlight);
            }
            self.session.deleting_image = true;
            let result = self.api.delete_image(&url).await;
            self.session.deleting_image = false;
            if let Err(error) = result {
                self.session.notify(error.to_string());
                return Err(error.into());
            }
        }

        self.session.update_nested(path, Value::String(String::new()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::Mutex;
    use tokio_test::assert_ok;
    use uuid::Uuid;

    use crate::section::model::{NewSectionEntry, ReorderRequest, SectionEntry};
    use async_trait::async_trait;

    #[derive(Default)]
    struct FakeApi {
        state: Mutex<FakeState>,
    }

    #[derive(Default)]
    struct FakeState {
        sections: Vec<ContentSection>,
        fail_save: bool,
        fetch_calls: usize,
        deleted_urls: Vec<String>,
    }

    impl FakeApi {
        fn with_section(content: Value, defaults: Option<Value>) -> (Self, Uuid) {
            let id = Uuid::new_v4();
            let api = FakeApi::default();
            api.state.lock().unwrap().sections.push(ContentSection {
                id,
                section: "hero".into(),
                title: "Hero".into(),
                description: None,
                content,
                defaults,
                updated_at: Utc::now(),
            });
            (api, id)
        }
    }

    #[async_trait]
    impl ContentApi for FakeApi {
        async fn fetch_sections(&self) -> Result<Vec<ContentSection>, ApiClientError> {
            let mut state = self.state.lock().unwrap();
            state.fetch_calls += 1;
            Ok(state.sections.clone())
        }

        async fn save_section(
            &self,
            id: Uuid,
            section: &str,
            content: &Value,
        ) -> Result<(), ApiClientError> {
            let mut state = self.state.lock().unwrap();
            if state.fail_save {
                return Err(ApiClientError::Api("network error".into()));
            }
            let stored = state
                .sections
                .iter_mut()
                .find(|s| s.id == id && s.section == section)
                .ok_or_else(|| ApiClientError::Api("section not found".into()))?;
            stored.content = content.clone();
            stored.updated_at = Utc::now();
            Ok(())
        }

        async fn upload_image(
            &self,
            _bytes: Vec<u8>,
            file_name: &str,
            folder: &str,
        ) -> Result<String, ApiClientError> {
            Ok(format!("/uploads/{folder}/{file_name}"))
        }

        async fn delete_image(&self, url: &str) -> Result<(), ApiClientError> {
            self.state.lock().unwrap().deleted_urls.push(url.to_string());
            Ok(())
        }

        async fn fetch_registry(&self) -> Result<Vec<SectionEntry>, ApiClientError> {
            Ok(Vec::new())
        }

        async fn create_registry_entry(
            &self,
            entry: &NewSectionEntry,
        ) -> Result<SectionEntry, ApiClientError> {
            Ok(SectionEntry {
                id: Uuid::new_v4(),
                key: entry.key.clone(),
                name: entry.name.clone(),
                icon: entry.icon.clone(),
                enabled: entry.enabled,
                position: 0,
            })
        }

        async fn update_registry_entry(&self, _entry: &SectionEntry) -> Result<(), ApiClientError> {
            Ok(())
        }

        async fn delete_registry_entry(&self, _id: Uuid) -> Result<(), ApiClientError> {
            Ok(())
        }

        async fn reorder_registry(&self, _request: &ReorderRequest) -> Result<(), ApiClientError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn start_edit_refetches_before_cloning() {
        let (api, _) = FakeApi::with_section(json!({"badge": "Spa"}), None);
        let mut editor = Editor::new(api);
        assert_ok!(editor.refresh().await);

        // Another admin changed the section after our last fetch.
        editor.api().state.lock().unwrap().sections[0].content = json!({"badge": "Spa Deluxe"});

        assert_ok!(editor.start_edit("hero", Confirmation::Confirmed).await);
        assert_eq!(
            editor.session().nested_value("badge"),
            Some(&json!("Spa Deluxe"))
        );
        assert_eq!(editor.api().state.lock().unwrap().fetch_calls, 2);
    }

    #[tokio::test]
    async fn unknown_section_is_an_error() {
        let (api, _) = FakeApi::with_section(json!({}), None);
        let mut editor = Editor::new(api);
        let result = editor.start_edit("missing", Confirmation::Confirmed).await;
        assert!(matches!(result, Err(EditorError::UnknownSection(_))));
    }

    #[tokio::test]
    async fn failed_save_keeps_draft_and_editing_state() {
        let (api, _) = FakeApi::with_section(json!({"badge": "Spa"}), None);
        let mut editor = Editor::new(api);
        assert_ok!(editor.start_edit("hero", Confirmation::Confirmed).await);
        editor
            .session_mut()
            .update_field("badge", json!("Spa Deluxe"))
            .unwrap();
        editor.api().state.lock().unwrap().fail_save = true;

        let before = editor.session().draft().cloned();
        assert!(editor.save().await.is_err());

        assert_eq!(editor.session().state(), SessionState::Editing);
        assert_eq!(editor.session().draft().cloned(), before);
        assert!(editor.session_mut().take_notice().is_some());
    }

    #[tokio::test]
    async fn successful_save_refetches_and_returns_to_viewing() {
        let (api, id) = FakeApi::with_section(json!({"badge": "Spa"}), None);
        let mut editor = Editor::new(api);
        assert_ok!(editor.start_edit("hero", Confirmation::Confirmed).await);
        editor
            .session_mut()
            .update_field("badge", json!("Spa Deluxe"))
            .unwrap();

        assert_ok!(editor.save().await);
        assert_eq!(editor.session().state(), SessionState::Viewing);

        let state = editor.api().state.lock().unwrap();
        let stored = state.sections.iter().find(|s| s.id == id).unwrap();
        assert_eq!(stored.content, json!({"badge": "Spa Deluxe"}));
        // initial fetch on start_edit + re-fetch after the save landed
        assert_eq!(state.fetch_calls, 2);
    }

    #[tokio::test]
    async fn switching_sections_requires_confirmation_while_editing() {
        let (api, _) = FakeApi::with_section(json!({"badge": "Spa"}), None);
        let mut editor = Editor::new(api);
        assert_ok!(editor.start_edit("hero", Confirmation::Confirmed).await);

        let result = editor.start_edit("hero", Confirmation::Declined).await;
        assert!(matches!(
            result,
            Err(EditorError::Session(SessionError::AlreadyEditing))
        ));
        assert_eq!(editor.session().state(), SessionState::Editing);

        assert_ok!(editor.start_edit("hero", Confirmation::Confirmed).await);
        assert_eq!(editor.session().state(), SessionState::Editing);
    }

    #[tokio::test]
    async fn upload_writes_url_into_draft() {
        let (api, _) = FakeApi::with_section(json!({"image": ""}), None);
        let mut editor = Editor::new(api);
        assert_ok!(editor.start_edit("hero", Confirmation::Confirmed).await);

        let url = editor
            .upload_image("image", vec![1, 2, 3], "spa.png", "hero")
            .await
            .unwrap();
        assert_eq!(url, "/uploads/hero/spa.png");
        assert_eq!(editor.session().nested_value("image"), Some(&json!(url)));
        assert!(!editor.session().uploading_image);
    }

    #[tokio::test]
    async fn clear_image_deletes_local_uploads_only() {
        let content = json!({
            "image": "/uploads/hero/spa.png",
            "external": "https://cdn.example.com/spa.png"
        });
        let (api, _) = FakeApi::with_section(content, None);
        let mut editor = Editor::new(api);
        assert_ok!(editor.start_edit("hero", Confirmation::Confirmed).await);

        assert_ok!(editor.clear_image("image", Confirmation::Confirmed).await);
        assert_ok!(editor.clear_image("external", Confirmation::Confirmed).await);

        assert_eq!(editor.session().nested_value("image"), Some(&json!("")));
        assert_eq!(editor.session().nested_value("external"), Some(&json!("")));
        assert_eq!(
            editor.api().state.lock().unwrap().deleted_urls,
            vec!["/uploads/hero/spa.png".to_string()]
        );
    }

    #[tokio::test]
    async fn declined_clear_leaves_everything_alone() {
        let (api, _) = FakeApi::with_section(json!({"image": "/uploads/hero/spa.png"}), None);
        let mut editor = Editor::new(api);
        assert_ok!(editor.start_edit("hero", Confirmation::Confirmed).await);

        assert_ok!(editor.clear_image("image", Confirmation::Declined).await);
        assert_eq!(
            editor.session().nested_value("image"),
            Some(&json!("/uploads/hero/spa.png"))
        );
        assert!(editor.api().state.lock().unwrap().deleted_urls.is_empty());
    }
}
