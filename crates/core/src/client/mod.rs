//! Client side of the content API boundary.
//!
//! The editing flow never assumes what is behind the API; it talks to a
//! [`ContentApi`] and nothing else. [`http::HttpContentApi`] is the real
//! implementation, and tests drive the same trait with an in-memory fake.

pub mod editor;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::section::model::{ContentSection, NewSectionEntry, ReorderRequest, SectionEntry};

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("response carried no data")]
    MissingData,
}

/// Payload of a successful `POST /api/upload`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadData {
    pub url: String,
}

/// The fetch/update interface the editor calls. Mirrors the content API
/// contracts; implementations decide transport and storage.
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// List every content section with its content and optional defaults.
    async fn fetch_sections(&self) -> Result<Vec<ContentSection>, ApiClientError>;

    /// Replace one section's content wholesale.
    async fn save_section(
        &self,
        id: Uuid,
        section: &str,
        content: &Value,
    ) -> Result<(), ApiClientError>;

    /// Store an image, returning its public URL.
    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        folder: &str,
    ) -> Result<String, ApiClientError>;

    /// Remove a previously uploaded image by its public URL.
    async fn delete_image(&self, url: &str) -> Result<(), ApiClientError>;

    async fn fetch_registry(&self) -> Result<Vec<SectionEntry>, ApiClientError>;

    async fn create_registry_entry(
        &self,
        entry: &NewSectionEntry,
    ) -> Result<SectionEntry, ApiClientError>;

    async fn update_registry_entry(&self, entry: &SectionEntry) -> Result<(), ApiClientError>;

    async fn delete_registry_entry(&self, id: Uuid) -> Result<(), ApiClientError>;

    async fn reorder_registry(&self, request: &ReorderRequest) -> Result<(), ApiClientError>;
}
