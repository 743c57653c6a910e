use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::envelope::ApiEnvelope;
use crate::section::model::{
    ContentSection, NewSectionEntry, ReorderRequest, SectionEntry, UpdateContentRequest,
};

use super::{ApiClientError, ContentApi, UploadData};

/// `ContentApi` over HTTP, against the routes in `crates/api`.
#[derive(Debug, Clone)]
pub struct HttpContentApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpContentApi {
    /// `base_url` without a trailing slash, e.g. `http://localhost:3030`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Unwrap an envelope, mapping `success: false` to `ApiClientError::Api`.
fn into_data<T>(envelope: ApiEnvelope<T>) -> Result<T, ApiClientError> {
    if !envelope.success {
        return Err(ApiClientError::Api(
            envelope.error.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    envelope.data.ok_or(ApiClientError::MissingData)
}

/// Like [`into_data`] for responses whose payload we don't need.
fn into_unit<T>(envelope: ApiEnvelope<T>) -> Result<(), ApiClientError> {
    if !envelope.success {
        return Err(ApiClientError::Api(
            envelope.error.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    Ok(())
}

async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ApiEnvelope<T>, ApiClientError> {
    Ok(response.json::<ApiEnvelope<T>>().await?)
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn fetch_sections(&self) -> Result<Vec<ContentSection>, ApiClientError> {
        let response = self.http.get(self.url("/api/content")).send().await?;
        into_data(read_envelope(response).await?)
    }

    async fn save_section(
        &self,
        id: Uuid,
        section: &str,
        content: &Value,
    ) -> Result<(), ApiClientError> {
        let body = UpdateContentRequest {
            id,
            section: section.to_string(),
            content: content.clone(),
        };
        let response = self
            .http
            .put(self.url("/api/content"))
            .json(&body)
            .send()
            .await?;
        into_unit::<Value>(read_envelope(response).await?)
    }

    async fn upload_image(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        folder: &str,
    ) -> Result<String, ApiClientError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("folder", folder.to_string());
        let response = self
            .http
            .post(self.url("/api/upload"))
            .multipart(form)
            .send()
            .await?;
        let data: UploadData = into_data(read_envelope(response).await?)?;
        Ok(data.url)
    }

    async fn delete_image(&self, url: &str) -> Result<(), ApiClientError> {
        let response = self
            .http
            .delete(self.url("/api/upload"))
            .query(&[("url", url)])
            .send()
            .await?;
        into_unit::<Value>(read_envelope(response).await?)
    }

    async fn fetch_registry(&self) -> Result<Vec<SectionEntry>, ApiClientError> {
        let response = self.http.get(self.url("/api/sections")).send().await?;
        into_data(read_envelope(response).await?)
    }

    async fn create_registry_entry(
        &self,
        entry: &NewSectionEntry,
    ) -> Result<SectionEntry, ApiClientError> {
        let response = self
            .http
            .post(self.url("/api/sections"))
            .json(entry)
            .send()
            .await?;
        into_data(read_envelope(response).await?)
    }

    async fn update_registry_entry(&self, entry: &SectionEntry) -> Result<(), ApiClientError> {
        let response = self
            .http
            .put(self.url("/api/sections"))
            .json(entry)
            .send()
            .await?;
        into_unit::<Value>(read_envelope(response).await?)
    }

    async fn delete_registry_entry(&self, id: Uuid) -> Result<(), ApiClientError> {
        let response = self
            .http
            .delete(self.url("/api/sections"))
            .query(&[("id", id)])
            .send()
            .await?;
        into_unit::<Value>(read_envelope(response).await?)
    }

    async fn reorder_registry(&self, request: &ReorderRequest) -> Result<(), ApiClientError> {
        let response = self
            .http
            .post(self.url("/api/sections/reorder"))
            .json(request)
            .send()
            .await?;
        into_unit::<Value>(read_envelope(response).await?)
    }
}
