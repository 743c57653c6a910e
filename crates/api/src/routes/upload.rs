use std::path::PathBuf;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use uuid::Uuid;

use content_studio_core::client::UploadData;
use content_studio_core::envelope::ApiEnvelope;

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// URL prefix the studio serves its own images under. Delete requests are
/// only honored for URLs below it.
const UPLOADS_URL_PREFIX: &str = "/uploads/";

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

pub fn routes(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .route("/api/upload", post(upload_image).delete(delete_image))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
}

/// Store a multipart image upload under `UPLOAD_DIR/<folder>/` with a fresh
/// uuid name, returning its public URL.
async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ApiEnvelope<UploadData>>> {
    let mut folder = "general".to_string();
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("failed to read file: {e}")))?;
                file = Some((file_name, bytes.to_vec()));
            }
            Some("folder") => {
                folder = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("failed to read folder: {e}")))?;
            }
            _ => {}
        }
    }

    let (file_name, bytes) = file.ok_or_else(|| ApiError::BadRequest("missing 'file' field".into()))?;
    let folder = sanitize_folder(&folder)?;
    let extension = image_extension(&file_name)?;
    let stored_name = format!("{}.{extension}", Uuid::new_v4());

    let dir = state.upload_dir().join(&folder);
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(&stored_name), &bytes).await?;

    let url = format!("{UPLOADS_URL_PREFIX}{folder}/{stored_name}");
    tracing::info!(%url, bytes = bytes.len(), "image stored");
    Ok(Json(ApiEnvelope::ok(UploadData { url })))
}

#[derive(Debug, Deserialize)]
struct DeleteParams {
    url: String,
}

/// Remove a previously uploaded image. External URLs never reach this
/// endpoint (the editor clears them locally); anything outside `/uploads/`
/// is rejected outright.
async fn delete_image(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<ApiEnvelope<()>>> {
    let path = uploaded_file_path(&state.upload_dir(), &params.url)?;
    match tokio::fs::remove_file(&path).await {
        Ok(()) => {
            tracing::info!(url = %params.url, "image removed");
            Ok(Json(ApiEnvelope::ok_empty()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ApiError::NotFound(format!("no image at {}", params.url)))
        }
        Err(e) => Err(e.into()),
    }
}

fn sanitize_folder(folder: &str) -> Result<String, ApiError> {
    let folder = folder.trim();
    if folder.is_empty() {
        return Ok("general".to_string());
    }
    if !folder
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(ApiError::BadRequest(format!("invalid folder '{folder}'")));
    }
    Ok(folder.to_string())
}

fn image_extension(file_name: &str) -> Result<String, ApiError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "unsupported file type '{file_name}'"
        )));
    }
    Ok(extension)
}

/// Map a public `/uploads/...` URL back to a path inside the upload dir,
/// rejecting anything else and any traversal segments.
fn uploaded_file_path(upload_dir: &std::path::Path, url: &str) -> Result<PathBuf, ApiError> {
    let relative = url
        .strip_prefix(UPLOADS_URL_PREFIX)
        .ok_or_else(|| ApiError::BadRequest("only /uploads/ URLs can be deleted".into()))?;
    if relative.is_empty()
        || relative
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(ApiError::BadRequest(format!("invalid upload URL '{url}'")));
    }
    Ok(upload_dir.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn folder_defaults_and_validates() {
        assert_eq!(sanitize_folder("").unwrap(), "general");
        assert_eq!(sanitize_folder("hero").unwrap(), "hero");
        assert_eq!(sanitize_folder("features_block-2").unwrap(), "features_block-2");
        assert!(sanitize_folder("../etc").is_err());
        assert!(sanitize_folder("Hero Images").is_err());
    }

    #[test]
    fn extension_allow_list() {
        assert_eq!(image_extension("spa.PNG").unwrap(), "png");
        assert_eq!(image_extension("photo.webp").unwrap(), "webp");
        assert!(image_extension("script.exe").is_err());
        assert!(image_extension("no-extension").is_err());
    }

    #[test]
    fn delete_path_requires_uploads_prefix() {
        let dir = Path::new("uploads");
        assert!(uploaded_file_path(dir, "/uploads/hero/a.png").is_ok());
        assert!(uploaded_file_path(dir, "https://cdn.example.com/a.png").is_err());
        assert!(uploaded_file_path(dir, "/uploads/../secrets.txt").is_err());
        assert!(uploaded_file_path(dir, "/uploads/").is_err());
        assert!(uploaded_file_path(dir, "/uploads//a.png").is_err());
    }
}
