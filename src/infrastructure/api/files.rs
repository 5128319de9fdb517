//! File asset endpoints.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::debug;

use super::client::ApiClient;
use super::options::RequestOptions;
use super::resources::Resource;
use crate::domain::entities::{EntityRecord, QueryParams, RecordId};
use crate::domain::errors::ApiError;

impl ApiClient {
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_files(&self, params: &QueryParams) -> Result<Vec<EntityRecord>, ApiError> {
        self.list(Resource::Files, params).await
    }

    /// Uploads a caller-built multipart form.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn upload_file(&self, form: Form) -> Result<EntityRecord, ApiError> {
        self.request_as(Resource::Files.path(), RequestOptions::post().multipart(form))
            .await
    }

    /// Uploads a file from disk as the `file` part, with extra text fields.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or the upload fails.
    pub async fn upload_path(
        &self,
        path: &Path,
        fields: &[(String, String)],
    ) -> Result<EntityRecord, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |name| name.to_string_lossy().into_owned());

        debug!(file = %file_name, size = bytes.len(), "Uploading file");

        let mut form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }
        self.upload_file(form).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_file(&self, id: &RecordId) -> Result<EntityRecord, ApiError> {
        self.fetch(Resource::Files, id).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn update_file(
        &self,
        id: &RecordId,
        changes: EntityRecord,
    ) -> Result<EntityRecord, ApiError> {
        self.update(Resource::Files, id, changes).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn delete_file(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.remove(Resource::Files, id).await
    }
}
