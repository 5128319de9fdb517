//! Admin endpoints.

use serde_json::Value;
use tracing::info;

use super::client::ApiClient;
use super::options::RequestOptions;
use super::resources::Resource;
use crate::domain::entities::{EntityRecord, QueryParams, RecordId};
use crate::domain::errors::ApiError;

impl ApiClient {
    /// Starts a SpoolmanDB import on the server. The sync runs in the background there.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn sync_spoolmandb(&self) -> Result<Value, ApiError> {
        let body = self
            .request("/admin/sync/spoolmandb", RequestOptions::post())
            .await?;
        info!("SpoolmanDB sync requested");
        Ok(body)
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_bambu_parts(&self) -> Result<Vec<EntityRecord>, ApiError> {
        self.list(Resource::BambuParts, &QueryParams::new()).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn create_bambu_part(&self, data: EntityRecord) -> Result<EntityRecord, ApiError> {
        self.create(Resource::BambuParts, data).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_bambu_part(&self, id: &RecordId) -> Result<EntityRecord, ApiError> {
        self.fetch(Resource::BambuParts, id).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn update_bambu_part(
        &self,
        id: &RecordId,
        changes: EntityRecord,
    ) -> Result<EntityRecord, ApiError> {
        self.update(Resource::BambuParts, id, changes).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn delete_bambu_part(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.remove(Resource::BambuParts, id).await
    }
}
