//! Filament and spool endpoints.

use serde_json::Value;

use super::client::ApiClient;
use super::resources::Resource;
use crate::domain::entities::{EntityRecord, QueryParams, RecordId};
use crate::domain::errors::ApiError;

impl ApiClient {
    /// Lists filaments. The backend filters on `search`, `manufacturer`,
    /// `material` and pages with `skip`/`limit`.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_filaments(
        &self,
        params: &QueryParams,
    ) -> Result<Vec<EntityRecord>, ApiError> {
        self.list(Resource::Filaments, params).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn create_filament(&self, data: EntityRecord) -> Result<EntityRecord, ApiError> {
        self.create(Resource::Filaments, data).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_filament(&self, id: &RecordId) -> Result<EntityRecord, ApiError> {
        self.fetch(Resource::Filaments, id).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn update_filament(
        &self,
        id: &RecordId,
        changes: EntityRecord,
    ) -> Result<EntityRecord, ApiError> {
        self.update(Resource::Filaments, id, changes).await
    }

    /// Lists spools. The backend filters on `location` and pages with `skip`/`limit`.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_spools(&self, params: &QueryParams) -> Result<Vec<EntityRecord>, ApiError> {
        self.list(Resource::Spools, params).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_spool(&self, id: &RecordId) -> Result<EntityRecord, ApiError> {
        self.fetch(Resource::Spools, id).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn create_spool(&self, data: EntityRecord) -> Result<EntityRecord, ApiError> {
        self.create(Resource::Spools, data).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn update_spool(
        &self,
        id: &RecordId,
        changes: EntityRecord,
    ) -> Result<EntityRecord, ApiError> {
        self.update(Resource::Spools, id, changes).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn delete_spool(&self, id: &RecordId) -> Result<Value, ApiError> {
        self.remove(Resource::Spools, id).await
    }
}
