//! Generic CRUD over the backend's resource collections.

use reqwest::Method;
use serde_json::Value;

use super::client::ApiClient;
use super::options::RequestOptions;
use crate::domain::entities::{EntityRecord, QueryParams, RecordId};
use crate::domain::errors::ApiError;

/// Resource collections exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Uploaded files (`/files`).
    Files,
    /// Filament catalog (`/inventory/filaments`).
    Filaments,
    /// Spool inventory (`/inventory/spools`).
    Spools,
    /// Bambu Lab part mappings (`/admin/bambu-parts`).
    BambuParts,
    /// Manufacturers (`/manufacturers`).
    Manufacturers,
    /// Material types (`/materials`).
    Materials,
    /// Printers (`/printers`).
    Printers,
}

impl Resource {
    /// All collections, in display order.
    pub const ALL: [Self; 7] = [
        Self::Files,
        Self::Filaments,
        Self::Spools,
        Self::BambuParts,
        Self::Manufacturers,
        Self::Materials,
        Self::Printers,
    ];

    /// Collection path relative to the API base path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Files => "/files",
            Self::Filaments => "/inventory/filaments",
            Self::Spools => "/inventory/spools",
            Self::BambuParts => "/admin/bambu-parts",
            Self::Manufacturers => "/manufacturers",
            Self::Materials => "/materials",
            Self::Printers => "/printers",
        }
    }

    /// Path of a single record. The id is escaped into one path segment.
    ///
    /// # Errors
    /// Returns error if the id cannot form a path segment.
    pub fn item_path(self, id: &RecordId) -> Result<String, ApiError> {
        let segment = id
            .path_segment()
            .ok_or_else(|| ApiError::validation(format!("invalid record id: `{id}`")))?;
        Ok(format!("{}/{segment}", self.path()))
    }

    /// Method used for partial updates. The catalog collections replace records with PUT.
    #[must_use]
    pub fn update_method(self) -> Method {
        match self {
            Self::Manufacturers | Self::Materials | Self::Printers => Method::PUT,
            Self::Files | Self::Filaments | Self::Spools | Self::BambuParts => Method::PATCH,
        }
    }

    /// Human-readable collection name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Files => "files",
            Self::Filaments => "filaments",
            Self::Spools => "spools",
            Self::BambuParts => "bambu-parts",
            Self::Manufacturers => "manufacturers",
            Self::Materials => "materials",
            Self::Printers => "printers",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl ApiClient {
    /// Lists a collection.
    ///
    /// # Errors
    /// Returns error if the request fails or the body is not a list of objects.
    pub async fn list(
        &self,
        resource: Resource,
        params: &QueryParams,
    ) -> Result<Vec<EntityRecord>, ApiError> {
        self.request_as(&params.apply_to(resource.path()), RequestOptions::get())
            .await
    }

    /// Fetches one record.
    ///
    /// # Errors
    /// Returns error if the request fails or the body is not an object.
    pub async fn fetch(&self, resource: Resource, id: &RecordId) -> Result<EntityRecord, ApiError> {
        self.request_as(&resource.item_path(id)?, RequestOptions::get())
            .await
    }

    /// Creates a record and returns the server's copy.
    ///
    /// # Errors
    /// Returns error if the request fails or the body is not an object.
    pub async fn create(
        &self,
        resource: Resource,
        record: EntityRecord,
    ) -> Result<EntityRecord, ApiError> {
        self.request_as(resource.path(), RequestOptions::post().json(record))
            .await
    }

    /// Updates a record and returns the server's copy.
    ///
    /// # Errors
    /// Returns error if the request fails or the body is not an object.
    pub async fn update(
        &self,
        resource: Resource,
        id: &RecordId,
        changes: EntityRecord,
    ) -> Result<EntityRecord, ApiError> {
        let options = RequestOptions::new(resource.update_method()).json(changes);
        self.request_as(&resource.item_path(id)?, options).await
    }

    /// Deletes a record and returns the server's confirmation body.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn remove(&self, resource: Resource, id: &RecordId) -> Result<Value, ApiError> {
        self.request(&resource.item_path(id)?, RequestOptions::delete())
            .await
    }
}
