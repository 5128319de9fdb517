//! Manufacturer, material and printer endpoints.

use serde_json::Value;

use super::client::ApiClient;
use super::options::RequestOptions;
use super::resources::Resource;
use crate::domain::entities::{EntityRecord, QueryParams, RecordId};
use crate::domain::errors::ApiError;

impl ApiClient {
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_manufacturers(
        &self,
        params: &QueryParams,
    ) -> Result<Vec<EntityRecord>, ApiError> {
        self.list(Resource::Manufacturers, params).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_materials(&self, params: &QueryParams) -> Result<Vec<EntityRecord>, ApiError> {
        self.list(Resource::Materials, params).await
    }

    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_printers(&self, params: &QueryParams) -> Result<Vec<EntityRecord>, ApiError> {
        self.list(Resource::Printers, params).await
    }

    /// Sets a printer's operational status (`idle`, `printing`, ...).
    ///
    /// # Errors
    /// Returns error if the request fails or the status is unknown to the server.
    pub async fn update_printer_status(
        &self,
        id: &RecordId,
        status: &str,
    ) -> Result<Value, ApiError> {
        let endpoint = QueryParams::from([("status", status)])
            .apply_to(&format!("{}/status", Resource::Printers.item_path(id)?));
        self.request(&endpoint, RequestOptions::post()).await
    }
}
