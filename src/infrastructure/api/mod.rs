//! FilaDB REST API client.

mod admin;
mod auth;
mod catalog;
mod client;
mod dto;
mod files;
mod inventory;
mod options;
mod resources;

pub use client::{API_BASE_PATH, ApiClient, ClientSettings, DEFAULT_SERVER_URL};
pub use options::{RequestBody, RequestOptions};
pub use resources::Resource;
