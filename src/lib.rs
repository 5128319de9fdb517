//! FilaDB - a client for the FilaDB 3D-printing filament inventory server.
//!
//! This crate provides the API client, the session gate that decides whether
//! the user is signed in, route guards, and a command-line front-end.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases, DTOs and the session gate.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing the HTTP client, config and token stores.
pub mod infrastructure;
/// Presentation layer containing the CLI and navigation.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "filadb";
