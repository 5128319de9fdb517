//! Application layer with use cases, DTOs and the session gate.

/// Data transfer objects.
pub mod dto;
/// Long-lived application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginRequest, LoginResponse};
pub use services::SessionGate;
pub use use_cases::{LoginUseCase, RestoreSessionUseCase};
