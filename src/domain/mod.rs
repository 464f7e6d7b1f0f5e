//! Domain layer for the Inspect client core
//!
//! This module contains routes, session and news records, and the port
//! traits the services depend on.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{
    ApiError, ApiResult, AuthError, IngestionError, StorageError, StorageResult, ValidationError,
};
