// --- File: crates/shipflow_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;    // Error handling
pub mod features; // Feature flag handling
pub mod http;     // HTTP utilities
pub mod logging;  // Logging utilities
pub mod models;   // Host record contract and carrier exchange values
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, internal_error, not_found, validation_error,
    HttpStatusCode, ShipflowError,
};

// Re-export HTTP utilities for easier access
pub use http::{create_client, DEFAULT_TIMEOUT_SECS};

// Re-export feature flag handling utilities for easier access
pub use features::{is_feature_enabled, is_mrw_enabled};
