// --- File: crates/shipflow_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Shipflow errors.
///
/// This enum provides a common set of error variants shared across crates.
/// Each crate can extend this by implementing From<SpecificError> for ShipflowError.
#[derive(Error, Debug)]
pub enum ShipflowError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Error occurred while denied access to a feature
    #[error("Feature disabled: {0}")]
    FeatureDisabled(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ShipflowError {
    fn status_code(&self) -> u16 {
        match self {
            ShipflowError::HttpError(_) => 500,
            ShipflowError::ParseError(_) => 400,
            ShipflowError::ConfigError(_) => 500,
            ShipflowError::ValidationError(_) => 400,
            ShipflowError::ExternalServiceError { .. } => 502,
            ShipflowError::NotFoundError(_) => 404,
            ShipflowError::TimeoutError(_) => 504,
            ShipflowError::InternalError(_) => 500,
            ShipflowError::FeatureDisabled(_) => 503,
        }
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> ShipflowError {
    ShipflowError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> ShipflowError {
    ShipflowError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> ShipflowError {
    ShipflowError::NotFoundError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> ShipflowError {
    ShipflowError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> ShipflowError {
    ShipflowError::InternalError(message.to_string())
}
