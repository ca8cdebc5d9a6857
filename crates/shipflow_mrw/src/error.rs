// --- File: crates/shipflow_mrw/src/error.rs ---
use crate::messages;
use shipflow_common::{external_service_error, internal_error, not_found, validation_error, ShipflowError};
use thiserror::Error;

/// MRW-specific error types.
#[derive(Error, Debug)]
pub enum MrwError {
    /// Error occurred during an MRW API request
    #[error("MRW API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the MRW API
    #[error("MRW API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing an MRW API response
    #[error("Failed to parse MRW API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Error writing a label file to disk
    #[error("Failed to write label file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error emitted by the shipment store
    #[error("Shipment store write failed: {0}")]
    Store(#[from] ShipflowError),

    /// No service resolvable at shipment, carrier or default level
    #[error("{}", messages::missing_service())]
    MissingService,

    /// Shipment without a usable contact phone; rejects the whole batch
    #[error("{}", messages::missing_phone(.shipment))]
    MissingPhone { shipment: String },

    /// Cash-on-delivery shipment without an amount
    #[error("{}", messages::cod_without_amount(.shipment))]
    CodWithoutAmount { shipment: String },

    /// Label requested for a shipment without a tracking reference
    #[error("{}", messages::not_sent_by_mrw(.shipment))]
    NotSent { shipment: String },

    /// The carrier has no label for this shipment
    #[error("{}", messages::label_not_available(.shipment))]
    LabelNotAvailable { shipment: String },

    /// MRW offers no manifest service
    #[error("{}", messages::manifest_not_available())]
    ManifestNotAvailable,
}

/// Convert MrwError to ShipflowError
impl From<MrwError> for ShipflowError {
    fn from(err: MrwError) -> Self {
        match err {
            MrwError::RequestError(e) if e.is_timeout() => {
                ShipflowError::TimeoutError(format!("MRW request timed out: {e}"))
            }
            MrwError::RequestError(e) => ShipflowError::HttpError(format!("MRW request error: {e}")),
            MrwError::ApiError {
                status_code,
                message,
            } => external_service_error("MRW API", format!("Status: {status_code}, Message: {message}")),
            MrwError::ParseError(e) => {
                ShipflowError::ParseError(format!("MRW response parse error: {e}"))
            }
            MrwError::IoError(e) => internal_error(format!("label file write failed: {e}")),
            MrwError::Store(e) => e,
            MrwError::MissingService => validation_error(messages::missing_service()),
            MrwError::MissingPhone { shipment } => {
                validation_error(messages::missing_phone(&shipment))
            }
            MrwError::CodWithoutAmount { shipment } => {
                validation_error(messages::cod_without_amount(&shipment))
            }
            MrwError::NotSent { shipment } => not_found(messages::not_sent_by_mrw(&shipment)),
            MrwError::LabelNotAvailable { shipment } => {
                not_found(messages::label_not_available(&shipment))
            }
            MrwError::ManifestNotAvailable => {
                ShipflowError::FeatureDisabled(messages::manifest_not_available())
            }
        }
    }
}
