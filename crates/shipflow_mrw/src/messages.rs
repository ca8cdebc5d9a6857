// --- File: crates/shipflow_mrw/src/messages.rs ---
//! User-visible message catalog for the MRW integration.
//!
//! Batch operations collect these strings for display instead of raising;
//! single-shipment operations surface them through [`crate::error::MrwError`].

pub fn missing_service() -> String {
    "Select a service or default service in the MRW configuration".to_string()
}

pub fn missing_phone(name: &str) -> String {
    format!("Shipment \"{name}\" has no contact phone number")
}

pub fn cod_without_amount(name: &str) -> String {
    format!("Shipment \"{name}\" has no price and is flagged cash on delivery")
}

pub fn not_sent_error(name: &str, error: &str) -> String {
    format!("Shipment \"{name}\" was not sent. {error}")
}

pub fn sent_with_warning(name: &str, error: &str) -> String {
    format!("Shipment \"{name}\" was sent with a warning: {error}")
}

pub fn not_sent_by_mrw(name: &str) -> String {
    format!("Shipment \"{name}\" has not been sent by MRW")
}

pub fn label_not_available(name: &str) -> String {
    format!("Label for shipment \"{name}\" is not available from MRW")
}

pub fn manifest_not_available() -> String {
    "MRW Manifest service is not available.".to_string()
}
