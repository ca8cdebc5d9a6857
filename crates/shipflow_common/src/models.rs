// --- File: crates/shipflow_common/src/models.rs ---

// Host-ERP record contract consumed by the carrier integrations, plus the
// ephemeral values exchanged with a carrier session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shipflow_config::WeightUnit;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Delivery address sub-record of an outbound shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeliveryAddress {
    /// Addressee, when it differs from the customer name.
    pub name: Option<String>,
    pub street: String,
    pub zip: String,
    pub city: String,
    pub phone: Option<String>,
}

/// Customer identity as the carrier needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Party {
    pub name: String,
    pub vat_number: String,
    pub phone: Option<String>,
}

/// An outbound shipment record.
///
/// Created upstream by warehouse/order processing; this module only writes
/// tracking metadata back through a [`crate::services::ShipmentStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Shipment {
    /// Shipment number, unique within the tenant.
    pub code: String,
    /// Upstream order number, when the shipment originated from one.
    pub origin: Option<String>,
    pub customer: Party,
    pub delivery_address: DeliveryAddress,
    #[serde(default)]
    pub packages: u32,
    pub weight: Option<f64>,
    pub weight_unit: Option<WeightUnit>,
    #[serde(default)]
    pub cash_on_delivery: bool,
    pub cod_amount: Option<f64>,
    pub carrier_notes: Option<String>,
    pub carrier_service: Option<String>,
    pub carrier_tracking_ref: Option<String>,
}

impl Shipment {
    /// Contact phone for the delivery: address phone falling back to the
    /// customer's, `None` when neither holds anything but whitespace.
    pub fn contact_phone(&self) -> Option<&str> {
        self.delivery_address
            .phone
            .as_deref()
            .or(self.customer.phone.as_deref())
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
    }

    /// Delivery-address name falling back to the customer name.
    pub fn contact_name(&self) -> &str {
        self.delivery_address
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.customer.name)
    }
}

/// Ordered field-name/value mapping submitted to a carrier API.
///
/// Built fresh per shipment and discarded after the call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RequestPayload(BTreeMap<String, String>);

impl RequestPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

/// The `(reference, error)` pair a carrier create call answers with.
///
/// The two sides are not mutually exclusive: a reference can come back
/// together with a warning text.
#[derive(Debug, Clone, Default)]
pub struct PickingReceipt {
    pub reference: Option<String>,
    pub error: Option<String>,
}

impl PickingReceipt {
    /// Non-empty reference means the carrier accepted the shipment.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// Field set written back onto a shipment after a successful send, as one
/// atomic record update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentUpdate {
    pub tracking_ref: String,
    pub service: String,
    pub delivery: bool,
    pub send_date: NaiveDate,
    pub employee: Option<String>,
}

/// Aggregate outcome of a send batch, in shipment processing order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendOutcome {
    /// Codes of the shipments the carrier returned a reference for.
    pub sent: Vec<String>,
    /// Label files materialized during the batch.
    pub labels: Vec<PathBuf>,
    /// Human-readable error messages, suitable for direct display.
    pub errors: Vec<String>,
}
