// --- File: crates/shipflow_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Weight units ---

/// Unit of measurement for shipment weight (kg, g, lb, oz).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    G,
    Kg,
    Lb,
    Oz,
}

impl WeightUnit {
    fn grams(self) -> f64 {
        match self {
            WeightUnit::G => 1.0,
            WeightUnit::Kg => 1000.0,
            WeightUnit::Lb => 453.592_37,
            WeightUnit::Oz => 28.349_523,
        }
    }

    /// Convert `value` from this unit into `to`.
    pub fn convert(self, value: f64, to: WeightUnit) -> f64 {
        value * self.grams() / to.grams()
    }
}

// --- MRW Config ---
// Holds the MRW account and integration settings. The password can be
// overridden at runtime via SHIPFLOW__MRW__PASSWORD.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MrwConfig {
    pub username: String,
    pub password: String,
    /// MRW franchise code.
    pub franchise: String,
    /// MRW subscriber code.
    pub subscriber: String,
    /// MRW department code.
    pub department: String,
    /// Explicit API endpoint; falls back to the production or sandbox
    /// endpoint depending on `debug`.
    pub endpoint: Option<String>,
    #[serde(default)]
    pub debug: bool,
    pub timeout_secs: Option<u64>,
    /// Whether shipment weight is transmitted at all.
    #[serde(default)]
    pub send_weight: bool,
    /// Unit MRW expects weights in. No conversion happens when unset.
    pub weight_unit: Option<WeightUnit>,
    /// Source unit assumed for shipments that do not carry one.
    pub default_weight_unit: Option<WeightUnit>,
    /// Use the upstream order number instead of the shipment code as the
    /// carrier reference, when the shipment has one.
    #[serde(default)]
    pub reference_origin: bool,
    /// Carrier-level service code, overridden per shipment.
    pub service: Option<String>,
    pub default_service: Option<String>,
}

impl MrwConfig {
    /// Default carrier service for a batch, resolved once per send.
    pub fn default_carrier_service(&self) -> Option<&str> {
        self.default_service.as_deref()
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    /// Database/tenant identifier, used to namespace generated label files.
    pub tenant: Option<String>,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_mrw: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub mrw: Option<MrwConfig>,
}

impl AppConfig {
    pub fn tenant_name(&self) -> &str {
        self.tenant.as_deref().unwrap_or("shipflow")
    }
}
