// --- File: crates/shipflow_common/src/services.rs ---
//! Service abstractions for external collaborators.
//!
//! These traits decouple the carrier orchestration from the concrete carrier
//! HTTP client and from the host ERP's record storage, so both can be
//! replaced in tests.

use crate::error::{internal_error, ShipflowError};
use crate::models::{PickingReceipt, RequestPayload, SentUpdate};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A scoped session against a parcel carrier's picking API.
///
/// One session is opened per batch operation and must release its resources
/// deterministically when dropped. Carrier *rejections* surface as values on
/// the [`PickingReceipt`]; only transport/protocol failures are errors.
pub trait CarrierSession: Send + Sync {
    /// Error type returned by carrier operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Submit one shipment payload and get the carrier's `(reference, error)`
    /// answer back.
    fn create(&self, payload: &RequestPayload) -> BoxFuture<'_, PickingReceipt, Self::Error>;

    /// Fetch the printable label for a tracking reference. `None` when the
    /// carrier has no label for it (yet).
    fn label(&self, reference: &str) -> BoxFuture<'_, Option<Vec<u8>>, Self::Error>;

    /// Round-trip check of credentials and connectivity; returns the
    /// carrier's own status message.
    fn test_connection(&self) -> BoxFuture<'_, String, Self::Error>;
}

/// Unit-of-work handle for shipment record writes.
///
/// The carrier module emits one write per successful send and one batch
/// write per label pass; transaction boundaries belong to the caller.
pub trait ShipmentStore: Send + Sync {
    /// Write tracking metadata onto one shipment as a single record update.
    fn record_sent(&self, code: &str, update: SentUpdate) -> Result<(), ShipflowError>;

    /// Flag a print attempt on every listed shipment in one batch write.
    fn mark_printed(&self, codes: &[String]) -> Result<(), ShipflowError>;
}

/// What a store remembers about one shipment.
#[derive(Debug, Clone, Default)]
pub struct ShipmentRecord {
    pub sent: Option<SentUpdate>,
    pub printed: bool,
}

/// In-process [`ShipmentStore`] used by the backend binary and tests.
#[derive(Debug, Default)]
pub struct MemoryShipmentStore {
    records: Mutex<HashMap<String, ShipmentRecord>>,
}

impl MemoryShipmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, code: &str) -> Option<ShipmentRecord> {
        self.records
            .lock()
            .ok()
            .and_then(|records| records.get(code).cloned())
    }

    pub fn printed_codes(&self) -> Vec<String> {
        self.records
            .lock()
            .map(|records| {
                let mut codes: Vec<String> = records
                    .iter()
                    .filter(|(_, record)| record.printed)
                    .map(|(code, _)| code.clone())
                    .collect();
                codes.sort();
                codes
            })
            .unwrap_or_default()
    }
}

impl ShipmentStore for MemoryShipmentStore {
    fn record_sent(&self, code: &str, update: SentUpdate) -> Result<(), ShipflowError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| internal_error("shipment store lock poisoned"))?;
        records.entry(code.to_string()).or_default().sent = Some(update);
        Ok(())
    }

    fn mark_printed(&self, codes: &[String]) -> Result<(), ShipflowError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| internal_error("shipment store lock poisoned"))?;
        for code in codes {
            records.entry(code.clone()).or_default().printed = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn update(reference: &str) -> SentUpdate {
        SentUpdate {
            tracking_ref: reference.to_string(),
            service: "0800".to_string(),
            delivery: true,
            send_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            employee: None,
        }
    }

    #[test]
    fn record_sent_is_one_atomic_update() {
        let store = MemoryShipmentStore::new();
        store.record_sent("S-001", update("MRW001")).unwrap();

        let record = store.record("S-001").unwrap();
        assert_eq!(record.sent.unwrap().tracking_ref, "MRW001");
        assert!(!record.printed);
    }

    #[test]
    fn mark_printed_covers_the_whole_batch() {
        let store = MemoryShipmentStore::new();
        store.record_sent("S-001", update("MRW001")).unwrap();
        store
            .mark_printed(&["S-001".to_string(), "S-002".to_string()])
            .unwrap();

        assert_eq!(store.printed_codes(), vec!["S-001", "S-002"]);
        // S-002 was never sent; printing was still attempted for it.
        assert!(store.record("S-002").unwrap().sent.is_none());
    }
}
