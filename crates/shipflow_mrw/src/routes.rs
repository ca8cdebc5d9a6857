// --- File: crates/shipflow_mrw/src/routes.rs ---

use crate::handlers::{
    label_handler, manifest_handler, print_labels_handler, send_shipments_handler,
    test_connection_handler, MrwState,
};
use axum::{
    routing::{get, post},
    Router,
};
use shipflow_common::services::ShipmentStore;
use shipflow_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the MRW feature.
pub fn routes(config: Arc<AppConfig>, store: Arc<dyn ShipmentStore>) -> Router {
    let mrw_state = Arc::new(MrwState { config, store });

    Router::new()
        .route("/mrw/send", post(send_shipments_handler))
        .route("/mrw/labels", post(print_labels_handler))
        .route("/mrw/label", post(label_handler))
        .route("/mrw/test-connection", get(test_connection_handler))
        .route("/mrw/manifest", get(manifest_handler))
        .with_state(mrw_state)
}
