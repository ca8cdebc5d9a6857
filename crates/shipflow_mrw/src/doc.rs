// --- File: crates/shipflow_mrw/src/doc.rs ---
#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;
// Import all relevant schemas from handlers.rs
use crate::handlers::{
    LabelRequest, PrintLabelsRequest, PrintLabelsResponse, SendShipmentsRequest,
    SendShipmentsResponse, TestConnectionResponse,
};
use shipflow_common::models::{DeliveryAddress, Party, RequestPayload, Shipment};

#[utoipa::path(
    post,
    path = "/mrw/send", // Path relative to /api
    request_body = SendShipmentsRequest,
    responses(
        (status = 200, description = "Batch processed; per-shipment errors are in the body", body = SendShipmentsResponse),
        (status = 400, description = "Bad Request (e.g. shipment without a contact phone)"),
        (status = 502, description = "MRW API unreachable")
    ),
    tag = "MRW"
)]
fn doc_send_shipments_handler() {}

#[utoipa::path(
    post,
    path = "/mrw/labels", // Path relative to /api
    request_body = PrintLabelsRequest,
    responses(
        (status = 200, description = "Label files generated for the sent shipments", body = PrintLabelsResponse),
        (status = 502, description = "MRW API unreachable")
    ),
    tag = "MRW"
)]
fn doc_print_labels_handler() {}

#[utoipa::path(
    post,
    path = "/mrw/label", // Path relative to /api
    request_body = LabelRequest,
    responses(
        (status = 200, description = "Label PDF", content_type = "application/pdf"),
        (status = 404, description = "Shipment not sent, or label not available")
    ),
    tag = "MRW"
)]
fn doc_label_handler() {}

#[utoipa::path(
    get,
    path = "/mrw/test-connection", // Path relative to /api
    responses(
        (status = 200, description = "Carrier status message", body = TestConnectionResponse),
        (status = 502, description = "MRW API unreachable")
    ),
    tag = "MRW"
)]
fn doc_test_connection_handler() {}

#[utoipa::path(
    get,
    path = "/mrw/manifest", // Path relative to /api
    params(
        ("from_date" = String, Query, description = "Start of the manifest window (YYYY-MM-DD)"),
        ("to_date" = String, Query, description = "End of the manifest window (YYYY-MM-DD)")
    ),
    responses(
        (status = 503, description = "MRW offers no manifest service")
    ),
    tag = "MRW"
)]
fn doc_manifest_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_send_shipments_handler,
        doc_print_labels_handler,
        doc_label_handler,
        doc_test_connection_handler,
        doc_manifest_handler
    ),
    components(
        schemas(
            SendShipmentsRequest,
            SendShipmentsResponse,
            PrintLabelsRequest,
            PrintLabelsResponse,
            LabelRequest,
            TestConnectionResponse,
            Shipment,
            DeliveryAddress,
            Party,
            RequestPayload
        )
    ),
    tags(
        (name = "MRW", description = "MRW carrier picking integration")
    )
)]
pub struct MrwApiDoc;
