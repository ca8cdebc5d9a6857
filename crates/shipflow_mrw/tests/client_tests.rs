//! Wire-level tests for the MRW session client against a mock HTTP server.

use httpmock::prelude::*;
use serde_json::json;
use shipflow_common::models::RequestPayload;
use shipflow_common::services::CarrierSession;
use shipflow_config::MrwConfig;
use shipflow_mrw::client::MrwSession;
use shipflow_mrw::error::MrwError;

fn config_for(server: &MockServer) -> MrwConfig {
    MrwConfig {
        username: "sagec".to_string(),
        password: "secret".to_string(),
        franchise: "01601".to_string(),
        subscriber: "500001".to_string(),
        department: String::new(),
        endpoint: Some(server.url("/api")),
        debug: true,
        timeout_secs: Some(5),
        send_weight: false,
        weight_unit: None,
        default_weight_unit: None,
        reference_origin: false,
        service: None,
        default_service: Some("0800".to_string()),
    }
}

fn payload() -> RequestPayload {
    let mut data = RequestPayload::new();
    data.set("via", "Gran Via 1");
    data.set("codigo_postal", "28013");
    data.set("poblacion", "Madrid");
    data.set("referencia", "S-001");
    data.set("codigo_servicio", "0800");
    data.set("bultos", "1");
    data
}

#[tokio::test]
async fn create_parses_the_reference() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/pickings")
                .header("X-MRW-Franchise", "01601")
                .header("X-MRW-Subscriber", "500001")
                .header("authorization", "Basic c2FnZWM6c2VjcmV0")
                .json_body_partial(r#"{"referencia": "S-001"}"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "reference": "MRW123", "message": null }));
        })
        .await;

    let session = MrwSession::open(&config_for(&server)).unwrap();
    let receipt = session.create(&payload()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(receipt.reference(), Some("MRW123"));
    assert!(receipt.error().is_none());
}

#[tokio::test]
async fn create_rejection_lands_on_the_receipt_not_as_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/pickings");
            then.status(400)
                .header("content-type", "application/json")
                .json_body(json!({ "message": "Invalid postal code" }));
        })
        .await;

    let session = MrwSession::open(&config_for(&server)).unwrap();
    let receipt = session.create(&payload()).await.unwrap();

    assert!(receipt.reference().is_none());
    assert_eq!(receipt.error(), Some("Invalid postal code"));
}

#[tokio::test]
async fn label_returns_the_pdf_bytes() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/labels/MRW123");
            then.status(200)
                .header("content-type", "application/pdf")
                .body(b"%PDF-1.4 label");
        })
        .await;

    let session = MrwSession::open(&config_for(&server)).unwrap();
    let bytes = session.label("MRW123").await.unwrap();

    assert_eq!(bytes.as_deref(), Some(b"%PDF-1.4 label".as_slice()));
}

#[tokio::test]
async fn missing_label_is_absent_not_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/labels/MRW999");
            then.status(404);
        })
        .await;

    let session = MrwSession::open(&config_for(&server)).unwrap();
    let bytes = session.label("MRW999").await.unwrap();

    assert!(bytes.is_none());
}

#[tokio::test]
async fn label_server_error_raises() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/labels/MRW500");
            then.status(500).body("printer on fire");
        })
        .await;

    let session = MrwSession::open(&config_for(&server)).unwrap();
    let err = session.label("MRW500").await.unwrap_err();

    assert!(matches!(err, MrwError::ApiError { status_code: 500, .. }));
}

#[tokio::test]
async fn test_connection_relays_the_carrier_message() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/status");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "message": "MRW SAGEC up" }));
        })
        .await;

    let session = MrwSession::open(&config_for(&server)).unwrap();
    let message = session.test_connection().await.unwrap();

    assert_eq!(message, "MRW SAGEC up");
}
