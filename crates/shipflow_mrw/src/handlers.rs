// --- File: crates/shipflow_mrw/src/handlers.rs ---
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shipflow_common::{config_error, is_mrw_enabled, HttpStatusCode, ShipflowError};
use shipflow_common::models::Shipment;
use shipflow_common::services::ShipmentStore;
use shipflow_config::{AppConfig, MrwConfig};
use std::sync::Arc;

use crate::error::MrwError;
use crate::logic::{get_label, get_manifest, print_labels, send_shipments, test_connection};
use crate::messages;

// --- State for MRW Handlers ---
#[derive(Clone)]
pub struct MrwState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn ShipmentStore>,
}

// --- Request / Response bodies ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendShipmentsRequest {
    pub shipments: Vec<Shipment>,
    /// Operator recorded on each successfully sent shipment.
    pub operator: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendShipmentsResponse {
    pub sent: Vec<String>,
    pub labels: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PrintLabelsRequest {
    pub shipments: Vec<Shipment>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PrintLabelsResponse {
    pub labels: Vec<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LabelRequest {
    pub shipment: Shipment,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TestConnectionResponse {
    pub message: String,
}

#[derive(Deserialize, Debug)]
pub struct ManifestQuery {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

fn error_response(err: ShipflowError) -> (StatusCode, String) {
    (
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        err.to_string(),
    )
}

fn mrw_error_response(err: MrwError) -> (StatusCode, String) {
    error_response(err.into())
}

fn mrw_config(state: &MrwState) -> Result<&MrwConfig, (StatusCode, String)> {
    if !is_mrw_enabled(&state.config) {
        return Err(error_response(ShipflowError::FeatureDisabled(
            "MRW carrier is disabled".to_string(),
        )));
    }
    state
        .config
        .mrw
        .as_ref()
        .ok_or_else(|| error_response(config_error("MRW configuration not loaded")))
}

/// Axum handler to send a batch of shipments to MRW.
#[axum::debug_handler]
pub async fn send_shipments_handler(
    State(state): State<Arc<MrwState>>,
    Json(payload): Json<SendShipmentsRequest>,
) -> Result<Json<SendShipmentsResponse>, (StatusCode, String)> {
    let config = mrw_config(&state)?;

    let outcome = send_shipments(
        config,
        state.config.tenant_name(),
        state.store.as_ref(),
        &payload.shipments,
        payload.operator.as_deref(),
    )
    .await
    .map_err(mrw_error_response)?;

    Ok(Json(SendShipmentsResponse {
        sent: outcome.sent,
        labels: outcome
            .labels
            .iter()
            .map(|path| path.display().to_string())
            .collect(),
        errors: outcome.errors,
    }))
}

/// Axum handler to fetch labels for a batch of shipments.
#[axum::debug_handler]
pub async fn print_labels_handler(
    State(state): State<Arc<MrwState>>,
    Json(payload): Json<PrintLabelsRequest>,
) -> Result<Json<PrintLabelsResponse>, (StatusCode, String)> {
    let config = mrw_config(&state)?;

    let labels = print_labels(
        config,
        state.config.tenant_name(),
        state.store.as_ref(),
        &payload.shipments,
    )
    .await
    .map_err(mrw_error_response)?;

    Ok(Json(PrintLabelsResponse {
        labels: labels.iter().map(|path| path.display().to_string()).collect(),
    }))
}

/// Axum handler for an on-demand single-shipment label. Answers with the
/// PDF bytes, or 404 when MRW has no label for it.
#[axum::debug_handler]
pub async fn label_handler(
    State(state): State<Arc<MrwState>>,
    Json(payload): Json<LabelRequest>,
) -> Result<Response, (StatusCode, String)> {
    let config = mrw_config(&state)?;

    match get_label(config, &payload.shipment).await {
        Ok(Some(bytes)) => Ok((
            [(header::CONTENT_TYPE, "application/pdf")],
            bytes,
        )
            .into_response()),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            messages::label_not_available(&payload.shipment.code),
        )),
        Err(err) => Err(mrw_error_response(err)),
    }
}

/// Axum handler for the carrier connection test.
#[axum::debug_handler]
pub async fn test_connection_handler(
    State(state): State<Arc<MrwState>>,
) -> Result<Json<TestConnectionResponse>, (StatusCode, String)> {
    let config = mrw_config(&state)?;

    let message = test_connection(config).await.map_err(mrw_error_response)?;
    Ok(Json(TestConnectionResponse { message }))
}

/// Axum handler for the manifest query; MRW never supports it.
#[axum::debug_handler]
pub async fn manifest_handler(
    State(state): State<Arc<MrwState>>,
    Query(query): Query<ManifestQuery>,
) -> Result<Response, (StatusCode, String)> {
    let _ = mrw_config(&state)?;

    match get_manifest(query.from_date, query.to_date) {
        Ok(bytes) => Ok(bytes.into_response()),
        Err(err) => Err(mrw_error_response(err)),
    }
}
