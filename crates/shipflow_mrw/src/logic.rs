// --- File: crates/shipflow_mrw/src/logic.rs ---
//! Request building and send/label orchestration against the MRW picking API.

use chrono::{Local, NaiveDate};
use shipflow_common::models::{RequestPayload, SendOutcome, SentUpdate, Shipment};
use shipflow_common::services::{CarrierSession, ShipmentStore};
use shipflow_config::MrwConfig;
use std::path::PathBuf;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::client::MrwSession;
use crate::error::MrwError;
use crate::messages;
use crate::text::{unaccent, unspaces};

/// Carrier service for one shipment: shipment-level selection, then the
/// carrier-level one, then the batch default.
pub(crate) fn resolve_service<'a>(
    config: &'a MrwConfig,
    shipment: &'a Shipment,
    default_service: Option<&'a str>,
) -> Option<&'a str> {
    shipment
        .carrier_service
        .as_deref()
        .or(config.service.as_deref())
        .or(default_service)
}

fn carrier_reference(config: &MrwConfig, shipment: &Shipment) -> String {
    if config.reference_origin {
        if let Some(origin) = shipment.origin.as_deref().filter(|o| !o.is_empty()) {
            return origin.to_string();
        }
    }
    shipment.code.clone()
}

/// Weight in the unit MRW expects. Source unit is the shipment's own,
/// falling back to the configured default; without both ends the raw value
/// is used as-is.
fn convert_weight(config: &MrwConfig, shipment: &Shipment, weight: f64) -> f64 {
    let source = shipment.weight_unit.or(config.default_weight_unit);
    match (source, config.weight_unit) {
        (Some(from), Some(to)) => from.convert(weight, to),
        _ => weight,
    }
}

/// MRW wants a comma as the decimal separator, e.g. 12.5 -> "12,50".
fn format_cod_amount(amount: f64) -> String {
    format!("{amount:.2}").replace('.', ",")
}

/// Build the picking payload for one shipment.
///
/// Pure: the send date is injected by the caller, so identical inputs yield
/// an identical payload.
pub fn build_picking_request(
    config: &MrwConfig,
    shipment: &Shipment,
    default_service: Option<&str>,
    send_date: NaiveDate,
) -> Result<RequestPayload, MrwError> {
    let service = resolve_service(config, shipment, default_service)
        .ok_or(MrwError::MissingService)?;

    let phone = shipment.contact_phone().ok_or_else(|| MrwError::MissingPhone {
        shipment: shipment.code.clone(),
    })?;

    let notes = shipment.carrier_notes.as_deref().unwrap_or("");
    let packages = if shipment.packages == 0 { 1 } else { shipment.packages };

    let mut data = RequestPayload::new();
    data.set("via", unaccent(&shipment.delivery_address.street));
    data.set("codigo_postal", shipment.delivery_address.zip.clone());
    data.set("poblacion", unaccent(&shipment.delivery_address.city));
    data.set("nif", shipment.customer.vat_number.clone());
    data.set("nombre", unaccent(&shipment.customer.name));
    data.set("telefono", unspaces(phone));
    data.set("contacto", unaccent(shipment.contact_name()));
    data.set("atencion_de", unaccent(shipment.contact_name()));
    data.set("observaciones", unaccent(notes));
    data.set("fecha", send_date.format("%d/%m/%Y").to_string());
    data.set("referencia", carrier_reference(config, shipment));
    data.set("codigo_servicio", service);
    data.set("bultos", packages.to_string());

    if config.send_weight {
        if let Some(weight) = shipment.weight {
            let mut rounded = convert_weight(config, shipment, weight).round() as i64;
            if rounded == 0 {
                rounded = 1;
            }
            data.set("peso", rounded.to_string());
        }
    }

    if shipment.cash_on_delivery {
        let amount = shipment
            .cod_amount
            .filter(|amount| *amount > 0.0)
            .ok_or_else(|| MrwError::CodWithoutAmount {
                shipment: shipment.code.clone(),
            })?;
        data.set("reembolso", "O");
        data.set("importe_reembolso", format_cod_amount(amount));
    }

    Ok(data)
}

/// Send a batch of shipments to MRW.
///
/// Opens one session for the whole batch and returns the accumulated
/// outcome; shipments with structurally missing contact data reject the
/// batch before any session is opened.
pub async fn send_shipments(
    config: &MrwConfig,
    tenant: &str,
    store: &dyn ShipmentStore,
    shipments: &[Shipment],
    operator: Option<&str>,
) -> Result<SendOutcome, MrwError> {
    for shipment in shipments {
        if shipment.contact_phone().is_none() {
            return Err(MrwError::MissingPhone {
                shipment: shipment.code.clone(),
            });
        }
    }

    let session = MrwSession::open(config)?;
    send_with_session(config, &session, tenant, store, shipments, operator).await
}

/// Batch send against an already opened carrier session.
pub async fn send_with_session<S>(
    config: &MrwConfig,
    session: &S,
    tenant: &str,
    store: &dyn ShipmentStore,
    shipments: &[Shipment],
    operator: Option<&str>,
) -> Result<SendOutcome, MrwError>
where
    S: CarrierSession,
    MrwError: From<S::Error>,
{
    // Resolved once per batch, not per shipment.
    let default_service = config.default_carrier_service();
    let send_date = Local::now().date_naive();

    let mut outcome = SendOutcome::default();

    for shipment in shipments {
        let data = match build_picking_request(config, shipment, default_service, send_date) {
            Ok(data) => data,
            Err(err @ (MrwError::MissingService | MrwError::CodWithoutAmount { .. })) => {
                outcome.errors.push(err.to_string());
                continue;
            }
            Err(err) => return Err(err),
        };

        let receipt = session.create(&data).await?;
        let reference = receipt.reference().map(str::to_string);

        match &reference {
            Some(reference) => {
                let service = resolve_service(config, shipment, default_service)
                    .unwrap_or_default()
                    .to_string();
                store.record_sent(
                    &shipment.code,
                    SentUpdate {
                        tracking_ref: reference.clone(),
                        service,
                        delivery: true,
                        send_date,
                        employee: operator.map(str::to_string),
                    },
                )?;
                info!(shipment = %shipment.code, reference = %reference, "sent shipment");
                outcome.sent.push(shipment.code.clone());
            }
            None => {
                error!(shipment = %shipment.code, "shipment not sent");
            }
        }

        // A reference is authoritative for sent status; error text coming
        // with one is kept as a warning, never dropped.
        if let Some(text) = receipt.error() {
            let message = if reference.is_some() {
                messages::sent_with_warning(&shipment.code, text)
            } else {
                messages::not_sent_error(&shipment.code, text)
            };
            warn!("{message}");
            outcome.errors.push(message);
        }

        // Label fetch is interleaved per shipment; a failed send can still
        // fetch against a reference from an earlier run.
        let label_ref = reference.or_else(|| shipment.carrier_tracking_ref.clone());
        if let Some(label_ref) = label_ref {
            if let Some(path) = fetch_label_file(session, tenant, &shipment.code, &label_ref).await? {
                outcome.labels.push(path);
            }
        }
    }

    Ok(outcome)
}

/// Fetch labels for a batch of shipments.
///
/// Opens its own session; shipments without a tracking reference are
/// skipped with a log entry. Every requested shipment is flagged printed
/// afterwards, whether or not its label came through.
pub async fn print_labels(
    config: &MrwConfig,
    tenant: &str,
    store: &dyn ShipmentStore,
    shipments: &[Shipment],
) -> Result<Vec<PathBuf>, MrwError> {
    let session = MrwSession::open(config)?;
    print_labels_with(&session, tenant, store, shipments).await
}

/// Batch label fetch against an already opened carrier session.
pub async fn print_labels_with<S>(
    session: &S,
    tenant: &str,
    store: &dyn ShipmentStore,
    shipments: &[Shipment],
) -> Result<Vec<PathBuf>, MrwError>
where
    S: CarrierSession,
    MrwError: From<S::Error>,
{
    let mut labels = Vec::new();

    for shipment in shipments {
        let Some(reference) = shipment
            .carrier_tracking_ref
            .as_deref()
            .filter(|r| !r.is_empty())
        else {
            warn!(shipment = %shipment.code, "{}", messages::not_sent_by_mrw(&shipment.code));
            continue;
        };

        if let Some(path) = fetch_label_file(session, tenant, &shipment.code, reference).await? {
            labels.push(path);
        }
    }

    let codes: Vec<String> = shipments.iter().map(|s| s.code.clone()).collect();
    store.mark_printed(&codes)?;

    Ok(labels)
}

/// Fetch the label for a single shipment, on demand.
///
/// Unlike the batch variant this fails loudly when the shipment was never
/// sent.
pub async fn get_label(config: &MrwConfig, shipment: &Shipment) -> Result<Option<Vec<u8>>, MrwError> {
    let session = MrwSession::open(config)?;
    get_label_with(&session, shipment).await
}

/// Single-shipment label fetch against an already opened carrier session.
pub async fn get_label_with<S>(session: &S, shipment: &Shipment) -> Result<Option<Vec<u8>>, MrwError>
where
    S: CarrierSession,
    MrwError: From<S::Error>,
{
    let reference = shipment
        .carrier_tracking_ref
        .as_deref()
        .filter(|r| !r.is_empty())
        .ok_or_else(|| MrwError::NotSent {
            shipment: shipment.code.clone(),
        })?;

    Ok(session.label(reference).await?)
}

/// Round-trip the configured credentials against the carrier.
pub async fn test_connection(config: &MrwConfig) -> Result<String, MrwError> {
    let session = MrwSession::open(config)?;
    Ok(session.test_connection().await?)
}

/// MRW offers no manifest service; the operation exists so callers get a
/// uniform answer across carriers.
pub fn get_manifest(_from_date: NaiveDate, _to_date: NaiveDate) -> Result<Vec<u8>, MrwError> {
    Err(MrwError::ManifestNotAvailable)
}

async fn fetch_label_file<S>(
    session: &S,
    tenant: &str,
    code: &str,
    reference: &str,
) -> Result<Option<PathBuf>, MrwError>
where
    S: CarrierSession,
    MrwError: From<S::Error>,
{
    let Some(bytes) = session.label(reference).await? else {
        warn!(shipment = %code, "{}", messages::label_not_available(code));
        return Ok(None);
    };

    let path = write_label_file(tenant, reference, &bytes).await?;
    info!(shipment = %code, path = %path.display(), "generated tmp label");
    Ok(Some(path))
}

/// Materialize label bytes as a uniquely named temp file. The caller owns
/// cleanup.
pub async fn write_label_file(
    tenant: &str,
    reference: &str,
    bytes: &[u8],
) -> Result<PathBuf, MrwError> {
    let file_name = format!("{tenant}-mrw-{reference}-{}.pdf", Uuid::new_v4().simple());
    let path = std::env::temp_dir().join(file_name);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}
