// --- File: crates/shipflow_mrw/src/client.rs ---
//! Reqwest-backed session against the MRW SAGEC picking API.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use shipflow_common::http::{create_client, DEFAULT_TIMEOUT_SECS};
use shipflow_common::models::{PickingReceipt, RequestPayload};
use shipflow_common::services::{BoxFuture, CarrierSession};
use shipflow_config::MrwConfig;
use tracing::{debug, error};

use crate::error::MrwError;

const PRODUCTION_ENDPOINT: &str = "https://sagec.mrw.es/api";
const SANDBOX_ENDPOINT: &str = "https://sagec-test.mrw.es/api";

/// One scoped connection to the MRW picking API.
///
/// Opened once per batch operation; dropping it releases the underlying
/// client on every exit path.
pub struct MrwSession {
    client: Client,
    endpoint: String,
    username: String,
    password: String,
    franchise: String,
    subscriber: String,
    department: String,
}

impl MrwSession {
    /// Open a session from the carrier configuration. The `debug` flag
    /// selects the sandbox endpoint unless an explicit one is configured.
    pub fn open(config: &MrwConfig) -> Result<Self, MrwError> {
        let timeout = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = create_client(timeout, false)?;

        let endpoint = config.endpoint.clone().unwrap_or_else(|| {
            if config.debug {
                SANDBOX_ENDPOINT.to_string()
            } else {
                PRODUCTION_ENDPOINT.to_string()
            }
        });

        debug!(endpoint = %endpoint, franchise = %config.franchise, "opened MRW session");

        Ok(Self {
            client,
            endpoint,
            username: config.username.clone(),
            password: config.password.clone(),
            franchise: config.franchise.clone(),
            subscriber: config.subscriber.clone(),
            department: config.department.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.endpoint, path))
            .basic_auth(&self.username, Some(&self.password))
            .header("X-MRW-Franchise", &self.franchise)
            .header("X-MRW-Subscriber", &self.subscriber)
            .header("X-MRW-Department", &self.department)
    }
}

// --- Wire DTOs ---

#[derive(Deserialize, Debug)]
struct MrwPickingResponse {
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct MrwStatusResponse {
    #[serde(default)]
    message: Option<String>,
}

impl CarrierSession for MrwSession {
    type Error = MrwError;

    fn create(&self, payload: &RequestPayload) -> BoxFuture<'_, PickingReceipt, MrwError> {
        let payload = payload.clone();

        Box::pin(async move {
            let response = self
                .request(Method::POST, "pickings")
                .json(&payload)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;

            if status.is_success() {
                let parsed: MrwPickingResponse = serde_json::from_str(&body)?;
                return Ok(PickingReceipt {
                    reference: parsed.reference,
                    error: parsed.message,
                });
            }

            // Carrier rejections land on the receipt; only transport
            // failures raise.
            let message = match serde_json::from_str::<MrwPickingResponse>(&body) {
                Ok(parsed) => parsed.message.unwrap_or(body),
                Err(_) => body,
            };
            error!(status = %status, "MRW picking rejected: {message}");
            Ok(PickingReceipt {
                reference: None,
                error: Some(message),
            })
        })
    }

    fn label(&self, reference: &str) -> BoxFuture<'_, Option<Vec<u8>>, MrwError> {
        let reference = reference.to_string();

        Box::pin(async move {
            let response = self
                .request(Method::GET, &format!("labels/{reference}"))
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
                return Ok(None);
            }
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(MrwError::ApiError {
                    status_code: status.as_u16(),
                    message,
                });
            }

            let bytes = response.bytes().await?;
            if bytes.is_empty() {
                return Ok(None);
            }
            Ok(Some(bytes.to_vec()))
        })
    }

    fn test_connection(&self) -> BoxFuture<'_, String, MrwError> {
        Box::pin(async move {
            let response = self.request(Method::GET, "status").send().await?;

            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                return Err(MrwError::ApiError {
                    status_code: status.as_u16(),
                    message: body,
                });
            }

            let parsed: MrwStatusResponse = serde_json::from_str(&body)?;
            Ok(parsed
                .message
                .unwrap_or_else(|| "Connection unknown result".to_string()))
        })
    }
}

impl Drop for MrwSession {
    fn drop(&mut self) {
        debug!(franchise = %self.franchise, "released MRW session");
    }
}
