//! Backend-to-backend API: bulk ingestion and audit log retry.

use super::{OAuthClient, ServiceClient};
use crate::config::{BackendCredentials, TransportOptions};
use crate::contract::BulkMode;
use crate::error::HarnessResult;
use crate::logging::log_debug;
use crate::transport::{HttpTransport, RequestBody, ResponseEnvelope};
use serde::{Deserialize, Serialize};

pub const RETRY_AUDIT_LOG_ENDPOINT: &str = "/movements/retry-audit-log";
pub const API_KEY_HEADER: &str = "x-api-key";

pub fn bulk_receive_endpoint(bulk_upload_id: &str) -> String {
    format!("/bulk/{bulk_upload_id}/movements/receive")
}

/// Body of an audit log retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogRetry {
    pub waste_tracking_id: String,
    pub revision: u32,
}

/// Client for the backend service. Every call carries Basic auth with the
/// shared secret and, when configured, the static API key.
#[derive(Debug)]
pub struct BackendApiClient {
    transport: HttpTransport,
}

impl BackendApiClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: &BackendCredentials,
        options: TransportOptions,
    ) -> HarnessResult<Self> {
        let transport = HttpTransport::new(base_url, false, options)?;
        Self::from_transport(transport, credentials)
    }

    pub fn from_transport(
        mut transport: HttpTransport,
        credentials: &BackendCredentials,
    ) -> HarnessResult<Self> {
        let authorization =
            OAuthClient::basic_authorization(&credentials.username, &credentials.password);
        transport.set_default_header("authorization", &authorization)?;
        if let Some(api_key) = &credentials.api_key {
            transport.set_default_header(API_KEY_HEADER, api_key)?;
        }
        Ok(Self { transport })
    }

    /// POST a batch for creation under a client-chosen idempotency id.
    pub async fn bulk_upload_create<T: Serialize>(
        &self,
        bulk_upload_id: &str,
        movements: &[T],
    ) -> HarnessResult<ResponseEnvelope> {
        self.bulk_upload(BulkMode::Create, bulk_upload_id, movements)
            .await
    }

    /// PUT a batch of updates under a client-chosen idempotency id.
    pub async fn bulk_upload_update<T: Serialize>(
        &self,
        bulk_upload_id: &str,
        movements: &[T],
    ) -> HarnessResult<ResponseEnvelope> {
        self.bulk_upload(BulkMode::Update, bulk_upload_id, movements)
            .await
    }

    pub async fn bulk_upload<T: Serialize>(
        &self,
        mode: BulkMode,
        bulk_upload_id: &str,
        movements: &[T],
    ) -> HarnessResult<ResponseEnvelope> {
        log_debug!(
            bulk_upload_id = %bulk_upload_id,
            mode = ?mode,
            movement_count = movements.len(),
            "Submitting bulk upload"
        );

        let endpoint = bulk_receive_endpoint(bulk_upload_id);
        let body = Some(RequestBody::json(movements)?);
        match mode {
            BulkMode::Create => self.transport.post(&endpoint, body, None).await,
            BulkMode::Update => self.transport.put(&endpoint, body, None).await,
        }
    }

    /// Ask the backend to re-emit the audit record for a movement revision.
    pub async fn retry_audit_log(&self, retry: &AuditLogRetry) -> HarnessResult<ResponseEnvelope> {
        self.transport
            .post(RETRY_AUDIT_LOG_ENDPOINT, Some(RequestBody::json(retry)?), None)
            .await
    }
}

impl ServiceClient for BackendApiClient {
    fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    fn transport_mut(&mut self) -> &mut HttpTransport {
        &mut self.transport
    }
}

/// Send the same batch through two clients at once and wait for both.
///
/// Using two clients gives each request its own pool, so the capped
/// per-client concurrency does not serialize the pair.
pub async fn replay_concurrently<T: Serialize>(
    first: &BackendApiClient,
    second: &BackendApiClient,
    mode: BulkMode,
    bulk_upload_id: &str,
    movements: &[T],
) -> HarnessResult<(ResponseEnvelope, ResponseEnvelope)> {
    let (a, b) = futures_util::future::join(
        first.bulk_upload(mode, bulk_upload_id, movements),
        second.bulk_upload(mode, bulk_upload_id, movements),
    )
    .await;
    Ok((a?, b?))
}
