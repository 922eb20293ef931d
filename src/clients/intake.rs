//! External waste movement intake API.

use super::ServiceClient;
use crate::config::TransportOptions;
use crate::contract::ReferenceDataCategory;
use crate::error::HarnessResult;
use crate::transport::{HttpTransport, RequestBody, ResponseEnvelope};
use serde::Serialize;

pub const RECEIVE_MOVEMENT_ENDPOINT: &str = "/movements/receive";
pub const HEALTH_ENDPOINT: &str = "/health";

pub fn receive_movement_with_id_endpoint(waste_tracking_id: &str) -> String {
    format!("/movements/{waste_tracking_id}/receive")
}

pub fn reference_data_endpoint(category: ReferenceDataCategory) -> String {
    format!("/reference-data/{}", category.path_segment())
}

/// Client for the public intake API, authenticated with a bearer token set
/// through [`ServiceClient::set_auth_token`].
#[derive(Debug)]
pub struct ExternalApiClient {
    transport: HttpTransport,
}

impl ExternalApiClient {
    pub fn new(base_url: impl Into<String>, options: TransportOptions) -> HarnessResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(base_url, true, options)?,
        })
    }

    pub fn from_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Create a movement. 201 with `wasteTrackingId`, or 400 with a report.
    pub async fn receive_movement<T: Serialize + ?Sized>(
        &self,
        payload: &T,
    ) -> HarnessResult<ResponseEnvelope> {
        self.transport
            .post(
                RECEIVE_MOVEMENT_ENDPOINT,
                Some(RequestBody::json(payload)?),
                None,
            )
            .await
    }

    /// Update a movement. 200, 404 for an unknown id, or 400 with a report.
    pub async fn receive_movement_with_id<T: Serialize + ?Sized>(
        &self,
        waste_tracking_id: &str,
        payload: &T,
    ) -> HarnessResult<ResponseEnvelope> {
        self.transport
            .put(
                &receive_movement_with_id_endpoint(waste_tracking_id),
                Some(RequestBody::json(payload)?),
                None,
            )
            .await
    }

    pub async fn retrieve_reference_data(
        &self,
        category: ReferenceDataCategory,
    ) -> HarnessResult<ResponseEnvelope> {
        self.transport
            .get(&reference_data_endpoint(category), None)
            .await
    }

    pub async fn get_health(&self) -> HarnessResult<ResponseEnvelope> {
        self.transport.get(HEALTH_ENDPOINT, None).await
    }
}

impl ServiceClient for ExternalApiClient {
    fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    fn transport_mut(&mut self) -> &mut HttpTransport {
        &mut self.transport
    }
}
