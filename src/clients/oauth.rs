//! OAuth2 client-credentials grant against the Cognito token endpoint.

use super::ServiceClient;
use crate::config::TransportOptions;
use crate::error::HarnessResult;
use crate::logging::log_debug;
use crate::transport::{header_map, HttpTransport, RequestBody, ResponseEnvelope};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const TOKEN_ENDPOINT: &str = "/oauth2/token";

/// Token endpoint client. The grant result is returned verbatim: a bad
/// client id or secret is a 400 envelope, not an error, and nothing is
/// retried.
#[derive(Debug)]
pub struct OAuthClient {
    transport: HttpTransport,
}

impl OAuthClient {
    pub fn new(base_url: impl Into<String>, options: TransportOptions) -> HarnessResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(base_url, true, options)?,
        })
    }

    pub fn from_transport(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// `Basic base64(client_id:client_secret)`.
    pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
        format!("Basic {}", STANDARD.encode(format!("{client_id}:{client_secret}")))
    }

    /// POST `grant_type=client_credentials` with Basic client authentication.
    pub async fn authenticate(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> HarnessResult<ResponseEnvelope> {
        log_debug!(client_id = %client_id, "Requesting client-credentials token");

        let authorization = Self::basic_authorization(client_id, client_secret);
        let headers = header_map([("authorization", authorization.as_str())])?;
        let body = RequestBody::form([("grant_type", "client_credentials")]);

        self.transport
            .post(TOKEN_ENDPOINT, Some(body), Some(headers))
            .await
    }
}

impl ServiceClient for OAuthClient {
    fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    fn transport_mut(&mut self) -> &mut HttpTransport {
        &mut self.transport
    }
}
