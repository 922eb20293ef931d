//! Per-service API clients
//!
//! - **oauth**: client-credentials grant
//! - **intake**: external movement intake API (bearer token)
//! - **backend**: bulk ingestion and audit retry (Basic auth)
//!
//! Each client wraps its own [`HttpTransport`] and only shapes requests.
//! Status codes and bodies come back unchanged.

pub mod backend;
pub mod intake;
pub mod oauth;

use crate::error::HarnessResult;
use crate::transport::HttpTransport;

pub use backend::{replay_concurrently, AuditLogRetry, BackendApiClient};
pub use intake::ExternalApiClient;
pub use oauth::OAuthClient;

/// Operations every service client gets from its transport.
pub trait ServiceClient {
    fn transport(&self) -> &HttpTransport;

    fn transport_mut(&mut self) -> &mut HttpTransport;

    /// Set or clear the bearer token for this client's later calls.
    fn set_auth_token(&mut self, token: Option<&str>) -> HarnessResult<()> {
        self.transport_mut().set_auth_token(token)
    }

    /// Release the client's connection pool. Safe to call repeatedly.
    fn close(&mut self) {
        self.transport_mut().close();
    }
}
