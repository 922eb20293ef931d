//! Builds a fresh, independent set of clients for each test.

use crate::clients::{BackendApiClient, ExternalApiClient, OAuthClient, ServiceClient};
use crate::config::TestConfig;
use crate::error::HarnessResult;
use crate::logging::log_debug;

/// One client per service, owned by a single test.
#[derive(Debug)]
pub struct Apis {
    pub cognito_oauth: OAuthClient,
    pub external_api: ExternalApiClient,
    pub backend: BackendApiClient,
}

impl Apis {
    /// Close every client's pool. Idempotent.
    pub fn close(&mut self) {
        self.cognito_oauth.close();
        self.external_api.close();
        self.backend.close();
    }
}

pub struct ApiFactory;

impl ApiFactory {
    /// Construct a new bundle. No request is sent and nothing is shared with
    /// bundles created earlier, so a token set in one test cannot leak into
    /// another.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Configuration`](crate::HarnessError::Configuration)
    /// if a client cannot be built (e.g. an invalid proxy URL) or
    /// [`HarnessError::InvalidHeader`](crate::HarnessError::InvalidHeader) if
    /// backend credentials cannot be encoded as a header.
    pub fn create(config: &TestConfig) -> HarnessResult<Apis> {
        let transport = &config.transport;

        let apis = Apis {
            cognito_oauth: OAuthClient::new(&config.urls.cognito_oauth, transport.clone())?,
            external_api: ExternalApiClient::new(&config.urls.external_api, transport.clone())?,
            backend: BackendApiClient::new(
                &config.urls.backend,
                &config.backend_credentials,
                transport.clone(),
            )?,
        };

        log_debug!(
            cognito_oauth = %config.urls.cognito_oauth,
            external_api = %config.urls.external_api,
            backend = %config.urls.backend,
            "API client bundle created"
        );

        Ok(apis)
    }
}
