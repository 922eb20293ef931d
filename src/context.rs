//! Per-test context: configuration plus a private client bundle.

use crate::clients::ServiceClient;
use crate::config::TestConfig;
use crate::contract::TokenResponse;
use crate::error::{HarnessError, HarnessResult};
use crate::factory::{ApiFactory, Apis};
use crate::logging::{log_debug, log_info};
use crate::reporting::FailureMarker;
use std::path::Path;
use std::sync::Arc;

/// Everything a test body needs, passed in explicitly.
#[derive(Debug)]
pub struct TestContext {
    pub config: Arc<TestConfig>,
    pub apis: Apis,
}

impl TestContext {
    /// Build a context with a fresh client bundle.
    pub fn new(config: Arc<TestConfig>) -> HarnessResult<Self> {
        let apis = ApiFactory::create(&config)?;
        Ok(Self { config, apis })
    }

    /// Load configuration from the environment and build a context.
    pub fn from_env() -> HarnessResult<Self> {
        Self::new(Arc::new(TestConfig::from_env()?))
    }

    /// Run the client-credentials grant and install the token on the intake
    /// client. Skipped when auth is disabled for the run.
    ///
    /// # Errors
    ///
    /// A rejected grant is reported as `ResponseParsing`, with the status and
    /// body in the message, since there is no token to install.
    pub async fn authenticate_intake(&mut self) -> HarnessResult<()> {
        if self.config.disable_auth {
            log_debug!("Auth disabled; intake client left unauthenticated");
            return Ok(());
        }

        let credentials = &self.config.client_credentials;
        let response = self
            .apis
            .cognito_oauth
            .authenticate(&credentials.client_id, &credentials.client_secret)
            .await?;

        if response.status != 200 {
            return Err(HarnessError::response_parsing_error(format!(
                "token grant returned {}: {}",
                response.status, response.json
            )));
        }

        let token: TokenResponse = response.decode()?;
        self.apis
            .external_api
            .set_auth_token(Some(&token.access_token))?;

        log_info!(
            expires_in = token.expires_in,
            token_type = %token.token_type,
            "Intake client authenticated"
        );
        Ok(())
    }

    /// Write a failure marker when the run has a marker directory.
    pub fn mark_failed(&self, test_name: &str, reason: &str) -> HarnessResult<()> {
        let Some(dir) = self.config.failure_marker_dir.as_deref() else {
            return Ok(());
        };
        FailureMarker::new(test_name, reason)
            .write_to(Path::new(dir))
            .map(|_| ())
            .map_err(|e| HarnessError::reporting_failed(dir, e.to_string()))
    }

    pub fn close(&mut self) {
        self.apis.close();
    }
}
