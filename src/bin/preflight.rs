//! Validates the run environment before any suite starts.
//!
//! Exits non-zero and names every missing variable, so CI fails fast instead
//! of every test failing for the same reason.

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use waste_movement_tests::logging::{log_error, log_info};
use waste_movement_tests::{ApiFactory, HarnessError, TestConfig};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = match TestConfig::from_env() {
        Ok(config) => config,
        Err(HarnessError::MissingEnvironment { missing }) => {
            for var in &missing {
                log_error!(variable = var.as_str(), "Required environment variable not set");
            }
            anyhow::bail!(
                "{} required environment variable(s) missing: {}",
                missing.len(),
                missing
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Err(other) => return Err(other).context("Environment validation failed"),
    };

    // Building the bundle rejects unparseable base URLs and credentials up front
    let mut apis = ApiFactory::create(&config).context("Client construction failed")?;
    apis.close();

    log_info!(
        external_api = %config.urls.external_api,
        backend = %config.urls.backend,
        "Environment OK"
    );
    Ok(())
}
