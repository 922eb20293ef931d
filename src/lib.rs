//! # waste-movement-tests
//!
//! End-to-end test harness for the waste movement tracking API and the OAuth2
//! client-credentials flow that guards it.
//!
//! ## Key Features
//!
//! - **Layered clients**: one HTTP transport, wrapped by a client per service
//! - **Per-test isolation**: [`ApiFactory`] builds a fresh bundle for each test
//! - **Typed contract**: validation reports, bulk statuses and reference data
//!   decode into types the tests assert on
//! - **Typed configuration**: every environment variable is an [`EnvVar`]; a
//!   missing one stops the run with the full list
//!
//! ## Example
//!
//! ```rust,no_run
//! use waste_movement_tests::{generators, MovementOutcome, TestContext};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut ctx = TestContext::from_env()?;
//! ctx.authenticate_intake().await?;
//!
//! let receipt = generators::valid_receipt("api-code");
//! let response = ctx.apis.external_api.receive_movement(&receipt).await?;
//! assert_eq!(response.status, 201);
//!
//! let outcome: MovementOutcome = response.decode()?;
//! assert!(outcome.waste_tracking_id.is_some());
//! ctx.close();
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

pub mod logging;

pub mod clients;
pub mod config;
pub mod context;
pub mod contract;
pub mod error;
pub mod factory;
pub mod generators;
pub mod reporting;
pub mod transport;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use clients::{
    replay_concurrently, AuditLogRetry, BackendApiClient, ExternalApiClient, OAuthClient,
    ServiceClient,
};
pub use config::{EnvVar, TestConfig, TransportOptions};
pub use context::TestContext;
pub use contract::{
    verify_replay, BulkItemOutcome, BulkMode, BulkUploadResponse, BulkUploadStatus, ErrorType,
    GenericErrorEnvelope, MovementOutcome, ReferenceCode, ReferenceDataCategory, TokenResponse,
    ValidationIssue, ValidationReport,
};
pub use error::{HarnessError, HarnessResult};
pub use factory::{ApiFactory, Apis};
pub use transport::{HttpTransport, RequestBody, RequestDescriptor, ResponseEnvelope};
