//! Typed shapes of what the services under test return.
//!
//! These types only decode responses. Deciding whether a response is the
//! right one is left to the tests.

pub mod auth;
pub mod bulk;
pub mod reference;
pub mod validation;

use serde::{Deserialize, Serialize};

pub use auth::{OAuthErrorBody, TokenResponse, INVALID_CLIENT};
pub use bulk::{
    verify_replay, AppliedBy, BulkItemOutcome, BulkMode, BulkMovement, BulkUploadResponse,
    BulkUploadStatus, ReplayViolation,
};
pub use reference::{ReferenceCode, ReferenceDataCategory, CONTAINER_TYPE_CODES};
pub use validation::{ErrorType, FieldPath, MovementOutcome, ValidationIssue, ValidationReport};

/// Generic failure body, e.g. the 500 returned for an empty bulk batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericErrorEnvelope {
    pub status_code: u16,
    pub error: String,
    pub message: String,
}

impl GenericErrorEnvelope {
    /// The fixed body of an unhandled server error.
    pub fn internal_server_error() -> Self {
        Self {
            status_code: 500,
            error: "Internal Server Error".to_string(),
            message: "An internal server error occurred".to_string(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}
