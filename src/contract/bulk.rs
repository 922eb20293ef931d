//! Bulk upload response shapes and the replay (idempotency) check.

use super::validation::ValidationReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Whether a bulk request creates or updates movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkMode {
    Create,
    Update,
}

impl BulkMode {
    /// Status reported by the request that applied the batch.
    pub fn applied_status(self) -> BulkUploadStatus {
        match self {
            BulkMode::Create => BulkUploadStatus::MovementsCreated,
            BulkMode::Update => BulkUploadStatus::MovementsUpdated,
        }
    }

    /// Status reported by a request that found the batch already applied.
    pub fn replayed_status(self) -> BulkUploadStatus {
        match self {
            BulkMode::Create => BulkUploadStatus::MovementsNotCreated,
            BulkMode::Update => BulkUploadStatus::NoMovementsUpdated,
        }
    }

    /// HTTP status of a fully valid batch.
    pub fn success_status_code(self) -> u16 {
        match self {
            BulkMode::Create => 201,
            BulkMode::Update => 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BulkUploadStatus {
    MovementsCreated,
    MovementsNotCreated,
    MovementsUpdated,
    NoMovementsUpdated,
}

/// One movement in a successful bulk response. Updates return `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkMovement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_tracking_id: Option<String>,
}

/// Body of a 200/201 bulk response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUploadResponse {
    pub status: BulkUploadStatus,
    #[serde(default)]
    pub movements: Vec<BulkMovement>,
}

impl BulkUploadResponse {
    pub fn tracking_ids(&self) -> BTreeSet<&str> {
        self.movements
            .iter()
            .filter_map(|m| m.waste_tracking_id.as_deref())
            .collect()
    }
}

/// One element of a 400 bulk response, aligned with the input position.
/// A valid item is `{}`; an invalid one carries `validation.errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkItemOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
}

impl BulkItemOutcome {
    pub fn is_valid(&self) -> bool {
        self.validation
            .as_ref()
            .map_or(true, |report| report.errors.is_empty())
    }
}

/// Ways two replayed bulk responses can disagree with each other.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayViolation {
    #[error("expected one {applied:?} and one {replayed:?}, got {first:?} and {second:?}")]
    UnexpectedStatuses {
        applied: BulkUploadStatus,
        replayed: BulkUploadStatus,
        first: BulkUploadStatus,
        second: BulkUploadStatus,
    },

    #[error("responses list {first} and {second} movements")]
    MovementCountMismatch { first: usize, second: usize },

    #[error("tracking ids differ: {first:?} vs {second:?}")]
    TrackingIdMismatch {
        first: Vec<String>,
        second: Vec<String>,
    },
}

/// Which of the two responses applied the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedBy {
    First,
    Second,
}

/// Check that two responses to the same `bulkUploadId` and payload describe a
/// single application: exactly one applied status, exactly one replayed
/// status, and the same movements on both sides.
pub fn verify_replay(
    first: &BulkUploadResponse,
    second: &BulkUploadResponse,
    mode: BulkMode,
) -> Result<AppliedBy, ReplayViolation> {
    let applied = mode.applied_status();
    let replayed = mode.replayed_status();

    let applied_by = match (first.status, second.status) {
        (a, r) if a == applied && r == replayed => AppliedBy::First,
        (r, a) if a == applied && r == replayed => AppliedBy::Second,
        (first_status, second_status) => {
            return Err(ReplayViolation::UnexpectedStatuses {
                applied,
                replayed,
                first: first_status,
                second: second_status,
            })
        }
    };

    if first.movements.len() != second.movements.len() {
        return Err(ReplayViolation::MovementCountMismatch {
            first: first.movements.len(),
            second: second.movements.len(),
        });
    }

    let first_ids = first.tracking_ids();
    let second_ids = second.tracking_ids();
    if first_ids != second_ids {
        return Err(ReplayViolation::TrackingIdMismatch {
            first: first_ids.into_iter().map(str::to_string).collect(),
            second: second_ids.into_iter().map(str::to_string).collect(),
        });
    }

    Ok(applied_by)
}
