//! Reference data collections served by the intake API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Container type codes in the order the service returns them.
pub const CONTAINER_TYPE_CODES: [&str; 16] = [
    "BAG", "BAL", "BOX", "CAN", "CAR", "CAS", "CON", "DRU", "FIB", "IBC", "LOO", "PAL", "ROR",
    "SKI", "TAN", "WBI",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceDataCategory {
    ContainerTypes,
    HazardousPropertyCodes,
    PopNames,
    EwcCodes,
    DisposalOrRecoveryCodes,
}

impl ReferenceDataCategory {
    pub const ALL: [ReferenceDataCategory; 5] = [
        ReferenceDataCategory::ContainerTypes,
        ReferenceDataCategory::HazardousPropertyCodes,
        ReferenceDataCategory::PopNames,
        ReferenceDataCategory::EwcCodes,
        ReferenceDataCategory::DisposalOrRecoveryCodes,
    ];

    /// Path segment under `/reference-data/`.
    pub const fn path_segment(self) -> &'static str {
        match self {
            ReferenceDataCategory::ContainerTypes => "container-types",
            ReferenceDataCategory::HazardousPropertyCodes => "hazardous-property-codes",
            ReferenceDataCategory::PopNames => "pop-names",
            ReferenceDataCategory::EwcCodes => "ewc-codes",
            ReferenceDataCategory::DisposalOrRecoveryCodes => "disposal-or-recovery-codes",
        }
    }
}

impl fmt::Display for ReferenceDataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// A code entry. Categories differ in their extra fields, which are kept in
/// `extra` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCode {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
