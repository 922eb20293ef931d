//! Validation report returned by the intake and backend services.

// Allow unwrap on the index pattern - it is a literal covered by tests
#![allow(clippy::unwrap_used)]

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type tag attached to each validation issue.
///
/// The set is dictated by the service. It is not always applied
/// consistently (`UnexpectedError` shows up for both format problems and
/// business rules on some paths), so tags are kept exactly as received. Tags
/// this crate does not know are preserved in [`ErrorType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorType {
    NotProvided,
    InvalidFormat,
    InvalidValue,
    InvalidType,
    OutOfRange,
    BusinessRuleViolation,
    NotAllowed,
    UnexpectedError,
    Other(String),
}

impl ErrorType {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorType::NotProvided => "NotProvided",
            ErrorType::InvalidFormat => "InvalidFormat",
            ErrorType::InvalidValue => "InvalidValue",
            ErrorType::InvalidType => "InvalidType",
            ErrorType::OutOfRange => "OutOfRange",
            ErrorType::BusinessRuleViolation => "BusinessRuleViolation",
            ErrorType::NotAllowed => "NotAllowed",
            ErrorType::UnexpectedError => "UnexpectedError",
            ErrorType::Other(tag) => tag,
        }
    }
}

impl From<String> for ErrorType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "NotProvided" => ErrorType::NotProvided,
            "InvalidFormat" => ErrorType::InvalidFormat,
            "InvalidValue" => ErrorType::InvalidValue,
            "InvalidType" => ErrorType::InvalidType,
            "OutOfRange" => ErrorType::OutOfRange,
            "BusinessRuleViolation" => ErrorType::BusinessRuleViolation,
            "NotAllowed" => ErrorType::NotAllowed,
            "UnexpectedError" => ErrorType::UnexpectedError,
            _ => ErrorType::Other(tag),
        }
    }
}

impl From<ErrorType> for String {
    fn from(error_type: ErrorType) -> Self {
        match error_type {
            ErrorType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static INDEX_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(\d+)\]").unwrap());

/// Path to a field in a payload, e.g. `wasteItems.0.ewcCodes`.
///
/// The service writes array indices either as `wasteItems.0` or
/// `wasteItems[0]`; both parse to the same segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Self {
        let dotted = INDEX_SEGMENT.replace_all(path, ".$1");
        let segments = dotted
            .split('.')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Dotted rendition: `wasteItems.0.ewcCodes`.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

/// One violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub key: String,
    pub error_type: ErrorType,
    pub message: String,
}

impl ValidationIssue {
    pub fn path(&self) -> FieldPath {
        FieldPath::parse(&self.key)
    }

    /// Whether this issue is about `path`, ignoring index notation.
    pub fn is_for(&self, path: &str) -> bool {
        self.path() == FieldPath::parse(path)
    }
}

/// Errors and warnings, in the order the service evaluated them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ValidationIssue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// First error reported against `path`.
    pub fn error_for(&self, path: &str) -> Option<&ValidationIssue> {
        self.errors.iter().find(|issue| issue.is_for(path))
    }

    /// First warning reported against `path`.
    pub fn warning_for(&self, path: &str) -> Option<&ValidationIssue> {
        self.warnings.iter().find(|issue| issue.is_for(path))
    }

    pub fn has_error(&self, path: &str, error_type: &ErrorType) -> bool {
        self.errors
            .iter()
            .any(|issue| issue.is_for(path) && &issue.error_type == error_type)
    }

    /// Error keys in reported order.
    pub fn error_keys(&self) -> Vec<&str> {
        self.errors.iter().map(|issue| issue.key.as_str()).collect()
    }
}

/// Body of a single-movement create or update response.
///
/// Creation success carries `wasteTrackingId`; rejection carries
/// `validation.errors`; an accepted update may carry `validation.warnings`
/// or nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementOutcome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waste_tracking_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
}

impl MovementOutcome {
    /// Validation report, or an empty one when the body had none.
    pub fn report(&self) -> ValidationReport {
        self.validation.clone().unwrap_or_default()
    }
}
