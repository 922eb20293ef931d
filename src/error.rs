//! Error types for harness operations.
//!
//! This module provides structured error handling for the test harness,
//! including categorization and severity levels.
//!
//! # What is (and is not) an error
//!
//! The service under test reports its own failures through ordinary HTTP
//! responses: a 400 with a validation report, a 404, a 500 with a generic
//! envelope, or an OAuth `invalid_client` body. None of those are a
//! [`HarnessError`]. They come back as a
//! [`ResponseEnvelope`](crate::transport::ResponseEnvelope) and the test
//! decides whether the outcome is expected.
//!
//! [`HarnessError`] covers the harness itself failing:
//! - Configuration errors (missing or malformed environment variables)
//! - Transport failures (connection refused, timeouts)
//! - Local misuse (invalid header values, a closed connection pool)
//! - Failure markers that cannot be written
//!
//! No variant is retried. A transport failure fails the test that issued it.
//!
//! # Result Type
//!
//! Use [`HarnessResult<T>`] as a convenient alias for `Result<T, HarnessError>`:
//!
//! ```rust
//! use waste_movement_tests::HarnessResult;
//!
//! fn my_function() -> HarnessResult<String> {
//!     Ok("Success".to_string())
//! }
//! ```

use crate::config::EnvVar;
use crate::logging::{log_error, log_warn};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of errors for reporting decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The run is misconfigured. Nothing can execute until it is fixed.
    Configuration,

    /// The harness could not reach, or hear back from, a service.
    Transport,

    /// The harness was used incorrectly (bad header value, closed pool).
    Usage,

    /// A service answered with something the harness could not decode.
    Contract,

    /// A run artifact (failure marker) could not be written.
    Reporting,
}

/// Severity level for logging decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The whole run must abort.
    Fatal,

    /// The current test must fail.
    Error,

    /// Unexpected but local to one assertion.
    Warning,
}

/// Which transport phase exceeded its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPhase {
    /// Establishing the TCP/TLS connection.
    Connect,
    /// Waiting for the status line and headers.
    Headers,
    /// Reading the response body.
    Body,
}

impl fmt::Display for TimeoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutPhase::Connect => write!(f, "connect"),
            TimeoutPhase::Headers => write!(f, "headers"),
            TimeoutPhase::Body => write!(f, "body"),
        }
    }
}

// ============================================================================
// Harness Error types
// ============================================================================

/// Convenient result type for harness operations.
pub type HarnessResult<T> = std::result::Result<T, HarnessError>;

/// Errors raised by the harness itself.
///
/// | Variant | Category | Severity |
/// |---------|----------|----------|
/// | `MissingEnvironment` | Configuration | Fatal |
/// | `InvalidEnvironment` | Configuration | Fatal |
/// | `Configuration` | Configuration | Fatal |
/// | `InvalidHeader` | Usage | Error |
/// | `PoolClosed` | Usage | Error |
/// | `Connect` | Transport | Error |
/// | `Timeout` | Transport | Error |
/// | `RequestFailed` | Transport | Error |
/// | `ResponseParsing` | Contract | Warning |
/// | `Reporting` | Reporting | Warning |
#[derive(Error, Debug)]
pub enum HarnessError {
    /// One or more required environment variables are unset or empty.
    ///
    /// Every missing variable is listed, not only the first one found.
    #[error("Missing required environment variables: {}", format_env_list(.missing))]
    MissingEnvironment {
        /// The variables that were not provided, in declaration order.
        missing: Vec<EnvVar>,
    },

    /// An environment variable is present but cannot be parsed.
    #[error("Invalid value for {variable}: {reason}")]
    InvalidEnvironment {
        /// The offending variable.
        variable: EnvVar,
        /// Why the value was rejected.
        reason: String,
    },

    /// Client construction failed (unparseable base URL, bad proxy URL, TLS setup).
    #[error("Harness configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// A header name or value could not be encoded.
    #[error("Invalid header {name}: {message}")]
    InvalidHeader {
        /// The header being set.
        name: String,
        /// Details from the header encoder.
        message: String,
    },

    /// The client's connection pool was closed before this call.
    #[error("Connection pool for {base_url} is closed")]
    PoolClosed {
        /// Base URL of the closed client.
        base_url: String,
    },

    /// The connection could not be established.
    #[error("Connection to {url} failed: {message}")]
    Connect {
        /// Full URL of the request.
        url: String,
        /// Details of the failure.
        message: String,
        /// The underlying error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A transport phase exceeded its configured timeout.
    #[error("Request to {url} timed out waiting for {phase} after {timeout_ms}ms")]
    Timeout {
        /// Full URL of the request.
        url: String,
        /// The phase that timed out.
        phase: TimeoutPhase,
        /// The budget that was exceeded.
        timeout_ms: u64,
    },

    /// Any other failure while sending or receiving.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A response body did not match the shape a test asked for.
    #[error("Response parsing failed: {message}")]
    ResponseParsing {
        /// Details about the parsing failure.
        message: String,
    },

    /// A failure marker or other run artifact could not be written.
    #[error("Could not write {path}: {message}")]
    Reporting {
        /// Target file or directory.
        path: String,
        /// Details of the I/O failure.
        message: String,
    },
}

fn format_env_list(vars: &[EnvVar]) -> String {
    vars.iter()
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl HarnessError {
    /// Get the error category for reporting decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingEnvironment { .. } => ErrorCategory::Configuration,
            Self::InvalidEnvironment { .. } => ErrorCategory::Configuration,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::InvalidHeader { .. } => ErrorCategory::Usage,
            Self::PoolClosed { .. } => ErrorCategory::Usage,
            Self::Connect { .. } => ErrorCategory::Transport,
            Self::Timeout { .. } => ErrorCategory::Transport,
            Self::RequestFailed { .. } => ErrorCategory::Transport,
            Self::ResponseParsing { .. } => ErrorCategory::Contract,
            Self::Reporting { .. } => ErrorCategory::Reporting,
        }
    }

    /// Get the error severity. `Fatal` aborts the run before any test executes.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Fatal,
            ErrorCategory::Transport | ErrorCategory::Usage => ErrorSeverity::Error,
            ErrorCategory::Contract | ErrorCategory::Reporting => ErrorSeverity::Warning,
        }
    }

    /// Missing variables when this is a `MissingEnvironment` error.
    pub fn missing_variables(&self) -> &[EnvVar] {
        match self {
            Self::MissingEnvironment { missing } => missing,
            _ => &[],
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn missing_environment(missing: Vec<EnvVar>) -> Self {
        log_error!(
            error_type = "missing_environment",
            missing = %format_env_list(&missing),
            missing_count = missing.len(),
            "Required environment variables are not set"
        );
        Self::MissingEnvironment { missing }
    }

    pub fn invalid_environment(variable: EnvVar, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        log_error!(
            error_type = "invalid_environment",
            variable = variable.as_str(),
            reason = %reason,
            "Environment variable could not be parsed"
        );
        Self::InvalidEnvironment { variable, reason }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Harness configuration failed"
        );
        Self::Configuration { message }
    }

    pub fn invalid_header(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        log_warn!(
            error_type = "invalid_header",
            header = %name,
            message = %message,
            "Header could not be encoded"
        );
        Self::InvalidHeader { name, message }
    }

    pub fn pool_closed(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        log_warn!(
            error_type = "pool_closed",
            base_url = %base_url,
            "Request issued on a closed client"
        );
        Self::PoolClosed { base_url }
    }

    pub fn connect_failed(
        url: impl Into<String>,
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let url = url.into();
        let message = message.into();
        log_error!(
            error_type = "connect_failed",
            url = %url,
            message = %message,
            "Could not connect to service"
        );
        Self::Connect {
            url,
            message,
            source,
        }
    }

    pub fn timeout(url: impl Into<String>, phase: TimeoutPhase, timeout_ms: u64) -> Self {
        let url = url.into();
        log_error!(
            error_type = "timeout",
            url = %url,
            phase = %phase,
            timeout_ms = timeout_ms,
            "Request timed out"
        );
        Self::Timeout {
            url,
            phase,
            timeout_ms,
        }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "HTTP request failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing_error",
            message = %message,
            "Response body did not match expected shape"
        );
        Self::ResponseParsing { message }
    }

    pub fn reporting_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        let path = path.into();
        let message = message.into();
        log_warn!(
            error_type = "reporting_failed",
            path = %path,
            message = %message,
            "Run artifact could not be written"
        );
        Self::Reporting { path, message }
    }
}
