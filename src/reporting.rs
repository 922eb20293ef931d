//! Reporting collaborators.
//!
//! Two outputs leave the harness besides test results:
//! - request/response exchanges, handed to an [`ExchangeSink`] when exchange
//!   logging is enabled
//! - failure markers, small JSON files a CI job picks up after the run

use crate::logging::{log_info, log_warn};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, AUTHORIZATION};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One request/response pair as seen by the transport.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub method: String,
    pub url: String,
    /// Request headers with credentials redacted.
    pub request_headers: BTreeMap<String, String>,
    pub request_body: Option<Value>,
    pub status: u16,
    pub response_body: Value,
    pub duration_ms: u64,
}

impl Exchange {
    pub(crate) fn redact_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
        headers
            .iter()
            .map(|(name, value)| {
                let rendered = if *name == AUTHORIZATION || name.as_str() == "x-api-key" {
                    "<redacted>".to_string()
                } else {
                    value.to_str().unwrap_or("<binary>").to_string()
                };
                (name.as_str().to_string(), rendered)
            })
            .collect()
    }
}

/// Receives exchanges for an external report.
///
/// `record` cannot fail: a sink that has trouble writing must swallow the
/// problem itself so the call that produced the exchange is unaffected.
pub trait ExchangeSink: Send + Sync + Debug {
    fn record(&self, exchange: &Exchange);
}

/// Emits each exchange as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingExchangeSink;

impl ExchangeSink for TracingExchangeSink {
    fn record(&self, exchange: &Exchange) {
        let request_body = exchange
            .request_body
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_default();
        log_info!(
            method = %exchange.method,
            url = %exchange.url,
            status = exchange.status,
            duration_ms = exchange.duration_ms,
            request_headers = ?exchange.request_headers,
            request_body = %request_body,
            response_body = %exchange.response_body,
            "HTTP exchange"
        );
    }
}

/// Marker written for a failed test so CI can flag the run.
#[derive(Debug, Clone, Serialize)]
pub struct FailureMarker {
    pub test_name: String,
    pub reason: String,
    pub failed_at: DateTime<Utc>,
}

impl FailureMarker {
    pub fn new(test_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            test_name: test_name.into(),
            reason: reason.into(),
            failed_at: Utc::now(),
        }
    }

    /// File name used for this marker: the test name with path separators
    /// and other unsafe characters replaced.
    pub fn file_name(&self) -> String {
        let safe: String = self
            .test_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("{safe}.failed.json")
    }

    /// Write the marker into `dir`, creating the directory if needed.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name());
        let bytes = serde_json::to_vec_pretty(self)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
        fs::write(&path, bytes)?;
        log_warn!(
            test_name = %self.test_name,
            path = %path.display(),
            "Failure marker written"
        );
        Ok(path)
    }
}
