//! Uniform response envelope returned for every HTTP verb.

use crate::error::{HarnessError, HarnessResult};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Status, headers and parsed body of a completed call.
///
/// The body is parsed as JSON when possible. An empty body becomes
/// `Value::Null` and a body that is not JSON is kept verbatim as
/// `Value::String`, so a test can always inspect what the service sent.
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    pub status: u16,
    pub headers: HeaderMap,
    pub json: Value,
}

impl ResponseEnvelope {
    pub(crate) fn from_parts(status: u16, headers: HeaderMap, bytes: &[u8]) -> Self {
        let json = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
        };
        Self {
            status,
            headers,
            json,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header value as a string, if present and printable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decode the body into a typed contract shape.
    pub fn decode<T: DeserializeOwned>(&self) -> HarnessResult<T> {
        serde_json::from_value(self.json.clone()).map_err(|e| {
            HarnessError::response_parsing_error(format!(
                "status {} body did not match {}: {e}",
                self.status,
                std::any::type_name::<T>()
            ))
        })
    }
}
