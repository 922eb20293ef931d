//! Request descriptors.
//!
//! A [`RequestDescriptor`] is built fresh for every call and is consumed by
//! [`HttpTransport::send`](super::HttpTransport::send), so it cannot change
//! once it has been sent.

use crate::error::{HarnessError, HarnessResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON with `Content-Type: application/json`.
    Json(Value),
    /// Serialized as `application/x-www-form-urlencoded`.
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Serialize any payload into a JSON body.
    pub fn json<T: Serialize + ?Sized>(payload: &T) -> HarnessResult<Self> {
        serde_json::to_value(payload)
            .map(RequestBody::Json)
            .map_err(|e| HarnessError::request_failed(format!("Payload is not valid JSON: {e}"), None))
    }

    /// Build a form body from key/value pairs, preserving order.
    pub fn form<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        RequestBody::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// JSON rendition used for exchange logging.
    pub(crate) fn to_log_value(&self) -> Value {
        match self {
            RequestBody::Json(value) => value.clone(),
            RequestBody::Form(pairs) => Value::Object(
                pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            ),
        }
    }
}

/// One HTTP call: method, endpoint relative to the client base URL, per-call
/// headers and an optional body.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub endpoint: String,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl RequestDescriptor {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Add a single header, replacing any previous value with that name.
    pub fn with_header(mut self, name: &str, value: &str) -> HarnessResult<Self> {
        let (name, value) = encode_header(name, value)?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

/// Encode a header pair, rejecting names or values the wire cannot carry.
pub fn encode_header(name: &str, value: &str) -> HarnessResult<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| HarnessError::invalid_header(name, e.to_string()))?;
    let header_value =
        HeaderValue::from_str(value).map_err(|e| HarnessError::invalid_header(name, e.to_string()))?;
    Ok((header_name, header_value))
}

/// Build a header map from string pairs.
pub fn header_map<'a, I>(pairs: I) -> HarnessResult<HeaderMap>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        let (name, value) = encode_header(name, value)?;
        headers.insert(name, value);
    }
    Ok(headers)
}
