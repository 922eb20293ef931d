use super::request::{encode_header, RequestBody, RequestDescriptor};
use super::response::ResponseEnvelope;
use crate::config::TransportOptions;
use crate::error::{HarnessError, HarnessResult, TimeoutPhase};
use crate::logging::log_debug;
use crate::reporting::{Exchange, ExchangeSink, TracingExchangeSink};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// Pooled connections plus the permits that cap in-flight requests.
#[derive(Debug)]
struct ConnectionPool {
    client: reqwest::Client,
    permits: Arc<Semaphore>,
}

/// HTTP transport shared by every per-service client.
///
/// Each instance owns its default headers and its connection pool, so two
/// instances never observe each other's auth state.
#[derive(Debug)]
pub struct HttpTransport {
    base_url: String,
    default_headers: HeaderMap,
    options: TransportOptions,
    pool: Option<ConnectionPool>,
    sink: Arc<dyn ExchangeSink>,
}

impl HttpTransport {
    /// Create a transport for `base_url`.
    ///
    /// With `prefer_proxy` set and a proxy configured in `options`, every
    /// request is routed through it. Otherwise proxies are disabled outright,
    /// including any picked up from the process environment.
    ///
    /// Builds the connection pool but opens no connection.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Configuration`] if the base URL or proxy URL is
    /// invalid or the underlying client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        prefer_proxy: bool,
        options: TransportOptions,
    ) -> HarnessResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| {
            HarnessError::configuration_error(format!("Invalid base URL {base_url:?}: {e}"))
        })?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(options.connect_timeout)
            .pool_max_idle_per_host(options.max_connections);

        builder = match (prefer_proxy, options.proxy_url.as_deref()) {
            (true, Some(proxy_url)) => {
                let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                    HarnessError::configuration_error(format!("Invalid proxy URL {proxy_url}: {e}"))
                })?;
                builder.proxy(proxy)
            }
            _ => builder.no_proxy(),
        };

        let client = builder.build().map_err(|e| {
            HarnessError::configuration_error(format!("Failed to build HTTP client for {base_url}: {e}"))
        })?;

        log_debug!(
            base_url = %base_url,
            uses_proxy = prefer_proxy && options.proxy_url.is_some(),
            max_connections = options.max_connections,
            headers_timeout_ms = options.headers_timeout.as_millis(),
            body_timeout_ms = options.body_timeout.as_millis(),
            connect_timeout_ms = options.connect_timeout.as_millis(),
            "HTTP transport created"
        );

        Ok(Self {
            pool: Some(ConnectionPool {
                client,
                permits: Arc::new(Semaphore::new(
                    options.max_connections.clamp(1, Semaphore::MAX_PERMITS),
                )),
            }),
            base_url,
            default_headers: HeaderMap::new(),
            options,
            sink: Arc::new(TracingExchangeSink),
        })
    }

    /// Replace the sink exchanges are reported to.
    pub fn with_sink(mut self, sink: Arc<dyn ExchangeSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Set or overwrite a header sent with every subsequent call.
    pub fn set_default_header(&mut self, name: &str, value: &str) -> HarnessResult<()> {
        let (name, value) = encode_header(name, value)?;
        self.default_headers.insert(name, value);
        Ok(())
    }

    /// Set the bearer token for subsequent calls, or drop it with `None`.
    pub fn set_auth_token(&mut self, token: Option<&str>) -> HarnessResult<()> {
        match token {
            Some(token) => {
                let value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|e| HarnessError::invalid_header(AUTHORIZATION.as_str(), e.to_string()))?;
                self.default_headers.insert(AUTHORIZATION, value);
            }
            None => {
                self.default_headers.remove(AUTHORIZATION);
            }
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_none()
    }

    /// Release pooled connections. Later calls fail with `PoolClosed`;
    /// closing twice is a no-op.
    pub fn close(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.permits.close();
            log_debug!(base_url = %self.base_url, "HTTP transport closed");
        }
    }

    pub async fn get(
        &self,
        endpoint: &str,
        headers: Option<HeaderMap>,
    ) -> HarnessResult<ResponseEnvelope> {
        self.send(Self::descriptor(Method::GET, endpoint, None, headers))
            .await
    }

    pub async fn post(
        &self,
        endpoint: &str,
        body: Option<RequestBody>,
        headers: Option<HeaderMap>,
    ) -> HarnessResult<ResponseEnvelope> {
        self.send(Self::descriptor(Method::POST, endpoint, body, headers))
            .await
    }

    pub async fn put(
        &self,
        endpoint: &str,
        body: Option<RequestBody>,
        headers: Option<HeaderMap>,
    ) -> HarnessResult<ResponseEnvelope> {
        self.send(Self::descriptor(Method::PUT, endpoint, body, headers))
            .await
    }

    pub async fn patch(
        &self,
        endpoint: &str,
        body: Option<RequestBody>,
        headers: Option<HeaderMap>,
    ) -> HarnessResult<ResponseEnvelope> {
        self.send(Self::descriptor(Method::PATCH, endpoint, body, headers))
            .await
    }

    pub async fn delete(
        &self,
        endpoint: &str,
        body: Option<RequestBody>,
        headers: Option<HeaderMap>,
    ) -> HarnessResult<ResponseEnvelope> {
        self.send(Self::descriptor(Method::DELETE, endpoint, body, headers))
            .await
    }

    fn descriptor(
        method: Method,
        endpoint: &str,
        body: Option<RequestBody>,
        headers: Option<HeaderMap>,
    ) -> RequestDescriptor {
        RequestDescriptor {
            method,
            endpoint: endpoint.to_string(),
            headers: headers.unwrap_or_default(),
            body,
        }
    }

    /// Issue a request and wait for the whole body.
    ///
    /// Non-2xx statuses are returned as ordinary envelopes. Only transport
    /// failures (connect, timeouts, a closed pool) are errors.
    pub async fn send(&self, request: RequestDescriptor) -> HarnessResult<ResponseEnvelope> {
        let pool = self
            .pool
            .as_ref()
            .ok_or_else(|| HarnessError::pool_closed(&self.base_url))?;

        let url = self.url_for(&request.endpoint);
        let headers = self.merge_headers(&request);

        // Held until the body is read so the cap covers the whole exchange
        let _permit = pool
            .permits
            .acquire()
            .await
            .map_err(|_| HarnessError::pool_closed(&self.base_url))?;

        let mut builder = pool
            .client
            .request(request.method.clone(), &url)
            .headers(headers.clone());
        builder = match &request.body {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Form(pairs)) => builder.form(pairs),
            None => builder,
        };

        log_debug!(
            method = %request.method,
            url = %url,
            has_body = request.body.is_some(),
            "Sending request"
        );

        let started = Instant::now();
        let response = match tokio::time::timeout(self.options.headers_timeout, builder.send()).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(self.classify_send_error(&url, e)),
            Err(_) => {
                return Err(HarnessError::timeout(
                    url,
                    TimeoutPhase::Headers,
                    millis(self.options.headers_timeout),
                ))
            }
        };

        let status = response.status().as_u16();
        let response_headers = response.headers().clone();

        let bytes = match tokio::time::timeout(self.options.body_timeout, response.bytes()).await {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                return Err(HarnessError::request_failed(
                    format!("Failed to read response body from {url}: {e}"),
                    Some(Box::new(e)),
                ))
            }
            Err(_) => {
                return Err(HarnessError::timeout(
                    url,
                    TimeoutPhase::Body,
                    millis(self.options.body_timeout),
                ))
            }
        };

        let envelope = ResponseEnvelope::from_parts(status, response_headers, &bytes);

        log_debug!(
            method = %request.method,
            url = %url,
            status = status,
            duration_ms = started.elapsed().as_millis(),
            "Response received"
        );

        if self.options.log_exchanges {
            self.sink.record(&Exchange {
                method: request.method.to_string(),
                url,
                request_headers: Exchange::redact_headers(&headers),
                request_body: request.body.as_ref().map(RequestBody::to_log_value),
                status,
                response_body: envelope.json.clone(),
                duration_ms: millis(started.elapsed()),
            });
        }

        Ok(envelope)
    }

    fn url_for(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }

    /// Defaults first, then per-call headers replacing any default with the
    /// same name. PUT and PATCH always carry a JSON content type unless the
    /// call sets its own.
    fn merge_headers(&self, request: &RequestDescriptor) -> HeaderMap {
        let mut merged = self.default_headers.clone();
        for name in request.headers.keys() {
            merged.remove(name);
        }
        for (name, value) in request.headers.iter() {
            merged.append(name.clone(), value.clone());
        }

        let forces_json = request.method == Method::PUT || request.method == Method::PATCH;
        if forces_json && !request.headers.contains_key(CONTENT_TYPE) {
            merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        merged
    }

    fn classify_send_error(&self, url: &str, error: reqwest::Error) -> HarnessError {
        if error.is_connect() {
            if error.is_timeout() {
                return HarnessError::timeout(
                    url,
                    TimeoutPhase::Connect,
                    millis(self.options.connect_timeout),
                );
            }
            return HarnessError::connect_failed(url, error.to_string(), Some(Box::new(error)));
        }
        if error.is_timeout() {
            return HarnessError::timeout(
                url,
                TimeoutPhase::Headers,
                millis(self.options.headers_timeout),
            );
        }
        HarnessError::request_failed(format!("Request to {url} failed: {error}"), Some(Box::new(error)))
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
