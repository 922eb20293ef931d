//! Environment-driven configuration for a test run.
//!
//! [`TestConfig::from_env`] is the only place that reads the process
//! environment. Everything downstream receives a typed [`TestConfig`].

use crate::error::{HarnessError, HarnessResult};
use crate::logging::log_debug;
use std::fmt;
use std::time::Duration;

/// Upper bound for `HTTP_MAX_CONNECTIONS`. Pools stay small so the token
/// endpoint is not rate limited.
pub const MAX_CONNECTIONS_CEILING: usize = 16;

/// Username presented with the backend shared secret when none is configured.
pub const DEFAULT_BACKEND_USERNAME: &str = "waste-movement-external-api";

/// Every environment variable the harness understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvVar {
    CognitoClientId,
    CognitoClientSecret,
    CognitoOauthBaseUrl,
    ExternalApiBaseUrl,
    BackendBaseUrl,
    BackendPassword,
    BackendUsername,
    HttpProxy,
    ApiKey,
    LogHttpExchanges,
    DisableAuth,
    HeadersTimeoutMs,
    BodyTimeoutMs,
    ConnectTimeoutMs,
    MaxConnections,
    ApiCode,
    ApiCodeSameOrganisation,
    ApiCodeOtherOrganisation,
    FailureMarkerDir,
}

impl EnvVar {
    /// Variables without which no suite can run.
    pub const REQUIRED: [EnvVar; 6] = [
        EnvVar::CognitoClientId,
        EnvVar::CognitoClientSecret,
        EnvVar::CognitoOauthBaseUrl,
        EnvVar::ExternalApiBaseUrl,
        EnvVar::BackendBaseUrl,
        EnvVar::BackendPassword,
    ];

    /// Canonical environment variable name.
    pub const fn as_str(self) -> &'static str {
        match self {
            EnvVar::CognitoClientId => "COGNITO_CLIENT_ID",
            EnvVar::CognitoClientSecret => "COGNITO_CLIENT_SECRET",
            EnvVar::CognitoOauthBaseUrl => "COGNITO_OAUTH_BASE_URL",
            EnvVar::ExternalApiBaseUrl => "WASTE_MOVEMENT_EXTERNAL_API_BASE_URL",
            EnvVar::BackendBaseUrl => "WASTE_MOVEMENT_BACKEND_BASE_URL",
            EnvVar::BackendPassword => "WASTE_MOVEMENT_BACKEND_PASSWORD",
            EnvVar::BackendUsername => "WASTE_MOVEMENT_BACKEND_USERNAME",
            EnvVar::HttpProxy => "HTTP_PROXY",
            EnvVar::ApiKey => "WASTE_MOVEMENT_API_KEY",
            EnvVar::LogHttpExchanges => "LOG_HTTP_EXCHANGES",
            EnvVar::DisableAuth => "DISABLE_AUTH",
            EnvVar::HeadersTimeoutMs => "HTTP_HEADERS_TIMEOUT_MS",
            EnvVar::BodyTimeoutMs => "HTTP_BODY_TIMEOUT_MS",
            EnvVar::ConnectTimeoutMs => "HTTP_CONNECT_TIMEOUT_MS",
            EnvVar::MaxConnections => "HTTP_MAX_CONNECTIONS",
            EnvVar::ApiCode => "TEST_API_CODE",
            EnvVar::ApiCodeSameOrganisation => "TEST_API_CODE_SAME_ORGANISATION",
            EnvVar::ApiCodeOtherOrganisation => "TEST_API_CODE_OTHER_ORGANISATION",
            EnvVar::FailureMarkerDir => "TEST_FAILURE_MARKER_DIR",
        }
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection policy shared by every client built for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Budget for receiving the status line and headers.
    pub headers_timeout: Duration,
    /// Budget for receiving the full body once headers arrived.
    pub body_timeout: Duration,
    /// Budget for establishing the connection.
    pub connect_timeout: Duration,
    /// Requests allowed in flight per client instance.
    pub max_connections: usize,
    /// Hand every request/response pair to the exchange sink.
    pub log_exchanges: bool,
    /// Proxy used by clients constructed with `prefer_proxy`.
    pub proxy_url: Option<String>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            headers_timeout: Duration::from_secs(30),
            body_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            // Serialized by default so the token endpoint is not rate limited
            max_connections: 1,
            log_exchanges: false,
            proxy_url: None,
        }
    }
}

/// Client-credentials pair for the OAuth token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Basic-auth credentials for backend-to-backend calls.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendCredentials {
    pub username: String,
    pub password: String,
    /// Static `x-api-key` header for local and dev stacks.
    pub api_key: Option<String>,
}

impl fmt::Debug for BackendCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

/// API codes the suites submit movements under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiCodes {
    /// Primary code used for creation.
    pub primary: Option<String>,
    /// Another code owned by the same organisation as `primary`.
    pub same_organisation: Option<String>,
    /// A code owned by a different organisation.
    pub other_organisation: Option<String>,
}

/// Base URLs of the three services under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrls {
    pub cognito_oauth: String,
    pub external_api: String,
    pub backend: String,
}

/// Fully validated configuration for a test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    pub urls: ServiceUrls,
    pub client_credentials: ClientCredentials,
    pub backend_credentials: BackendCredentials,
    pub transport: TransportOptions,
    pub api_codes: ApiCodes,
    /// Skip the token grant and send intake calls unauthenticated.
    pub disable_auth: bool,
    /// Directory failure markers are written to, when set.
    pub failure_marker_dir: Option<String>,
}

impl TestConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::MissingEnvironment`] listing every required
    /// variable that is unset or empty, or [`HarnessError::InvalidEnvironment`]
    /// when an optional variable cannot be parsed.
    pub fn from_env() -> HarnessResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    ///
    /// Empty and whitespace-only values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> HarnessResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |var: EnvVar| -> Option<String> {
            lookup(var.as_str())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let missing: Vec<EnvVar> = EnvVar::REQUIRED
            .iter()
            .copied()
            .filter(|var| read(*var).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(HarnessError::missing_environment(missing));
        }

        let required = |var: EnvVar| read(var).unwrap_or_default();

        let mut transport = TransportOptions::default();
        if let Some(ms) = parse_millis(EnvVar::HeadersTimeoutMs, read(EnvVar::HeadersTimeoutMs))? {
            transport.headers_timeout = ms;
        }
        if let Some(ms) = parse_millis(EnvVar::BodyTimeoutMs, read(EnvVar::BodyTimeoutMs))? {
            transport.body_timeout = ms;
        }
        if let Some(ms) = parse_millis(EnvVar::ConnectTimeoutMs, read(EnvVar::ConnectTimeoutMs))? {
            transport.connect_timeout = ms;
        }
        if let Some(raw) = read(EnvVar::MaxConnections) {
            let requested = parse_positive(EnvVar::MaxConnections, &raw)?;
            transport.max_connections = usize::try_from(requested)
                .ok()
                .filter(|n| *n <= MAX_CONNECTIONS_CEILING)
                .ok_or_else(|| {
                    HarnessError::invalid_environment(
                        EnvVar::MaxConnections,
                        format!("must not exceed {MAX_CONNECTIONS_CEILING}"),
                    )
                })?;
        }
        transport.log_exchanges = parse_bool(EnvVar::LogHttpExchanges, read(EnvVar::LogHttpExchanges))?;
        transport.proxy_url = read(EnvVar::HttpProxy);

        let config = Self {
            urls: ServiceUrls {
                cognito_oauth: required(EnvVar::CognitoOauthBaseUrl),
                external_api: required(EnvVar::ExternalApiBaseUrl),
                backend: required(EnvVar::BackendBaseUrl),
            },
            client_credentials: ClientCredentials {
                client_id: required(EnvVar::CognitoClientId),
                client_secret: required(EnvVar::CognitoClientSecret),
            },
            backend_credentials: BackendCredentials {
                username: read(EnvVar::BackendUsername)
                    .unwrap_or_else(|| DEFAULT_BACKEND_USERNAME.to_string()),
                password: required(EnvVar::BackendPassword),
                api_key: read(EnvVar::ApiKey),
            },
            transport,
            api_codes: ApiCodes {
                primary: read(EnvVar::ApiCode),
                same_organisation: read(EnvVar::ApiCodeSameOrganisation),
                other_organisation: read(EnvVar::ApiCodeOtherOrganisation),
            },
            disable_auth: parse_bool(EnvVar::DisableAuth, read(EnvVar::DisableAuth))?,
            failure_marker_dir: read(EnvVar::FailureMarkerDir),
        };

        log_debug!(
            cognito_oauth = %config.urls.cognito_oauth,
            external_api = %config.urls.external_api,
            backend = %config.urls.backend,
            has_proxy = config.transport.proxy_url.is_some(),
            has_api_key = config.backend_credentials.api_key.is_some(),
            log_exchanges = config.transport.log_exchanges,
            disable_auth = config.disable_auth,
            "Test configuration loaded and validated"
        );

        Ok(config)
    }
}

fn parse_positive(var: EnvVar, raw: &str) -> HarnessResult<u64> {
    let value: u64 = raw
        .parse()
        .map_err(|_| HarnessError::invalid_environment(var, "must be a positive integer"))?;
    if value == 0 {
        return Err(HarnessError::invalid_environment(var, "must be greater than zero"));
    }
    Ok(value)
}

fn parse_millis(var: EnvVar, raw: Option<String>) -> HarnessResult<Option<Duration>> {
    raw.map(|value| parse_positive(var, &value).map(Duration::from_millis))
        .transpose()
}

fn parse_bool(var: EnvVar, raw: Option<String>) -> HarnessResult<bool> {
    let Some(value) = raw else {
        return Ok(false);
    };
    if value.eq_ignore_ascii_case("true") || value == "1" {
        return Ok(true);
    }
    if value.eq_ignore_ascii_case("false") || value == "0" {
        return Ok(false);
    }
    Err(HarnessError::invalid_environment(
        var,
        "must be 1, 0, true, or false",
    ))
}
