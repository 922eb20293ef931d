//! Test helper utilities for waste-movement-tests integration tests
//!
//! Shared fixtures for the mock-server suites: configuration pointing at
//! `wiremock` servers and a sink that records exchanges in memory.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use waste_movement_tests::config::TransportOptions;
use waste_movement_tests::logging::init_test_logging;
use waste_movement_tests::reporting::{Exchange, ExchangeSink};
use waste_movement_tests::{HttpTransport, TestConfig};
use wiremock::MockServer;

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const BACKEND_PASSWORD: &str = "test-backend-password";
pub const API_KEY: &str = "test-api-key";

/// Configuration with every service pointed at `server`.
pub fn mock_config(server: &MockServer) -> TestConfig {
    mock_config_with(server, &[])
}

/// Same as [`mock_config`] with extra variables layered on top.
pub fn mock_config_with(server: &MockServer, extra: &[(&'static str, &str)]) -> TestConfig {
    init_test_logging();

    let mut env: HashMap<&'static str, String> = HashMap::from([
        ("COGNITO_CLIENT_ID", CLIENT_ID.to_string()),
        ("COGNITO_CLIENT_SECRET", CLIENT_SECRET.to_string()),
        ("COGNITO_OAUTH_BASE_URL", server.uri()),
        ("WASTE_MOVEMENT_EXTERNAL_API_BASE_URL", server.uri()),
        ("WASTE_MOVEMENT_BACKEND_BASE_URL", server.uri()),
        ("WASTE_MOVEMENT_BACKEND_PASSWORD", BACKEND_PASSWORD.to_string()),
        ("WASTE_MOVEMENT_API_KEY", API_KEY.to_string()),
    ]);
    for &(name, value) in extra {
        env.insert(name, value.to_string());
    }

    TestConfig::from_lookup(|name| env.get(name).cloned()).expect("mock config should load")
}

/// Options with short timeouts so failure paths finish quickly.
pub fn fast_options() -> TransportOptions {
    TransportOptions {
        headers_timeout: Duration::from_millis(300),
        body_timeout: Duration::from_millis(300),
        connect_timeout: Duration::from_millis(300),
        ..TransportOptions::default()
    }
}

pub fn transport_for(server: &MockServer) -> HttpTransport {
    init_test_logging();
    HttpTransport::new(server.uri(), false, fast_options()).expect("transport builds")
}

/// Keeps every exchange it is handed.
#[derive(Debug, Default)]
pub struct RecordingSink {
    exchanges: Mutex<Vec<Exchange>>,
}

impl RecordingSink {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn exchanges(&self) -> Vec<Exchange> {
        self.exchanges.lock().expect("sink lock").clone()
    }
}

impl ExchangeSink for RecordingSink {
    fn record(&self, exchange: &Exchange) {
        self.exchanges.lock().expect("sink lock").push(exchange.clone());
    }
}

/// A local port nothing is listening on.
pub fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
