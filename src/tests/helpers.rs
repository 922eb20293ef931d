//! Test helper utilities
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

use std::collections::HashMap;

/// Environment with every required variable set to a usable value.
pub fn complete_env() -> HashMap<&'static str, String> {
    HashMap::from([
        ("COGNITO_CLIENT_ID", "test-client-id".to_string()),
        ("COGNITO_CLIENT_SECRET", "test-client-secret".to_string()),
        ("COGNITO_OAUTH_BASE_URL", "http://localhost:4001".to_string()),
        (
            "WASTE_MOVEMENT_EXTERNAL_API_BASE_URL",
            "http://localhost:3001".to_string(),
        ),
        ("WASTE_MOVEMENT_BACKEND_BASE_URL", "http://localhost:3002".to_string()),
        ("WASTE_MOVEMENT_BACKEND_PASSWORD", "test-password".to_string()),
    ])
}

/// Lookup closure over a fixed map, for `TestConfig::from_lookup`.
pub fn lookup_in(env: HashMap<&'static str, String>) -> impl Fn(&str) -> Option<String> {
    move |name: &str| env.get(name).cloned()
}
