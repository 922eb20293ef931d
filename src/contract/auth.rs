//! OAuth2 token endpoint bodies.

use serde::{Deserialize, Serialize};

/// Error code returned for an unknown client id or a wrong secret.
pub const INVALID_CLIENT: &str = "invalid_client";

/// Successful client-credentials grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub token_type: String,
}

/// Rejected grant, e.g. `{"error": "invalid_client"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthErrorBody {
    pub error: String,
}

impl OAuthErrorBody {
    pub fn is_invalid_client(&self) -> bool {
        self.error == INVALID_CLIENT
    }
}
