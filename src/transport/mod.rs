//! HTTP transport layer
//!
//! Every per-service client composes one [`HttpTransport`]:
//!
//! ```text
//! HttpTransport          <- verbs, header merging, pool, timeouts
//!      |        |        |
//! OAuthClient  ExternalApiClient  BackendApiClient   <- endpoint shaping + auth
//!      \        |        /
//!          ApiFactory                                <- fresh bundle per test
//! ```

mod client;
mod request;
mod response;

pub use client::HttpTransport;
pub use request::{encode_header, header_map, RequestBody, RequestDescriptor};
pub use response::ResponseEnvelope;
