// Test modules for waste-movement-tests crate
//
// Test organization follows the template pattern where each source file
// has a corresponding test file that focuses on business logic verification.
// Tests that need a live HTTP server live under tests/ and use wiremock.

pub mod helpers;

pub mod contract;
pub mod error;
pub mod generators;
