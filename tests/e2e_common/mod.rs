//! Shared setup for the live suites.
//!
//! Every live test builds its own [`TestContext`], runs its scenario as an
//! `anyhow::Result`, and hands the outcome to [`finish`], which writes a
//! failure marker before failing the test.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use waste_movement_tests::logging::{init_test_logging, log_warn};
use waste_movement_tests::TestContext;

/// Context with the intake client already authenticated.
pub async fn authenticated_context() -> TestContext {
    init_test_logging();
    let mut ctx = TestContext::from_env().expect("live suites need a complete environment");
    ctx.authenticate_intake()
        .await
        .expect("client-credentials grant should succeed");
    ctx
}

/// Context without running the token grant.
pub fn unauthenticated_context() -> TestContext {
    init_test_logging();
    TestContext::from_env().expect("live suites need a complete environment")
}

pub fn api_code(ctx: &TestContext) -> String {
    ctx.config
        .api_codes
        .primary
        .clone()
        .expect("TEST_API_CODE must be set for live suites")
}

/// Close the context and fail the test, with a marker, if the scenario failed.
pub fn finish(mut ctx: TestContext, test_name: &str, outcome: anyhow::Result<()>) {
    ctx.close();
    if let Err(err) = outcome {
        let reason = format!("{err:#}");
        if let Err(marker_err) = ctx.mark_failed(test_name, &reason) {
            log_warn!(test_name = %test_name, error = %marker_err, "Could not write failure marker");
        }
        panic!("{test_name} failed: {reason}");
    }
}
