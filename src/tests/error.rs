// Unit Tests for Harness Errors
//
// UNIT UNDER TEST: HarnessError
//
// BUSINESS RESPONSIBILITY:
//   - Distinguishes harness failures from service responses
//   - Categorizes failures so configuration problems abort the run
//   - Renders messages that name what went wrong
//
// TEST COVERAGE:
//   - Category and severity mapping for every variant
//   - Display output for missing environment and timeouts

use crate::config::EnvVar;
use crate::error::{ErrorCategory, ErrorSeverity, HarnessError, TimeoutPhase};

#[cfg(test)]
mod harness_error_tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_fatal() {
        // Arrange
        let errors = vec![
            HarnessError::missing_environment(vec![EnvVar::CognitoClientId]),
            HarnessError::invalid_environment(EnvVar::MaxConnections, "must be greater than zero"),
            HarnessError::configuration_error("bad proxy"),
        ];

        // Act & Assert
        for error in errors {
            assert_eq!(error.category(), ErrorCategory::Configuration);
            assert_eq!(error.severity(), ErrorSeverity::Fatal);
        }
    }

    #[test]
    fn test_transport_errors_fail_the_test() {
        // Arrange
        let errors = vec![
            HarnessError::connect_failed("http://localhost:1/x", "refused", None),
            HarnessError::timeout("http://localhost:1/x", TimeoutPhase::Headers, 100),
            HarnessError::request_failed("reset", None),
        ];

        // Act & Assert
        for error in errors {
            assert_eq!(error.category(), ErrorCategory::Transport);
            assert_eq!(error.severity(), ErrorSeverity::Error);
        }
    }

    #[test]
    fn test_usage_and_contract_categories() {
        // Arrange
        let pool = HarnessError::pool_closed("http://localhost:1");
        let header = HarnessError::invalid_header("x-api-key", "invalid value");
        let parsing = HarnessError::response_parsing_error("missing field");

        // Assert
        assert_eq!(pool.category(), ErrorCategory::Usage);
        assert_eq!(header.category(), ErrorCategory::Usage);
        assert_eq!(parsing.category(), ErrorCategory::Contract);
        assert_eq!(parsing.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_unwritable_marker_is_a_reporting_error() {
        // Arrange
        let error = HarnessError::reporting_failed("/read-only/markers", "permission denied");

        // Assert
        assert_eq!(error.category(), ErrorCategory::Reporting);
        assert_eq!(error.severity(), ErrorSeverity::Warning);
        assert_eq!(
            error.to_string(),
            "Could not write /read-only/markers: permission denied"
        );
    }

    #[test]
    fn test_missing_environment_message_names_each_variable() {
        // Arrange
        let error = HarnessError::missing_environment(vec![
            EnvVar::CognitoOauthBaseUrl,
            EnvVar::BackendBaseUrl,
        ]);

        // Act
        let message = error.to_string();

        // Assert
        assert_eq!(
            message,
            "Missing required environment variables: COGNITO_OAUTH_BASE_URL, WASTE_MOVEMENT_BACKEND_BASE_URL"
        );
        assert_eq!(error.missing_variables().len(), 2);
    }

    #[test]
    fn test_timeout_message_names_phase() {
        // Arrange
        let error = HarnessError::timeout("http://svc/health", TimeoutPhase::Body, 250);

        // Act
        let message = error.to_string();

        // Assert
        assert!(message.contains("body"));
        assert!(message.contains("250ms"));
        assert!(error.missing_variables().is_empty());
    }
}
