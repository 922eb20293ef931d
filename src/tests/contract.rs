// Unit Tests for Response Contracts
//
// UNIT UNDER TEST: validation reports, bulk responses, OAuth and reference bodies
//
// BUSINESS RESPONSIBILITY:
//   - Decodes service responses into typed shapes without judging them
//   - Matches validation keys regardless of index notation
//   - Detects whether two replayed bulk requests applied the batch once
//
// TEST COVERAGE:
//   - FieldPath parsing of dotted and bracketed indices
//   - Unknown error type tags survive a decode
//   - ValidationReport lookups and ordering
//   - verify_replay acceptance and every violation
//   - Generic error envelope and OAuth bodies

use crate::contract::{
    verify_replay, AppliedBy, BulkItemOutcome, BulkMode, BulkMovement, BulkUploadResponse,
    BulkUploadStatus, ErrorType, FieldPath, GenericErrorEnvelope, MovementOutcome,
    OAuthErrorBody, ReferenceCode, ReferenceDataCategory, ReplayViolation, TokenResponse,
    ValidationReport,
};
use serde_json::json;

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_field_path_treats_bracket_and_dot_indices_alike() {
        // Act
        let bracketed = FieldPath::parse("wasteItems[0].ewcCodes");
        let dotted = FieldPath::parse("wasteItems.0.ewcCodes");

        // Assert
        assert_eq!(bracketed, dotted);
        assert_eq!(bracketed.segments(), &["wasteItems", "0", "ewcCodes"]);
        assert_eq!(bracketed.to_string(), "wasteItems.0.ewcCodes");
    }

    #[test]
    fn test_unknown_error_type_is_preserved() {
        // Arrange
        let body = json!({
            "validation": {
                "errors": [
                    { "key": "apiCode", "errorType": "SomethingNew", "message": "\"apiCode\" is odd" }
                ]
            }
        });

        // Act
        let outcome: MovementOutcome = serde_json::from_value(body).expect("decodes");
        let issue = &outcome.report().errors[0];

        // Assert
        assert_eq!(issue.error_type, ErrorType::Other("SomethingNew".to_string()));
        assert_eq!(
            serde_json::to_value(&issue.error_type).expect("encodes"),
            json!("SomethingNew")
        );
    }

    #[test]
    fn test_report_lookups_follow_reported_order() {
        // Arrange
        let report: ValidationReport = serde_json::from_value(json!({
            "errors": [
                { "key": "wasteItems[0].ewcCodes", "errorType": "InvalidValue", "message": "first" },
                { "key": "wasteItems.0.ewcCodes", "errorType": "NotProvided", "message": "second" },
                { "key": "carrier.registrationNumber", "errorType": "NotProvided", "message": "third" }
            ],
            "warnings": [
                { "key": "wasteItems.0.disposalOrRecoveryCodes", "errorType": "NotProvided", "message": "w" }
            ]
        }))
        .expect("decodes");

        // Act
        let first = report.error_for("wasteItems.0.ewcCodes");

        // Assert
        assert_eq!(first.map(|i| i.message.as_str()), Some("first"));
        assert!(report.has_error("wasteItems[0].ewcCodes", &ErrorType::NotProvided));
        assert!(!report.has_error("carrier.registrationNumber", &ErrorType::InvalidValue));
        assert!(report.warning_for("wasteItems[0].disposalOrRecoveryCodes").is_some());
        assert_eq!(
            report.error_keys(),
            vec![
                "wasteItems[0].ewcCodes",
                "wasteItems.0.ewcCodes",
                "carrier.registrationNumber"
            ]
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn test_successful_creation_has_id_and_no_report() {
        // Act
        let outcome: MovementOutcome =
            serde_json::from_value(json!({ "wasteTrackingId": "25ABC123" })).expect("decodes");

        // Assert
        assert_eq!(outcome.waste_tracking_id.as_deref(), Some("25ABC123"));
        assert!(outcome.report().is_clean());
    }

    #[test]
    fn test_empty_update_body_decodes() {
        // Act
        let outcome: MovementOutcome = serde_json::from_value(json!({})).expect("decodes");

        // Assert
        assert_eq!(outcome, MovementOutcome::default());
    }
}

#[cfg(test)]
mod bulk_tests {
    use super::*;

    fn response(status: BulkUploadStatus, ids: &[&str]) -> BulkUploadResponse {
        BulkUploadResponse {
            status,
            movements: ids
                .iter()
                .map(|id| BulkMovement {
                    waste_tracking_id: Some((*id).to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn test_replay_accepts_either_order() {
        // Arrange
        let created = response(BulkUploadStatus::MovementsCreated, &["A", "B"]);
        let replayed = response(BulkUploadStatus::MovementsNotCreated, &["B", "A"]);

        // Act & Assert
        assert_eq!(
            verify_replay(&created, &replayed, BulkMode::Create),
            Ok(AppliedBy::First)
        );
        assert_eq!(
            verify_replay(&replayed, &created, BulkMode::Create),
            Ok(AppliedBy::Second)
        );
    }

    #[test]
    fn test_replay_of_update_compares_empty_movements() {
        // Arrange
        let empty = BulkMovement::default();
        let updated = BulkUploadResponse {
            status: BulkUploadStatus::MovementsUpdated,
            movements: vec![empty.clone(), empty.clone()],
        };
        let replayed = BulkUploadResponse {
            status: BulkUploadStatus::NoMovementsUpdated,
            movements: vec![empty.clone(), empty],
        };

        // Act & Assert
        assert_eq!(
            verify_replay(&replayed, &updated, BulkMode::Update),
            Ok(AppliedBy::Second)
        );
    }

    #[test]
    fn test_replay_rejects_double_application() {
        // Arrange
        let a = response(BulkUploadStatus::MovementsCreated, &["A"]);
        let b = response(BulkUploadStatus::MovementsCreated, &["A"]);

        // Act
        let result = verify_replay(&a, &b, BulkMode::Create);

        // Assert
        assert!(matches!(
            result,
            Err(ReplayViolation::UnexpectedStatuses { .. })
        ));
    }

    #[test]
    fn test_replay_rejects_differing_movements() {
        // Arrange
        let created = response(BulkUploadStatus::MovementsCreated, &["A", "B"]);
        let fewer = response(BulkUploadStatus::MovementsNotCreated, &["A"]);
        let other = response(BulkUploadStatus::MovementsNotCreated, &["A", "C"]);

        // Act & Assert
        assert_eq!(
            verify_replay(&created, &fewer, BulkMode::Create),
            Err(ReplayViolation::MovementCountMismatch { first: 2, second: 1 })
        );
        assert!(matches!(
            verify_replay(&created, &other, BulkMode::Create),
            Err(ReplayViolation::TrackingIdMismatch { .. })
        ));
    }

    #[test]
    fn test_bulk_status_wire_names() {
        // Act
        let decoded: BulkUploadResponse = serde_json::from_value(json!({
            "status": "NO_MOVEMENTS_UPDATED",
            "movements": [{}, {}]
        }))
        .expect("decodes");

        // Assert
        assert_eq!(decoded.status, BulkUploadStatus::NoMovementsUpdated);
        assert!(decoded.tracking_ids().is_empty());
        assert_eq!(BulkMode::Create.success_status_code(), 201);
        assert_eq!(BulkMode::Update.success_status_code(), 200);
    }

    #[test]
    fn test_positional_item_outcomes() {
        // Arrange
        let body = json!([
            {},
            { "validation": { "errors": [
                { "key": "wasteItems.0.ewcCodes", "errorType": "InvalidValue", "message": "bad" }
            ] } }
        ]);

        // Act
        let items: Vec<BulkItemOutcome> = serde_json::from_value(body).expect("decodes");

        // Assert
        assert!(items[0].is_valid());
        assert!(!items[1].is_valid());
    }
}

#[cfg(test)]
mod auth_and_reference_tests {
    use super::*;

    #[test]
    fn test_internal_server_error_envelope_shape() {
        // Act
        let encoded = serde_json::to_value(GenericErrorEnvelope::internal_server_error())
            .expect("encodes");

        // Assert
        assert_eq!(
            encoded,
            json!({
                "statusCode": 500,
                "error": "Internal Server Error",
                "message": "An internal server error occurred"
            })
        );
    }

    #[test]
    fn test_oauth_bodies() {
        // Act
        let token: TokenResponse = serde_json::from_value(json!({
            "access_token": "abc",
            "expires_in": 3600,
            "token_type": "Bearer"
        }))
        .expect("decodes");
        let rejected: OAuthErrorBody =
            serde_json::from_value(json!({ "error": "invalid_client" })).expect("decodes");

        // Assert
        assert_eq!(token.expires_in, 3600);
        assert!(rejected.is_invalid_client());
    }

    #[test]
    fn test_reference_categories_and_extra_fields() {
        // Act
        let code: ReferenceCode = serde_json::from_value(json!({
            "code": "HP_6",
            "description": "Acute toxicity",
            "legacy": true
        }))
        .expect("decodes");

        // Assert
        assert_eq!(
            ReferenceDataCategory::ContainerTypes.to_string(),
            "container-types"
        );
        assert_eq!(ReferenceDataCategory::ALL.len(), 5);
        assert_eq!(code.extra.get("legacy"), Some(&json!(true)));
    }
}
