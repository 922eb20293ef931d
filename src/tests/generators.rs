// Unit Tests for Payload Generators
//
// UNIT UNDER TEST: PayloadExt and receipt generators
//
// BUSINESS RESPONSIBILITY:
//   - Produces valid baseline receipts
//   - Lets a test change one field by path
//
// TEST COVERAGE:
//   - Setting, removing and reading nested and indexed fields
//   - Generated receipts carry required fields and unique references
//   - EWC code counts beyond the per-item limit

use crate::generators::{
    bulk_movements, valid_receipt, waste_item_with_ewc_codes, PayloadExt,
    MAX_EWC_CODES_PER_ITEM, SAMPLE_EWC_CODES,
};
use serde_json::json;

#[cfg(test)]
mod payload_ext_tests {
    use super::*;

    #[test]
    fn test_with_field_creates_intermediate_objects() {
        // Act
        let payload = json!({}).with_field("carrier.address.postcode", json!("BS1 5AH"));

        // Assert
        assert_eq!(
            payload,
            json!({ "carrier": { "address": { "postcode": "BS1 5AH" } } })
        );
    }

    #[test]
    fn test_with_field_replaces_and_appends_array_items() {
        // Arrange
        let payload = json!({ "wasteItems": [{ "weight": { "amount": 1 } }] });

        // Act
        let payload = payload
            .with_field("wasteItems[0].weight.amount", json!(-1))
            .with_field("wasteItems.1", json!({ "ewcCodes": [] }))
            .with_field("wasteItems.5", json!("ignored"));

        // Assert
        assert_eq!(payload.field("wasteItems.0.weight.amount"), Some(&json!(-1)));
        assert_eq!(payload["wasteItems"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_without_field_removes_only_the_target() {
        // Arrange
        let payload = json!({ "receiver": { "siteName": "x", "authorisationNumbers": ["a"] } });

        // Act
        let payload = payload
            .without_field("receiver.siteName")
            .without_field("does.not.exist");

        // Assert
        assert_eq!(payload, json!({ "receiver": { "authorisationNumbers": ["a"] } }));
    }
}

#[cfg(test)]
mod receipt_generator_tests {
    use super::*;

    #[test]
    fn test_valid_receipt_carries_required_fields() {
        // Act
        let receipt = valid_receipt("api-code-1");

        // Assert
        assert_eq!(receipt.field("apiCode"), Some(&json!("api-code-1")));
        for path in [
            "dateTimeReceived",
            "yourUniqueReference",
            "wasteItems.0.ewcCodes",
            "wasteItems.0.weight.amount",
            "carrier.registrationNumber",
            "receiver.authorisationNumbers",
            "receipt.address.postcode",
        ] {
            assert!(receipt.field(path).is_some(), "missing {path}");
        }
        let received = receipt["dateTimeReceived"].as_str().unwrap_or_default();
        assert!(chrono::DateTime::parse_from_rfc3339(received).is_ok());
    }

    #[test]
    fn test_bulk_movements_have_unique_references() {
        // Act
        let movements = bulk_movements(3, "api-code-1");
        let references: std::collections::BTreeSet<_> = movements
            .iter()
            .filter_map(|m| m["yourUniqueReference"].as_str())
            .collect();

        // Assert
        assert_eq!(references.len(), 3);
    }

    #[test]
    fn test_ewc_code_count_can_exceed_the_limit() {
        // Act
        let item = waste_item_with_ewc_codes(MAX_EWC_CODES_PER_ITEM + 1);
        let codes = item["ewcCodes"].as_array().cloned().unwrap_or_default();

        // Assert
        assert_eq!(codes.len(), 6);
        assert_eq!(codes[5], json!(SAMPLE_EWC_CODES[5]));
    }
}
