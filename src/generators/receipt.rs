//! Baseline receipt payloads accepted by the intake API.

use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

/// Non-hazardous EWC codes, distinct, all valid on their own.
pub const SAMPLE_EWC_CODES: [&str; 6] = ["200101", "200102", "200108", "200110", "200111", "200125"];

/// Most EWC codes a single waste item may carry.
pub const MAX_EWC_CODES_PER_ITEM: usize = 5;

pub fn unique_reference() -> String {
    format!("wmt-{}", Uuid::new_v4().simple())
}

/// Fresh idempotency id for a bulk request.
pub fn bulk_upload_id() -> String {
    Uuid::new_v4().to_string()
}

/// Receipt timestamp a few minutes in the past, in the format the API expects.
pub fn date_time_received() -> String {
    (Utc::now() - Duration::minutes(5)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn tonnes(amount: f64) -> Value {
    json!({ "metric": "Tonnes", "amount": amount, "isEstimate": false })
}

fn random_tonnes() -> f64 {
    f64::from(fastrand::u32(5..=200)) / 10.0
}

fn vehicle_registration() -> String {
    let letter = || char::from(fastrand::u8(b'A'..=b'Z'));
    format!(
        "{}{}{:02} {}{}{}",
        letter(),
        letter(),
        fastrand::u8(10..=99),
        letter(),
        letter(),
        letter()
    )
}

/// A non-hazardous, POP-free waste item.
pub fn valid_waste_item() -> Value {
    let amount = random_tonnes();
    json!({
        "ewcCodes": [SAMPLE_EWC_CODES[0]],
        "wasteDescription": "Mixed paper and cardboard packaging",
        "physicalForm": "Solid",
        "numberOfContainers": 2,
        "typeOfContainers": "SKI",
        "weight": tonnes(amount),
        "containsPops": false,
        "containsHazardous": false,
        "disposalOrRecoveryCodes": [
            { "code": "R3", "weight": tonnes(amount) }
        ]
    })
}

/// A waste item carrying `count` EWC codes drawn from [`SAMPLE_EWC_CODES`],
/// repeating codes once the sample runs out.
pub fn waste_item_with_ewc_codes(count: usize) -> Value {
    let codes: Vec<&str> = SAMPLE_EWC_CODES.iter().copied().cycle().take(count).collect();
    let mut item = valid_waste_item();
    item["ewcCodes"] = json!(codes);
    item
}

/// A waste item declared hazardous, with components and property codes.
pub fn hazardous_waste_item() -> Value {
    let amount = random_tonnes();
    json!({
        "ewcCodes": ["160601"],
        "wasteDescription": "Lead-acid batteries",
        "physicalForm": "Solid",
        "numberOfContainers": 4,
        "typeOfContainers": "PAL",
        "weight": tonnes(amount),
        "containsPops": false,
        "containsHazardous": true,
        "hazardous": {
            "hazCodes": ["HP_6", "HP_8"],
            "components": [
                { "name": "Lead", "concentration": 30 },
                { "name": "Sulphuric acid", "concentration": 15 }
            ]
        },
        "disposalOrRecoveryCodes": [
            { "code": "R4", "weight": tonnes(amount) }
        ]
    })
}

/// A waste item containing persistent organic pollutants.
pub fn pops_waste_item() -> Value {
    let amount = random_tonnes();
    json!({
        "ewcCodes": ["200135"],
        "wasteDescription": "Upholstered domestic seating",
        "physicalForm": "Mixed",
        "numberOfContainers": 1,
        "typeOfContainers": "CON",
        "weight": tonnes(amount),
        "containsPops": true,
        "pops": {
            "components": [
                { "name": "Decabromodiphenyl ether", "concentration": 250 }
            ]
        },
        "containsHazardous": false,
        "disposalOrRecoveryCodes": [
            { "code": "D10", "weight": tonnes(amount) }
        ]
    })
}

/// A complete receipt accepted by `POST /movements/receive`.
pub fn valid_receipt(api_code: &str) -> Value {
    json!({
        "apiCode": api_code,
        "dateTimeReceived": date_time_received(),
        "reasonForNoConsignmentCode": "NO_DOC_WITH_WASTE",
        "yourUniqueReference": unique_reference(),
        "otherReferencesForMovement": [
            { "label": "PO Number", "reference": format!("PO-{}", fastrand::u32(1000..=9999)) }
        ],
        "specialHandlingRequirements": "Keep dry",
        "wasteItems": [valid_waste_item()],
        "carrier": {
            "registrationNumber": "CBDU123456",
            "organisationName": "Test Waste Carriers Ltd",
            "address": {
                "fullAddress": "1 Carrier Way, Bristol",
                "postcode": "BS1 5AH"
            },
            "emailAddress": "carrier@example.com",
            "phoneNumber": "01171234567",
            "vehicleRegistration": vehicle_registration(),
            "meansOfTransport": "Road"
        },
        "receiver": {
            "siteName": "Test Receiving Site",
            "authorisationNumbers": ["EPR/AB1234CD"]
        },
        "receipt": {
            "address": {
                "fullAddress": "Unit 7, Receiving Site Road, Bristol",
                "postcode": "BS2 0XJ"
            }
        }
    })
}

/// `count` independent receipts for a bulk request.
pub fn bulk_movements(count: usize, api_code: &str) -> Vec<Value> {
    (0..count).map(|_| valid_receipt(api_code)).collect()
}
