//! Test data generators.
//!
//! Each generator returns a payload the service accepts as-is. Tests then
//! break exactly one rule with [`PayloadExt`].

pub mod payload;
pub mod receipt;

pub use payload::PayloadExt;
pub use receipt::{
    bulk_movements, bulk_upload_id, date_time_received, hazardous_waste_item, pops_waste_item,
    unique_reference, valid_receipt, valid_waste_item, waste_item_with_ewc_codes,
    MAX_EWC_CODES_PER_ITEM, SAMPLE_EWC_CODES,
};
