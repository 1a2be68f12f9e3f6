//! Fuzz target: `/process` body handling.
//!
//! Arbitrary bytes go through `parse_payload`; every accepted object must
//! produce a report whose key count matches the object.

#![no_main]

use beacon_core::{parse_payload, ProcessReport};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Errors are expected; panics are not.
    if let Ok(form_data) = parse_payload(data) {
        let expected = form_data.len();
        let report = ProcessReport::new(form_data, "fuzz");
        assert_eq!(report.data_count, expected);
        assert!(report.message.starts_with("Successfully processed data for "));
    }
});
