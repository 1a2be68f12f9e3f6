//! Fuzz target: greeting construction from arbitrary `name` strings.
//!
//! Names may contain any Unicode; the greeting must embed them verbatim.

#![no_main]

use beacon_core::ProcessReport;
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

fuzz_target!(|name: &str| {
    let mut form_data = Map::new();
    form_data.insert("name".to_owned(), Value::String(name.to_owned()));
    let report = ProcessReport::new(form_data, name);
    assert!(report.message.ends_with(name));
    assert_eq!(report.timestamp, name);
});
