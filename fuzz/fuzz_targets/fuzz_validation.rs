//! Fuzz target for request validation.
//!
//! Feeds arbitrary bytes to the product payload validator and the
//! pagination parser. Neither may panic on any input.
//!
//! ```bash
//! cargo +nightly install cargo-fuzz
//! cargo +nightly fuzz run fuzz_validation -- -max_total_time=60
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use product_api::models::ListProductsQuery;
use product_api::validation::{parse_pagination, validate_product};

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = validate_product(&value);
    }

    if let Ok(s) = std::str::from_utf8(data) {
        let (page, limit) = s.split_once('&').unwrap_or((s, ""));
        let query = ListProductsQuery {
            page: Some(page.to_string()),
            limit: Some(limit.to_string()),
            ..Default::default()
        };
        if let Ok(pagination) = parse_pagination(&query, 100) {
            let _ = pagination.offset();
        }
    }
});
