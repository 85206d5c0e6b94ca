// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for bundle and index loading.
//!
//! A corrupt `searchindex.js` must produce an error (and an inert session),
//! never a panic: not in the wrapper stripping, not in the index walk.

#![no_main]

use booksearch::load::parse_bundle;
use booksearch::{SearchSession, SessionOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let mut session = SearchSession::from_load_result(parse_bundle(data), SessionOptions::default());
    if session.is_ready() {
        let _ = session.query("search");
    } else {
        assert!(session.query("search").is_none());
    }

    // Raw index JSON goes straight to the index loader.
    if let Ok(value) = serde_json::from_str(data) {
        let _ = booksearch::SearchIndex::from_value(value);
    }
});
