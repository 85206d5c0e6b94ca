// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for URL handling.
//!
//! The address bar is user-controlled. Parsing must fail cleanly, and a
//! parsed URL must survive a render/parse cycle with its parameters intact.

#![no_main]

use booksearch::url::{decode_query_value, decode_uri_component, encode_uri_component, parse_url};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Decoding is lossy, never fallible.
    let _ = decode_query_value(data);
    assert_eq!(decode_uri_component(&encode_uri_component(data)), data);

    let Ok(url) = parse_url(data) else {
        return;
    };
    let rendered = url.render();
    if let Ok(reparsed) = parse_url(&rendered) {
        assert_eq!(reparsed.render(), rendered, "render is not stable for {:?}", data);
    }
});
