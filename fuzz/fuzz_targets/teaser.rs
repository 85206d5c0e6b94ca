// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for teaser construction.
//!
//! The teaser slices the body by byte offsets it computed itself. Any
//! disagreement between the word walk and the slicing shows up as a panic on
//! a char boundary, which multi-byte text finds quickly.

#![no_main]

use arbitrary::Arbitrary;
use booksearch::teaser::make_teaser;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct TeaserInput {
    body: String,
    terms: Vec<String>,
    window: u8,
}

fuzz_target!(|input: TeaserInput| {
    let teaser = make_teaser(&input.body, &input.terms, input.window as usize);

    // Emphasis is only ever added around text taken from the body. Bodies
    // are HTML-escaped before they get here, so markup-free ones are the
    // realistic case.
    let plain = teaser.replace("<em>", "").replace("</em>", "");
    if !input.body.contains('<') {
        assert!(
            input.body.contains(&plain),
            "teaser {:?} is not a slice of the body",
            plain
        );
    }
});
