// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for search query handling.
//!
//! Arbitrary text goes through the tokenizer, the stemmer and the trie walk.
//! The search must never panic and must keep its ordering guarantees.

#![no_main]

use std::sync::OnceLock;

use booksearch::testing::{build_index, sample_book};
use booksearch::{SearchIndex, SearchOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|query: &str| {
    static INDEX: OnceLock<SearchIndex> = OnceLock::new();
    let index = INDEX.get_or_init(|| {
        SearchIndex::from_value(build_index(&sample_book())).expect("sample index loads")
    });

    // Cap query length to avoid timeouts
    let query: String = query.chars().take(200).collect();

    let results = index.search(&query, &SearchOptions::default());

    assert!(results.len() <= index.doc_count());
    assert!(
        results.windows(2).all(|pair| pair[0].score >= pair[1].score),
        "results out of order for {:?}",
        query
    );
    for result in &results {
        assert!(index.document(&result.doc_ref).is_some());
        assert!(result.score.is_finite());
    }
});
