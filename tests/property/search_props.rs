//! Ranking invariants over random corpora.

use std::collections::HashSet;

use booksearch::SearchOptions;
use proptest::prelude::*;

use crate::common::{index, make_doc, FixtureDoc};

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{2,8}").unwrap()
}

fn corpus_strategy() -> impl Strategy<Value = Vec<FixtureDoc>> {
    prop::collection::vec(
        (
            prop::collection::vec(word_strategy(), 0..3),
            prop::collection::vec(word_strategy(), 1..12),
        ),
        1..8,
    )
    .prop_map(|docs| {
        docs.into_iter()
            .enumerate()
            .map(|(i, (title, body))| make_doc(&title.join(" "), &body.join(" "), &format!("{i}.html")))
            .collect()
    })
}

fn options_strategy() -> impl Strategy<Value = SearchOptions> {
    (prop::bool::ANY, prop::bool::ANY).prop_map(|(and, expand)| {
        serde_json::from_value(serde_json::json!({
            "bool": if and { "AND" } else { "OR" },
            "expand": expand,
        }))
        .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Results are sorted, unique, and point at real documents.
    #[test]
    fn prop_results_are_well_formed(
        docs in corpus_strategy(),
        query in prop::collection::vec(word_strategy(), 1..3),
        options in options_strategy(),
    ) {
        let index = index(&docs);
        let results = index.search(&query.join(" "), &options);

        prop_assert!(results.windows(2).all(|pair| pair[0].score >= pair[1].score));
        let refs: HashSet<_> = results.iter().map(|r| r.doc_ref.clone()).collect();
        prop_assert_eq!(refs.len(), results.len());
        for result in &results {
            let position = result.doc_ref.as_index().unwrap();
            prop_assert!(position < docs.len());
            prop_assert!(result.score > 0.0);
        }
    }

    /// A word taken from a document always finds that document (OR, no expansion).
    #[test]
    fn prop_indexed_words_are_found(
        docs in corpus_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let doc = pick.index(docs.len());
        let body = &docs[doc].doc.body;
        let word = body.split(' ').next().unwrap().to_string();
        let index = index(&docs);
        prop_assume!(!index.query_tokens(&word).is_empty());

        let options: SearchOptions = serde_json::from_value(serde_json::json!({ "expand": false })).unwrap();
        let results = index.search(&word, &options);
        prop_assert!(results.iter().any(|r| r.doc_ref.as_index() == Some(doc)));
    }

    /// The same query on the same index always gives the same answer.
    #[test]
    fn prop_search_is_deterministic(
        docs in corpus_strategy(),
        query in word_strategy(),
        options in options_strategy(),
    ) {
        let index = index(&docs);
        prop_assert_eq!(index.search(&query, &options), index.search(&query, &options));
    }
}
