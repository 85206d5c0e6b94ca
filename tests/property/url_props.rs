//! URL invariants: parse/render and search-term round trips.

use std::collections::BTreeMap;

use booksearch::url::{decode_query_value, parse_url, SEARCH_PARAM};
use booksearch::History;
use proptest::prelude::*;

use crate::common::{type_and_search, widget};

fn url_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z0-9]{1,6}", 0..4),
        prop::collection::btree_map("[a-z]{1,5}", "[a-z0-9]{0,5}", 0..4),
        "[a-z0-9]{0,6}",
    )
        .prop_map(|(segments, params, hash): (Vec<String>, BTreeMap<String, String>, String)| {
            let mut url = format!("https://x.test/{}", segments.join("/"));
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            if !query.is_empty() {
                url.push('?');
                url.push_str(&query.join("&"));
            }
            if !hash.is_empty() {
                url.push('#');
                url.push_str(&hash);
            }
            url
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Rendering a parsed URL gives back the same URL.
    #[test]
    fn prop_parse_render_round_trip(source in url_strategy()) {
        let url = parse_url(&source).unwrap();
        prop_assert_eq!(url.render(), source);
    }

    /// Whatever is typed comes back out of the address bar unchanged.
    #[test]
    fn prop_search_term_survives_the_url(term in "[a-zA-Z0-9 '&?#%+=/.()!~*]{1,20}") {
        prop_assume!(!term.trim().is_empty());
        let (mut session, mut view, mut history) = widget();

        type_and_search(&mut session, &mut view, &mut history, &term);

        let url = parse_url(&history.location()).unwrap();
        let stored = url.param(SEARCH_PARAM).unwrap();
        prop_assert_eq!(decode_query_value(stored), term.trim());
        prop_assert!(url.hash.is_empty());
    }
}
