//! Result headers and result markup.

use booksearch::format::{format_search_metric, result_href};
use booksearch::{SearchSession, SessionOptions};
use serde_json::json;

use crate::common::{bundle, sample_book, terms};

#[test]
fn header_wording_follows_the_count() {
    assert_eq!(format_search_metric(0, "xyz"), "No search results for 'xyz'.");
    assert_eq!(format_search_metric(1, "xyz"), "1 search result for 'xyz':");
    assert_eq!(format_search_metric(5, "xyz"), "5 search results for 'xyz':");
}

#[test]
fn header_shows_the_term_as_typed() {
    assert_eq!(
        format_search_metric(2, "Quick  Fox"),
        "2 search results for 'Quick  Fox':"
    );
}

#[test]
fn links_carry_every_typed_word() {
    let href = result_href("../../", "search.html#searching", &terms(&["quick", "", "fox"]));
    assert_eq!(href, "../../search.html?highlight=quick%20%20fox#searching");
}

#[test]
fn links_are_prefixed_with_the_path_to_root() {
    let mut session = SearchSession::new(
        bundle(&sample_book(), json!({})),
        SessionOptions {
            path_to_root: "../".to_string(),
        },
    );
    let page = session.query("fox").unwrap();
    assert_eq!(
        page.results[0].formatted.href,
        "../search.html?highlight=fox#searching"
    );
    assert!(page.results[0]
        .formatted
        .to_html()
        .starts_with("<a href=\"../search.html?highlight=fox#searching\" aria-details=\"teaser_1\">Searching</a>"));
}

#[test]
fn teaser_ids_keep_counting_across_searches() {
    let mut session = SearchSession::new(bundle(&sample_book(), json!({})), SessionOptions::default());
    let first: Vec<usize> = session
        .query("search")
        .unwrap()
        .results
        .iter()
        .map(|r| r.formatted.teaser_id)
        .collect();
    let second: Vec<usize> = session
        .query("fox")
        .unwrap()
        .results
        .iter()
        .map(|r| r.formatted.teaser_id)
        .collect();
    assert_eq!(first, vec![1, 2, 3]);
    assert_eq!(second, vec![4]);
}

#[test]
fn header_count_is_capped_by_the_result_limit() {
    let mut session = SearchSession::new(
        bundle(&sample_book(), json!({ "results_options": { "limit_results": 2 } })),
        SessionOptions::default(),
    );
    let page = session.query("search").unwrap();
    assert_eq!(page.count, 2);
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.header, "2 search results for 'search':");
}
