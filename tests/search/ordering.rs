//! Result order and determinism.

use booksearch::SearchOptions;

use crate::common::{index, make_doc, positions, sample_book};

#[test]
fn equal_scores_keep_numeric_ref_order() {
    let docs: Vec<_> = (0..12)
        .map(|i| make_doc("Page", "identical text", &format!("p{i}.html")))
        .collect();
    let index = index(&docs);
    let results = index.search("identical", &SearchOptions::default());
    assert_eq!(positions(&results), (0..12).collect::<Vec<_>>());
}

#[test]
fn scores_never_increase_down_the_list() {
    let index = index(&sample_book());
    let results = index.search("search", &SearchOptions::default());
    assert_eq!(results.len(), 3);
    assert!(results.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn the_page_named_after_the_term_ranks_first() {
    let index = index(&sample_book());
    let results = index.search("search", &SearchOptions::default());
    let mut found = positions(&results);
    assert_eq!(found[0], 2);
    found.sort_unstable();
    assert_eq!(found, vec![0, 2, 3]);
}

#[test]
fn repeated_searches_agree() {
    let index = index(&sample_book());
    let options = SearchOptions::default();
    let first = index.search("quick search", &options);
    for _ in 0..5 {
        assert_eq!(index.search("quick search", &options), first);
    }
}
