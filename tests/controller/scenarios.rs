//! Typing into the search box.

use booksearch::testing::FakeHistory;
use booksearch::{History, Key, KeyEvent, KeyTarget, SearchOutcome, SearchSession, SessionOptions};
use serde_json::json;

use crate::common::{
    bundle, page_with_query, sample_book, terms, type_and_search, widget, FakeView, PAGE_URL,
};

#[test]
fn typing_renders_results_and_records_the_search() {
    let (mut session, mut view, mut history) = widget();

    let outcome = type_and_search(&mut session, &mut view, &mut history, "fox");

    assert_eq!(outcome, SearchOutcome::Rendered { count: 1 });
    assert!(view.active);
    assert!(view.results_shown);
    assert_eq!(view.header, "1 search result for 'fox':");
    assert_eq!(view.results.len(), 1);
    assert!(view.results[0].contains("href=\"search.html?highlight=fox#searching\""));
    assert!(view.results[0].contains("<em>fox</em>"));
    assert_eq!(session.result_links(), ["search.html?highlight=fox#searching"]);
    assert_eq!(session.current_searchterm(), "fox");
    assert_eq!(history.location(), page_with_query("search=fox"));
    assert_eq!(history.pushes, 1);
}

#[test]
fn the_same_term_does_not_search_twice() {
    let (mut session, mut view, mut history) = widget();

    type_and_search(&mut session, &mut view, &mut history, "fox");
    let again = type_and_search(&mut session, &mut view, &mut history, "  fox ");

    assert_eq!(again, SearchOutcome::Unchanged);
    assert_eq!(session.searches_run(), 1);
    assert_eq!(view.results.len(), 1);
    assert_eq!(history.pushes, 1);
    assert_eq!(history.replaces, 1);
    assert_eq!(history.location(), page_with_query("search=fox"));
}

#[test]
fn refining_a_search_replaces_the_history_entry() {
    let (mut session, mut view, mut history) = widget();

    type_and_search(&mut session, &mut view, &mut history, "fox");
    type_and_search(&mut session, &mut view, &mut history, "quick fox");

    assert_eq!(history.entries().len(), 2);
    assert_eq!(history.location(), page_with_query("search=quick%20fox"));
    assert_eq!(view.header, "1 search result for 'quick fox':");
    assert!(view.results[0].contains("highlight=quick%20fox"));
}

#[test]
fn clearing_the_box_hides_results_and_replaces_the_url() {
    let (mut session, mut view, mut history) = widget();

    type_and_search(&mut session, &mut view, &mut history, "abc");
    assert_eq!(history.pushes, 1);

    let outcome = type_and_search(&mut session, &mut view, &mut history, "");

    assert_eq!(outcome, SearchOutcome::Cleared);
    assert!(!view.results_shown);
    assert!(view.results.is_empty());
    assert!(!view.active);
    assert!(session.result_links().is_empty());
    assert_eq!(history.location(), PAGE_URL);
    assert_eq!(history.pushes, 1);
    assert_eq!(history.replaces, 1);
}

#[test]
fn a_cleared_term_can_be_searched_again() {
    let (mut session, mut view, mut history) = widget();

    type_and_search(&mut session, &mut view, &mut history, "fox");
    type_and_search(&mut session, &mut view, &mut history, "   ");
    assert_eq!(session.current_searchterm(), "");

    let outcome = type_and_search(&mut session, &mut view, &mut history, "fox");
    assert_eq!(outcome, SearchOutcome::Rendered { count: 1 });
    assert_eq!(session.searches_run(), 2);
}

#[test]
fn escape_pushes_a_url_without_the_search() {
    let (mut session, mut view, mut history) = widget();
    type_and_search(&mut session, &mut view, &mut history, "hello");
    view.content = "<p><mark>hello</mark> world</p>".to_string();
    view.marked = terms(&["hello"]);

    let escape = KeyEvent::new(Key::Escape).with_target(KeyTarget::FormControl);
    assert!(session.on_key(escape, &mut view, &mut history));

    assert_eq!(history.location(), PAGE_URL);
    assert_eq!(history.pushes, 2);
    assert_eq!(history.replaces, 0);
    assert!(!view.active);
    assert!(!view.input_focused);
    assert!(!view.search_shown);
    assert_eq!(view.content, "<p>hello world</p>");
    assert!(view.marked.is_empty());
}

#[test]
fn escape_keeps_the_last_term_cached() {
    let (mut session, mut view, mut history) = widget();
    type_and_search(&mut session, &mut view, &mut history, "fox");

    let escape = KeyEvent::new(Key::Escape).with_target(KeyTarget::FormControl);
    session.on_key(escape, &mut view, &mut history);
    assert_eq!(session.current_searchterm(), "fox");

    assert!(session.on_key(KeyEvent::new(Key::Hotkey), &mut view, &mut history));
    let outcome = type_and_search(&mut session, &mut view, &mut history, "fox");

    assert_eq!(outcome, SearchOutcome::Unchanged);
    assert_eq!(session.searches_run(), 1);
    assert!(view.search_shown);
}

#[test]
fn typing_drops_page_highlights_and_fragments() {
    let mut session = crate::common::session(&sample_book());
    let mut view = FakeView::with_content("<p><mark>fox</mark></p>");
    let mut history = FakeHistory::new(&format!("{PAGE_URL}?highlight=fox#intro"));

    type_and_search(&mut session, &mut view, &mut history, "dog");

    assert_eq!(view.content, "<p>fox</p>");
    assert_eq!(history.location(), page_with_query("search=dog"));
}

#[test]
fn unrelated_query_parameters_survive() {
    let (mut session, mut view, _) = widget();
    let mut history = FakeHistory::new(&page_with_query("lang=en"));

    type_and_search(&mut session, &mut view, &mut history, "fox");
    assert_eq!(history.location(), page_with_query("lang=en&search=fox"));

    type_and_search(&mut session, &mut view, &mut history, "");
    assert_eq!(history.location(), page_with_query("lang=en"));
}

#[test]
fn no_results_still_render_a_header() {
    let (mut session, mut view, mut history) = widget();

    let outcome = type_and_search(&mut session, &mut view, &mut history, "zzzz");

    assert_eq!(outcome, SearchOutcome::Rendered { count: 0 });
    assert_eq!(view.header, "No search results for 'zzzz'.");
    assert!(view.results.is_empty());
    assert!(view.results_shown);
}

#[test]
fn results_without_a_url_are_skipped() {
    let config = bundle(&sample_book(), json!({ "doc_urls": ["index.html"] }));
    let mut session = SearchSession::new(config, SessionOptions::default());
    let mut view = FakeView::new();
    let mut history = FakeHistory::new(PAGE_URL);

    let outcome = type_and_search(&mut session, &mut view, &mut history, "search");

    assert_eq!(outcome, SearchOutcome::Rendered { count: 1 });
    assert_eq!(view.header, "3 search results for 'search':");
    assert_eq!(session.result_links(), ["index.html?highlight=search#"]);
}

#[test]
fn a_session_without_an_index_stays_quiet() {
    let config = bundle(&sample_book(), json!({ "index": { "broken": true } }));
    let mut session = SearchSession::new(config, SessionOptions::default());
    let mut view = FakeView::new();
    let mut history = FakeHistory::new(PAGE_URL);

    let outcome = type_and_search(&mut session, &mut view, &mut history, "fox");

    assert_eq!(outcome, SearchOutcome::Unavailable);
    assert!(!view.results_shown);
    assert!(view.header.is_empty());
    assert_eq!(session.searches_run(), 0);
}

#[test]
fn icon_click_toggles_the_search() {
    let (mut session, mut view, _) = widget();

    session.on_search_icon_click(&mut view);
    assert!(view.search_shown);
    assert!(view.input_focused);
    assert_eq!(view.scrolls, 1);
    assert_eq!(view.selections, 1);

    view.focused = Some(0);
    session.on_search_icon_click(&mut view);
    assert!(!view.search_shown);
    assert_eq!(view.focused, None);
    assert_eq!(view.scrolls, 1);
}
