//! Restoring the search from the address bar.

use booksearch::{History, Key, KeyEvent, KeyTarget};

use crate::common::{
    page_with_query, sample_book, session, terms, type_and_search, widget, FakeHistory, FakeView,
    PAGE_URL,
};

#[test]
fn a_search_in_the_url_reopens_the_panel() {
    let mut session = session(&sample_book());
    let mut view = FakeView::new();
    let mut history = FakeHistory::new(&page_with_query("search=quick+fox"));

    session.restore_from_url(&mut view, &mut history);

    assert!(view.search_shown);
    assert_eq!(view.input, "quick fox");
    assert_eq!(view.header, "1 search result for 'quick fox':");
    assert_eq!(history.location(), page_with_query("search=quick%20fox"));
    assert_eq!(history.pushes, 0);
    assert_eq!(history.replaces, 1);
}

#[test]
fn percent_encoded_searches_are_decoded() {
    let mut session = session(&sample_book());
    let mut view = FakeView::new();
    let mut history = FakeHistory::new(&page_with_query("search=lazy%20dog"));

    session.restore_from_url(&mut view, &mut history);

    assert_eq!(view.input, "lazy dog");
    assert_eq!(session.current_searchterm(), "lazy dog");
}

#[test]
fn an_empty_search_parameter_keeps_the_panel_closed() {
    let (mut session, mut view, _) = widget();
    view.search_shown = true;
    let mut history = FakeHistory::new(&page_with_query("search="));

    session.restore_from_url(&mut view, &mut history);

    assert!(!view.search_shown);
    assert_eq!(session.searches_run(), 0);
}

#[test]
fn highlight_marks_the_page() {
    let (mut session, _, _) = widget();
    let mut view = FakeView::with_content("<p>The quick brown fox</p>");
    let mut history = FakeHistory::new(&page_with_query("highlight=quick%20fox"));

    session.restore_from_url(&mut view, &mut history);

    assert!(!view.search_shown);
    assert_eq!(view.marked, terms(&["quick", "fox"]));
    assert_eq!(
        view.content,
        "<p>The <mark>quick</mark> brown <mark>fox</mark></p>"
    );
}

#[test]
fn highlight_plus_is_not_a_space() {
    let (mut session, _, _) = widget();
    let mut view = FakeView::with_content("<p>a+b and a b</p>");
    let mut history = FakeHistory::new(&page_with_query("highlight=a+b"));

    session.restore_from_url(&mut view, &mut history);

    assert_eq!(view.marked, terms(&["a+b"]));
    assert_eq!(view.content, "<p><mark>a+b</mark> and a b</p>");
}

#[test]
fn back_restores_the_previous_search() {
    let (mut session, mut view, mut history) = widget();
    type_and_search(&mut session, &mut view, &mut history, "fox");
    let escape = KeyEvent::new(Key::Escape).with_target(KeyTarget::FormControl);
    session.on_key(escape, &mut view, &mut history);
    session.on_key(KeyEvent::new(Key::Hotkey), &mut view, &mut history);
    type_and_search(&mut session, &mut view, &mut history, "dog");
    assert_eq!(history.entries().len(), 4);

    assert!(history.back());
    assert!(history.back());
    assert_eq!(history.location(), page_with_query("search=fox"));
    session.on_popstate(&mut view, &mut history);

    assert!(view.search_shown);
    assert_eq!(view.input, "fox");
    assert_eq!(view.header, "1 search result for 'fox':");
    assert_eq!(session.searches_run(), 3);
}

#[test]
fn back_to_the_plain_page_closes_the_panel() {
    let (mut session, mut view, mut history) = widget();
    view.search_shown = true;
    type_and_search(&mut session, &mut view, &mut history, "fox");

    assert!(history.back());
    assert_eq!(history.location(), PAGE_URL);
    session.on_popstate(&mut view, &mut history);

    assert!(!view.search_shown);
}

#[test]
fn returning_to_the_cached_search_does_not_search_again() {
    let (mut session, mut view, mut history) = widget();
    type_and_search(&mut session, &mut view, &mut history, "fox");
    let escape = KeyEvent::new(Key::Escape).with_target(KeyTarget::FormControl);
    session.on_key(escape, &mut view, &mut history);

    assert!(history.back());
    session.on_popstate(&mut view, &mut history);

    assert!(view.search_shown);
    assert_eq!(session.searches_run(), 1);
    assert_eq!(view.results.len(), 1);
}

#[test]
fn an_unparseable_location_is_tolerated() {
    let (mut session, mut view, _) = widget();
    view.search_shown = true;
    let mut history = FakeHistory::new("not a url");

    session.restore_from_url(&mut view, &mut history);
    assert!(!view.search_shown);

    type_and_search(&mut session, &mut view, &mut history, "fox");
    assert_eq!(view.results.len(), 1);
    assert_eq!(history.pushes + history.replaces, 0);
}
