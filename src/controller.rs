// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query controller: what happens on every keystroke, key press and
//! history navigation.
//!
//! A [`SearchSession`] owns the only mutable search state (the last searched
//! term, the teaser counter, the links currently on screen). The page itself
//! sits behind two traits: [`View`] for the search box and result panel, and
//! [`History`] for the address bar. Handlers take both by `&mut dyn`, so the
//! same state machine drives a browser DOM, a terminal or a test fake.
//!
//! # States
//!
//! ```text
//!              type (non-empty)              Escape
//!   ┌──────┐ ─────────────────▶ ┌────────┐ ─────────▶ ┌────────────┐
//!   │ idle │                    │ active │            │ suppressed │
//!   └──────┘ ◀───────────────── └────────┘ ◀───────── └────────────┘
//!              type (empty)                 hotkey / icon
//! ```
//!
//! `suppressed` keeps the last term cached: reopening the panel and typing
//! the same term does not search again.
//!
//! # URL
//!
//! The address bar is the source of truth for restorable state. `search` and
//! `highlight` are never both written: every controller write of one drops
//! the other. [`SearchSession::restore_from_url`] rebuilds the state from the
//! URL on load and on `popstate`.

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::{Result, SearchError};
use crate::format::{format_search_metric, FormattedResult};
use crate::index::SearchIndex;
use crate::types::{DocRef, ResultsOptions, SearchConfig, SearchOptions};
use crate::url::{
    decode_query_value, decode_uri_component, encode_uri_component, ParsedUrl, HIGHLIGHT_PARAM,
    SEARCH_PARAM,
};

// =============================================================================
// PAGE ABSTRACTIONS
// =============================================================================

/// The search box, result panel and page content.
pub trait View {
    /// Raw value of the search box.
    fn search_value(&self) -> String;
    fn set_search_value(&mut self, value: &str);
    /// Whether the search box has keyboard focus.
    fn has_focus(&self) -> bool;
    /// Focus the search box and select its text.
    fn select_search(&mut self);
    fn unfocus_search(&mut self);
    /// Toggle the "active" marker on the search box.
    fn set_active(&mut self, active: bool);
    fn is_search_shown(&self) -> bool;
    /// Show or hide the search wrapper (and update `aria-expanded`).
    fn set_search_shown(&mut self, shown: bool);
    fn show_results(&mut self, shown: bool);
    fn set_results_header(&mut self, text: &str);
    fn clear_results(&mut self);
    /// Append a list item with the given inner HTML.
    fn append_result(&mut self, html: &str);
    fn result_count(&self) -> usize;
    fn focused_result(&self) -> Option<usize>;
    /// Move the result focus marker; `None` removes it from every item.
    fn set_focused_result(&mut self, index: Option<usize>);
    fn scroll_to_top(&mut self);
    /// Highlight `words` in the page content.
    fn mark(&mut self, words: &[String]);
    fn unmark(&mut self);
}

/// The address bar and session history.
pub trait History {
    /// Current absolute URL.
    fn location(&self) -> String;
    fn push_state(&mut self, url: &str);
    fn replace_state(&mut self, url: &str);
    /// Full page navigation.
    fn assign(&mut self, url: &str);
}

// =============================================================================
// KEYS
// =============================================================================

/// Keys the controller reacts to, by DOM key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    /// `s`: open the search box.
    Hotkey,
    Down,
    Up,
    Enter,
    Other(u32),
}

impl Key {
    pub const ESCAPE_KEYCODE: u32 = 27;
    pub const SEARCH_HOTKEY_KEYCODE: u32 = 83;
    pub const DOWN_KEYCODE: u32 = 40;
    pub const UP_KEYCODE: u32 = 38;
    pub const SELECT_KEYCODE: u32 = 13;

    pub fn from_key_code(code: u32) -> Self {
        match code {
            Self::ESCAPE_KEYCODE => Key::Escape,
            Self::SEARCH_HOTKEY_KEYCODE => Key::Hotkey,
            Self::DOWN_KEYCODE => Key::Down,
            Self::UP_KEYCODE => Key::Up,
            Self::SELECT_KEYCODE => Key::Enter,
            other => Key::Other(other),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn any(self) -> bool {
        self.alt || self.ctrl || self.meta || self.shift
    }
}

/// What the key event was dispatched to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyTarget {
    /// Anything that is not a form control.
    #[default]
    Page,
    /// A text input or textarea. Never handled.
    TextField,
    /// Any other input, select or textarea (the search box included).
    /// Handled only while the search box has focus.
    FormControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    pub target: KeyTarget,
}

impl KeyEvent {
    /// An unmodified key press on the page.
    pub fn new(key: Key) -> Self {
        KeyEvent {
            key,
            modifiers: Modifiers::default(),
            target: KeyTarget::Page,
        }
    }

    pub fn with_target(mut self, target: KeyTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Page-level settings that are not part of the bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Prefix that turns a `doc_urls` entry into a link from the current page.
    pub path_to_root: String,
}

/// What a search request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Same term as last time; nothing ran.
    Unchanged,
    /// The index never loaded; nothing ran.
    Unavailable,
    /// The search box was emptied and the results cleared.
    Cleared,
    /// Results were rendered.
    Rendered { count: usize },
}

/// One rendered hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    pub doc_ref: DocRef,
    pub score: f64,
    #[serde(flatten)]
    pub formatted: FormattedResult,
}

/// A full result panel: header plus items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage {
    pub term: String,
    /// Hits reported in the header (total hits capped by `limit_results`).
    pub count: usize,
    pub header: String,
    pub results: Vec<PageResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlAction {
    Push,
    Replace,
    PushIfNewSearchElseReplace,
}

/// The search widget's state for one page.
#[derive(Debug)]
pub struct SearchSession {
    current_searchterm: String,
    index: Option<SearchIndex>,
    doc_urls: Vec<String>,
    search_options: SearchOptions,
    results_options: ResultsOptions,
    path_to_root: String,
    teaser_count: usize,
    result_links: Vec<String>,
    searches_run: usize,
}

impl SearchSession {
    /// Build a session from a loaded bundle. A broken index leaves the
    /// session inert instead of failing.
    pub fn new(config: SearchConfig, options: SessionOptions) -> Self {
        let index = match SearchIndex::from_value(config.index) {
            Ok(index) => Some(index),
            Err(e) => {
                error!(error = %e, "failed to load search index; search is disabled");
                None
            }
        };
        SearchSession {
            current_searchterm: String::new(),
            index,
            doc_urls: config.doc_urls,
            search_options: config.search_options,
            results_options: config.results_options,
            path_to_root: options.path_to_root,
            teaser_count: 0,
            result_links: Vec::new(),
            searches_run: 0,
        }
    }

    /// Build a session from the outcome of loading the bundle.
    pub fn from_load_result(result: Result<SearchConfig>, options: SessionOptions) -> Self {
        match result {
            Ok(config) => SearchSession::new(config, options),
            Err(e) => {
                error!(error = %e, "failed to load search bundle; search is disabled");
                SearchSession::inert(options)
            }
        }
    }

    fn inert(options: SessionOptions) -> Self {
        SearchSession {
            current_searchterm: String::new(),
            index: None,
            doc_urls: Vec::new(),
            search_options: SearchOptions::default(),
            results_options: ResultsOptions::default(),
            path_to_root: options.path_to_root,
            teaser_count: 0,
            result_links: Vec::new(),
            searches_run: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.index.is_some()
    }

    pub fn index(&self) -> Option<&SearchIndex> {
        self.index.as_ref()
    }

    pub fn current_searchterm(&self) -> &str {
        &self.current_searchterm
    }

    pub fn doc_urls(&self) -> &[String] {
        &self.doc_urls
    }

    pub fn search_options(&self) -> &SearchOptions {
        &self.search_options
    }

    pub fn results_options(&self) -> &ResultsOptions {
        &self.results_options
    }

    /// How many searches actually hit the index.
    pub fn searches_run(&self) -> usize {
        self.searches_run
    }

    /// Links of the results currently rendered, in order.
    pub fn result_links(&self) -> &[String] {
        &self.result_links
    }

    /// Run `term` against the index and format the result panel, without
    /// touching the view or the memoized term. `None` when the index never
    /// loaded.
    pub fn query(&mut self, term: &str) -> Option<SearchPage> {
        let index = self.index.as_ref()?;
        let hits = index.search(term, &self.search_options);
        self.searches_run += 1;

        let count = hits.len().min(self.results_options.limit_results);
        let searchterms: Vec<String> = term.split(' ').map(str::to_string).collect();

        let mut results = Vec::with_capacity(count);
        for hit in hits.into_iter().take(count) {
            let doc_url = match doc_url(&self.doc_urls, &hit.doc_ref) {
                Ok(url) => url,
                Err(e) => {
                    warn!(error = %e, "skipping result");
                    continue;
                }
            };
            let Some(doc) = index.document(&hit.doc_ref) else {
                warn!(doc_ref = %hit.doc_ref, "skipping result without a stored document");
                continue;
            };
            self.teaser_count += 1;
            let formatted = FormattedResult::new(
                doc,
                doc_url,
                &searchterms,
                &self.path_to_root,
                self.teaser_count,
                self.results_options.teaser_word_count,
            );
            results.push(PageResult {
                doc_ref: hit.doc_ref,
                score: hit.score,
                formatted,
            });
        }

        debug!(term, count, rendered = results.len(), "search page");
        Some(SearchPage {
            term: term.to_string(),
            count,
            header: format_search_metric(count, term),
            results,
        })
    }

    /// Search for an already trimmed `term` and render the results, unless it
    /// is the term searched last.
    pub fn do_search(&mut self, term: &str, view: &mut dyn View) -> SearchOutcome {
        if self.current_searchterm == term {
            return SearchOutcome::Unchanged;
        }
        self.current_searchterm = term.to_string();

        let Some(page) = self.query(term) else {
            debug!(term, "search index unavailable");
            return SearchOutcome::Unavailable;
        };

        view.set_results_header(&page.header);
        view.clear_results();
        self.result_links.clear();
        for result in &page.results {
            view.append_result(&result.formatted.to_html());
            self.result_links.push(result.formatted.href.clone());
        }
        view.show_results(true);

        SearchOutcome::Rendered {
            count: page.results.len(),
        }
    }

    fn clear(&mut self, view: &mut dyn View) {
        view.show_results(false);
        view.clear_results();
        self.result_links.clear();
        self.current_searchterm.clear();
    }

    fn show_search(&self, view: &mut dyn View, shown: bool) {
        view.set_search_shown(shown);
        if !shown {
            view.set_focused_result(None);
        }
    }

    /// Write `term` into the URL (or remove the search state when it is empty).
    fn set_search_url_parameters(&self, history: &mut dyn History, term: &str, action: UrlAction) {
        let mut url = match ParsedUrl::parse(&history.location()) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "cannot update search URL");
                return;
            }
        };
        let first_search = !url.has_param(SEARCH_PARAM);

        url.remove_param(HIGHLIGHT_PARAM);
        if term.is_empty() {
            url.remove_param(SEARCH_PARAM);
        } else {
            url.set_param(SEARCH_PARAM, encode_uri_component(term));
            url.hash.clear();
        }

        let rendered = url.render();
        let push = match action {
            UrlAction::Push => true,
            UrlAction::Replace => false,
            UrlAction::PushIfNewSearchElseReplace => first_search,
        };
        if push {
            history.push_state(&rendered);
        } else {
            history.replace_state(&rendered);
        }
    }

    // -------------------------------------------------------------------------
    // Event handlers
    // -------------------------------------------------------------------------

    /// The search box changed (keyup).
    pub fn on_search_input(&mut self, view: &mut dyn View, history: &mut dyn History) -> SearchOutcome {
        let value = view.search_value();
        let term = value.trim();

        let outcome = if term.is_empty() {
            view.set_active(false);
            self.clear(view);
            self.set_search_url_parameters(history, "", UrlAction::Replace);
            SearchOutcome::Cleared
        } else {
            view.set_active(true);
            let outcome = self.do_search(term, view);
            self.set_search_url_parameters(history, term, UrlAction::PushIfNewSearchElseReplace);
            outcome
        };

        view.unmark();
        outcome
    }

    /// A key went down anywhere on the page. Returns whether the default
    /// action should be prevented.
    pub fn on_key(&mut self, event: KeyEvent, view: &mut dyn View, history: &mut dyn History) -> bool {
        let focus = view.has_focus();
        if event.modifiers.any()
            || event.target == KeyTarget::TextField
            || (!focus && event.target == KeyTarget::FormControl)
        {
            return false;
        }

        match event.key {
            Key::Escape => {
                view.set_active(false);
                let action = if view.search_value().trim().is_empty() {
                    UrlAction::Replace
                } else {
                    UrlAction::Push
                };
                self.set_search_url_parameters(history, "", action);
                if focus {
                    view.unfocus_search();
                }
                self.show_search(view, false);
                view.unmark();
                true
            }
            Key::Hotkey if !focus => {
                self.show_search(view, true);
                view.scroll_to_top();
                view.select_search();
                true
            }
            Key::Down if focus => {
                view.unfocus_search();
                if view.result_count() > 0 {
                    view.set_focused_result(Some(0));
                }
                true
            }
            Key::Down | Key::Up | Key::Enter if !focus => {
                let Some(focused) = view.focused_result() else {
                    return false;
                };
                match event.key {
                    Key::Down => {
                        if focused + 1 < view.result_count() {
                            view.set_focused_result(Some(focused + 1));
                        }
                    }
                    Key::Up => {
                        if focused == 0 {
                            view.set_focused_result(None);
                            view.select_search();
                        } else {
                            view.set_focused_result(Some(focused - 1));
                        }
                    }
                    _ => match self.result_links.get(focused) {
                        Some(link) => history.assign(link),
                        None => warn!(focused, "focused result has no link"),
                    },
                }
                true
            }
            _ => false,
        }
    }

    /// The search toggle icon was clicked.
    pub fn on_search_icon_click(&mut self, view: &mut dyn View) {
        if view.is_search_shown() {
            self.show_search(view, false);
        } else {
            self.show_search(view, true);
            view.scroll_to_top();
            view.select_search();
        }
    }

    /// Browser back/forward.
    pub fn on_popstate(&mut self, view: &mut dyn View, history: &mut dyn History) {
        self.restore_from_url(view, history);
    }

    /// Form submission. Always prevented so Enter never reloads the page.
    pub fn on_submit(&self) -> bool {
        true
    }

    /// Rebuild the search state from the current URL: reopen the search for
    /// `?search=`, mark the words of `?highlight=`.
    pub fn restore_from_url(&mut self, view: &mut dyn View, history: &mut dyn History) {
        let url = match ParsedUrl::parse(&history.location()) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "cannot restore search state");
                self.show_search(view, false);
                return;
            }
        };

        match url.param(SEARCH_PARAM) {
            Some(term) if !term.is_empty() => {
                self.show_search(view, true);
                view.set_search_value(&decode_query_value(term));
                self.on_search_input(view, history);
            }
            _ => self.show_search(view, false),
        }

        if let Some(words) = url.param(HIGHLIGHT_PARAM) {
            let words: Vec<String> = decode_uri_component(words)
                .split(' ')
                .map(str::to_string)
                .collect();
            view.mark(&words);
        }
    }
}

/// `doc_urls[ref]`; refs are array positions.
fn doc_url<'a>(doc_urls: &'a [String], doc_ref: &DocRef) -> Result<&'a str> {
    doc_ref
        .as_index()
        .and_then(|i| doc_urls.get(i))
        .map(String::as_str)
        .ok_or_else(|| SearchError::UnknownDocRef(doc_ref.to_string()))
}
