// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests and benches.
//!
//! This module is always compiled but hidden from documentation. It provides
//! an in-memory page ([`FakeView`]), an in-memory address bar
//! ([`FakeHistory`]) and a small index builder that writes the same JSON the
//! site generator does, so tests can search real bundles without fixtures on
//! disk.

#![doc(hidden)]

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::controller::{History, SearchSession, SessionOptions, View};
use crate::highlight;
use crate::index::INDEX_VERSION;
use crate::text::{tokenize, Pipeline};
use crate::types::{Document, SearchConfig};

// =============================================================================
// INDEX FIXTURES
// =============================================================================

/// Fields every fixture index is built with.
pub const FIXTURE_FIELDS: [&str; 3] = ["title", "body", "breadcrumbs"];

/// A document plus the URL it lives at.
#[derive(Debug, Clone)]
pub struct FixtureDoc {
    pub doc: Document,
    pub url: String,
}

/// Create a fixture document. `breadcrumbs` defaults to the title.
pub fn make_doc(title: &str, body: &str, url: &str) -> FixtureDoc {
    FixtureDoc {
        doc: Document {
            title: title.to_string(),
            body: body.to_string(),
            breadcrumbs: title.to_string(),
        },
        url: url.to_string(),
    }
}

#[derive(Default)]
struct TrieBuilder {
    docs: BTreeMap<usize, f64>,
    children: BTreeMap<char, TrieBuilder>,
}

impl TrieBuilder {
    fn insert(&mut self, token: &str, doc: usize, tf: f64) {
        let mut node = self;
        for c in token.chars() {
            node = node.children.entry(c).or_default();
        }
        node.docs.insert(doc, tf);
    }

    fn to_json(&self) -> Value {
        let mut object = Map::new();
        let docs: Map<String, Value> = self
            .docs
            .iter()
            .map(|(doc, tf)| (doc.to_string(), json!({ "tf": tf })))
            .collect();
        object.insert("docs".to_string(), Value::Object(docs));
        object.insert("df".to_string(), json!(self.docs.len()));
        for (c, child) in &self.children {
            object.insert(c.to_string(), child.to_json());
        }
        Value::Object(object)
    }
}

fn field_text<'a>(doc: &'a Document, field: &str) -> &'a str {
    match field {
        "title" => &doc.title,
        "body" => &doc.body,
        _ => &doc.breadcrumbs,
    }
}

/// Serialize an index over `docs` (refs are positions) the way the site
/// generator does: English pipeline, `tf = √count`, field lengths in tokens.
pub fn build_index(docs: &[FixtureDoc]) -> Value {
    let pipeline = Pipeline::english();
    let mut tries: Vec<TrieBuilder> = FIXTURE_FIELDS.iter().map(|_| TrieBuilder::default()).collect();
    let mut stored = Map::new();
    let mut doc_info = Map::new();

    for (id, fixture) in docs.iter().enumerate() {
        let mut lengths = Map::new();
        for (field, trie) in FIXTURE_FIELDS.iter().zip(tries.iter_mut()) {
            let tokens = pipeline.run(tokenize(field_text(&fixture.doc, field)));
            lengths.insert(field.to_string(), json!(tokens.len()));

            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for token in &tokens {
                *counts.entry(token.as_str()).or_insert(0) += 1;
            }
            for (token, count) in counts {
                trie.insert(token, id, (count as f64).sqrt());
            }
        }
        doc_info.insert(id.to_string(), Value::Object(lengths));
        stored.insert(
            id.to_string(),
            json!({
                "id": id.to_string(),
                "title": fixture.doc.title,
                "body": fixture.doc.body,
                "breadcrumbs": fixture.doc.breadcrumbs,
            }),
        );
    }

    let index: Map<String, Value> = FIXTURE_FIELDS
        .iter()
        .zip(&tries)
        .map(|(field, trie)| (field.to_string(), json!({ "root": trie.to_json() })))
        .collect();

    json!({
        "version": INDEX_VERSION,
        "fields": FIXTURE_FIELDS,
        "ref": "id",
        "documentStore": {
            "docs": stored,
            "docInfo": doc_info,
            "length": docs.len(),
            "save": true,
        },
        "index": index,
        "pipeline": pipeline.stages().iter().map(|stage| stage.name()).collect::<Vec<_>>(),
    })
}

/// A complete bundle over `docs`. `extra` is merged in at the top level
/// (e.g. `results_options` or `search_options`).
pub fn bundle_json(docs: &[FixtureDoc], extra: Value) -> Value {
    let mut bundle = json!({
        "doc_urls": docs.iter().map(|d| d.url.clone()).collect::<Vec<_>>(),
        "index": build_index(docs),
    });
    if let (Some(target), Value::Object(extra)) = (bundle.as_object_mut(), extra) {
        target.extend(extra);
    }
    bundle
}

/// Parse [`bundle_json`] into a config.
pub fn bundle(docs: &[FixtureDoc], extra: Value) -> SearchConfig {
    match serde_json::from_value(bundle_json(docs, extra)) {
        Ok(config) => config,
        Err(e) => panic!("fixture bundle does not deserialize: {e}"),
    }
}

/// A ready session over `docs` with default options.
pub fn session(docs: &[FixtureDoc]) -> SearchSession {
    SearchSession::new(bundle(docs, json!({})), SessionOptions::default())
}

/// A small book used across tests.
pub fn sample_book() -> Vec<FixtureDoc> {
    vec![
        make_doc(
            "Introduction",
            "Welcome to the guide. This book explains how searching works.",
            "index.html",
        ),
        make_doc(
            "Installing",
            "Install the tool with cargo. Installing from source needs a recent compiler.",
            "install.html#installing",
        ),
        make_doc(
            "Searching",
            "The quick fox. The fox jumps over the lazy dog. Search results show a teaser.",
            "search.html#searching",
        ),
        make_doc(
            "Configuration",
            "Options live in book.toml. The search section tunes teaser length and result limits.",
            "config.html",
        ),
    ]
}

// =============================================================================
// FAKE PAGE
// =============================================================================

/// In-memory stand-in for the search widget's DOM.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FakeView {
    pub input: String,
    pub input_focused: bool,
    /// How many times the search box text was selected.
    pub selections: usize,
    pub active: bool,
    pub search_shown: bool,
    pub results_shown: bool,
    pub header: String,
    pub results: Vec<String>,
    pub focused: Option<usize>,
    pub scrolls: usize,
    /// Page content, with `<mark>`s applied.
    pub content: String,
    pub marked: Vec<String>,
}

impl FakeView {
    pub fn new() -> Self {
        FakeView::default()
    }

    pub fn with_content(content: &str) -> Self {
        FakeView {
            content: content.to_string(),
            ..FakeView::default()
        }
    }

    /// Replace the search box text, as typing would.
    pub fn type_text(&mut self, text: &str) {
        self.input = text.to_string();
        self.input_focused = true;
    }
}

impl View for FakeView {
    fn search_value(&self) -> String {
        self.input.clone()
    }

    fn set_search_value(&mut self, value: &str) {
        self.input = value.to_string();
    }

    fn has_focus(&self) -> bool {
        self.input_focused
    }

    fn select_search(&mut self) {
        self.input_focused = true;
        self.selections += 1;
    }

    fn unfocus_search(&mut self) {
        self.input_focused = false;
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_search_shown(&self) -> bool {
        self.search_shown
    }

    fn set_search_shown(&mut self, shown: bool) {
        self.search_shown = shown;
    }

    fn show_results(&mut self, shown: bool) {
        self.results_shown = shown;
    }

    fn set_results_header(&mut self, text: &str) {
        self.header = text.to_string();
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.focused = None;
    }

    fn append_result(&mut self, html: &str) {
        self.results.push(html.to_string());
    }

    fn result_count(&self) -> usize {
        self.results.len()
    }

    fn focused_result(&self) -> Option<usize> {
        self.focused
    }

    fn set_focused_result(&mut self, index: Option<usize>) {
        self.focused = index;
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }

    fn mark(&mut self, words: &[String]) {
        self.content = highlight::mark(&self.content, words);
        self.marked = words.to_vec();
    }

    fn unmark(&mut self) {
        self.content = highlight::unmark(&self.content);
        self.marked.clear();
    }
}

// =============================================================================
// FAKE HISTORY
// =============================================================================

/// In-memory session history with a cursor, like the browser's.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeHistory {
    entries: Vec<String>,
    position: usize,
    pub pushes: usize,
    pub replaces: usize,
    /// URLs passed to [`History::assign`].
    pub navigations: Vec<String>,
}

impl FakeHistory {
    pub fn new(url: &str) -> Self {
        FakeHistory {
            entries: vec![url.to_string()],
            position: 0,
            pushes: 0,
            replaces: 0,
            navigations: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Step back; `false` at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Step forward; `false` at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.position + 1 >= self.entries.len() {
            return false;
        }
        self.position += 1;
        true
    }
}

impl History for FakeHistory {
    fn location(&self) -> String {
        self.entries[self.position].clone()
    }

    fn push_state(&mut self, url: &str) {
        self.entries.truncate(self.position + 1);
        self.entries.push(url.to_string());
        self.position += 1;
        self.pushes += 1;
    }

    fn replace_state(&mut self, url: &str) {
        self.entries[self.position] = url.to_string();
        self.replaces += 1;
    }

    fn assign(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }
}
