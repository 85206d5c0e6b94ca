// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! WebAssembly bindings for the search widget.
//!
//! `WasmSearcher` is built from the bundle text (the contents of
//! `searchindex.js` or `searchindex.json`) and hands the page ready-made
//! HTML: a header line and one fragment per result, the same markup the
//! widget inserts into its result list.

use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

use crate::controller::{SearchSession, SessionOptions};
use crate::format::format_search_metric;
use crate::load::parse_bundle;
use crate::teaser::make_teaser;
use crate::text::escape_html;

/// Result panel for JavaScript consumption.
#[derive(Serialize)]
struct SearchOutput {
    header: String,
    /// Inner HTML of each `<li>`.
    results: Vec<String>,
}

#[wasm_bindgen]
pub struct WasmSearcher {
    session: SearchSession,
}

#[wasm_bindgen]
impl WasmSearcher {
    /// Parse a bundle. Fails only if the bundle itself is unreadable; a
    /// broken index yields a searcher whose searches return `null`.
    #[wasm_bindgen(constructor)]
    pub fn new(bundle: &str, path_to_root: Option<String>) -> Result<WasmSearcher, JsValue> {
        let config = parse_bundle(bundle).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let options = SessionOptions {
            path_to_root: path_to_root.unwrap_or_default(),
        };
        Ok(WasmSearcher {
            session: SearchSession::new(config, options),
        })
    }

    /// Whether the index loaded.
    #[wasm_bindgen(getter)]
    pub fn ready(&self) -> bool {
        self.session.is_ready()
    }

    #[wasm_bindgen(getter)]
    pub fn doc_count(&self) -> usize {
        self.session.index().map_or(0, |index| index.doc_count())
    }

    /// Search for `query` (trimmed). Returns `{header, results}` or `null`
    /// when there is nothing to search.
    pub fn search(&mut self, query: &str) -> Result<JsValue, JsValue> {
        let term = query.trim();
        if term.is_empty() {
            return Ok(JsValue::NULL);
        }
        let Some(page) = self.session.query(term) else {
            return Ok(JsValue::NULL);
        };
        let output = SearchOutput {
            header: page.header,
            results: page
                .results
                .iter()
                .map(|result| result.formatted.to_html())
                .collect(),
        };
        to_value(&output).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Result fragments only, as a JS array of strings.
    pub fn search_html(&mut self, query: &str) -> js_sys::Array {
        let term = query.trim();
        let page = if term.is_empty() {
            None
        } else {
            self.session.query(term)
        };
        page.into_iter()
            .flat_map(|page| page.results)
            .map(|result| JsValue::from_str(&result.formatted.to_html()))
            .collect()
    }

    /// Teaser for a raw (unescaped) body; `terms` are space separated.
    pub fn teaser(&self, body: &str, terms: &str) -> String {
        let terms: Vec<String> = terms.split(' ').map(str::to_string).collect();
        make_teaser(
            &escape_html(body),
            &terms,
            self.session.results_options().teaser_word_count,
        )
    }

    /// Header line for `count` results.
    pub fn format_metric(count: usize, term: &str) -> String {
        format_search_metric(count, term)
    }
}
