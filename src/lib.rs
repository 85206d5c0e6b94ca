// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Documentation-site search: a prebuilt elasticlunr index, excerpt ranking,
//! and the query controller that ties them to a page.
//!
//! The site build writes a search bundle (`searchindex.js`): options, the URL
//! of every document, and a serialized inverted index. This crate loads that
//! bundle, answers queries with the same scores the in-page widget computes,
//! cuts a teaser out of each hit and drives the search box, result panel and
//! address bar through small traits.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐     ┌─────────────┐     ┌────────────┐     ┌──────────────┐
//! │  load    │────▶│   index     │────▶│  teaser    │────▶│  controller  │
//! │ (bundle) │     │ (trie, idf, │     │ (weights,  │     │ (View,       │
//! │          │     │  AND / OR)  │     │  window)   │     │  History)    │
//! └──────────┘     └─────────────┘     └────────────┘     └──────────────┘
//!                         │                  │                    │
//!                         ▼                  ▼                    ▼
//!                  ┌────────────────────────────────┐     ┌──────────────┐
//!                  │ text (tokenize, trim, stop     │     │ url, format, │
//!                  │ words, stem, escape)           │     │ highlight    │
//!                  └────────────────────────────────┘     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use booksearch::testing::{bundle, sample_book};
//! use booksearch::{SearchSession, SessionOptions};
//!
//! let config = bundle(&sample_book(), serde_json::json!({}));
//! let mut session = SearchSession::new(config, SessionOptions::default());
//!
//! let page = session.query("fox").unwrap();
//! assert_eq!(page.header, "1 search result for 'fox':");
//! assert!(page.results[0].formatted.teaser.contains("<em>fox</em>"));
//! ```

pub mod controller;
pub mod error;
pub mod format;
pub mod highlight;
pub mod index;
pub mod load;
pub mod teaser;
pub mod testing;
pub mod text;
pub mod types;
pub mod url;

#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmSearcher;

pub use controller::{
    History, Key, KeyEvent, KeyTarget, Modifiers, SearchOutcome, SearchPage, SearchSession,
    SessionOptions, View,
};
pub use error::{Result, SearchError};
pub use format::{format_search_metric, format_search_result};
pub use index::SearchIndex;
pub use load::{load_config, parse_bundle};
pub use teaser::make_teaser;
pub use types::{
    BoolMode, DocRef, Document, FieldOptions, ResultsOptions, SearchConfig, SearchOptions,
    SearchResult,
};
pub use url::{parse_url, render_url, ParsedUrl};

#[cfg(feature = "async")]
pub use load::load_config_async;
