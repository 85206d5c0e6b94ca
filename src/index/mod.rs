// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The index adapter: a prebuilt elasticlunr index, loaded once and queried.
//!
//! The site build serializes the index; this module deserializes it and
//! answers `search(term, options)` with the same scores the JavaScript widget
//! would compute, so a result list rendered here and one rendered in the
//! browser agree.
//!
//! # Scoring
//!
//! Per field, per query token, per matching term `key`:
//!
//! ```text
//! score = tf(key, doc) × idf(key) × 1/√len(field, doc) × penalty(key, token)
//! idf   = 1 + ln(N / (df(key) + 1))
//! penalty = 1                                         (key == token)
//!         = (1 - (|key| - |token|) / |key|) × 0.15    (prefix expansion)
//! ```
//!
//! Token scores combine with AND (intersection) or OR (union), the field
//! total is scaled by how many query tokens the doc matched exactly, then by
//! the field boost, and fields are summed.

mod store;
mod trie;

pub use store::DocumentStore;
pub use trie::{FieldTrie, TrieNode};

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, SearchError};
use crate::text::{tokenize, Pipeline};
use crate::types::{BoolMode, DocRef, Document, SearchOptions, SearchResult};

/// Index format version this adapter was written against.
pub const INDEX_VERSION: &str = "0.9.5";

/// Score multiplier for terms reached by prefix expansion.
const EXPANSION_PENALTY: f64 = 0.15;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SerializedIndex {
    #[serde(default)]
    version: Option<String>,
    fields: Vec<String>,
    #[serde(rename = "ref")]
    ref_field: String,
    document_store: store::SerializedStore,
    index: serde_json::Map<String, Value>,
    #[serde(default)]
    pipeline: Vec<String>,
}

/// A loaded, immutable index.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    version: Option<String>,
    ref_field: String,
    fields: Vec<(String, FieldTrie)>,
    store: DocumentStore,
    pipeline: Pipeline,
}

/// Effective settings for one field after merging global and per-field options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldQuery<'a> {
    pub name: &'a str,
    pub boost: f64,
    pub bool: BoolMode,
    pub expand: bool,
}

impl SearchIndex {
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        SearchIndex::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let raw: SerializedIndex = serde_json::from_value(value)?;

        match raw.version.as_deref() {
            Some(INDEX_VERSION) => {}
            Some(other) => warn!(version = other, expected = INDEX_VERSION, "index version mismatch"),
            None => debug!("index has no version"),
        }

        let pipeline = Pipeline::from_names(&raw.pipeline)?;

        let mut fields = Vec::with_capacity(raw.fields.len());
        for name in raw.fields {
            let field_index = raw
                .index
                .get(&name)
                .ok_or_else(|| SearchError::MissingField(name.clone()))?;
            let trie = FieldTrie::from_value(field_index)?;
            fields.push((name, trie));
        }

        let index = SearchIndex {
            version: raw.version,
            ref_field: raw.ref_field,
            fields,
            store: raw.document_store.into(),
            pipeline,
        };
        debug!(
            docs = index.store.len(),
            fields = index.fields.len(),
            "loaded search index"
        );
        Ok(index)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn ref_field(&self) -> &str {
        &self.ref_field
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&FieldTrie> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, trie)| trie)
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn doc_count(&self) -> usize {
        self.store.len()
    }

    /// The stored document behind a result, if documents were saved.
    pub fn document(&self, doc_ref: &DocRef) -> Option<&Document> {
        self.store.get(doc_ref)
    }

    /// Query tokens exactly as the index will see them.
    pub fn query_tokens(&self, query: &str) -> Vec<String> {
        self.pipeline.run(tokenize(query))
    }

    /// Merge global and per-field options into one setting per searched field.
    ///
    /// Without a `fields` map every index field is searched at boost 1. With
    /// one, only the listed fields that exist in the index are searched, in
    /// the order listed.
    pub fn resolve_fields<'a>(&'a self, options: &'a SearchOptions) -> Vec<FieldQuery<'a>> {
        let global_bool = options.bool.unwrap_or_default();
        let global_expand = options.expand.unwrap_or(false);

        let Some(configured) = &options.fields else {
            return self
                .field_names()
                .map(|name| FieldQuery {
                    name,
                    boost: 1.0,
                    bool: global_bool,
                    expand: global_expand,
                })
                .collect();
        };

        configured
            .iter()
            .filter_map(|(name, field)| {
                if self.field(name).is_none() {
                    warn!(field = %name, "configured field is not in the index; ignoring");
                    return None;
                }
                Some(FieldQuery {
                    name: name.as_str(),
                    boost: field.boost.unwrap_or(1.0),
                    bool: field.bool.unwrap_or(global_bool),
                    expand: field.expand.unwrap_or(global_expand),
                })
            })
            .collect()
    }

    /// Run a query. Results are ordered by descending score; equal scores keep
    /// doc-ref order.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        if query.is_empty() {
            return Vec::new();
        }

        let tokens = self.query_tokens(query);
        let mut totals: BTreeMap<DocRef, f64> = BTreeMap::new();

        for field in self.resolve_fields(options) {
            if field.boost == 0.0 {
                continue;
            }
            let Some(trie) = self.field(field.name) else {
                continue;
            };
            for (doc_ref, score) in self.field_search(&tokens, trie, &field) {
                *totals.entry(doc_ref).or_insert(0.0) += score * field.boost;
            }
        }

        let mut results: Vec<SearchResult> = totals
            .into_iter()
            .map(|(doc_ref, score)| SearchResult { doc_ref, score })
            .collect();
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!(query, tokens = ?tokens, hits = results.len(), "search");
        results
    }

    fn idf(&self, trie: &FieldTrie, term: &str) -> f64 {
        let df = trie.doc_freq(term) as f64;
        1.0 + (self.store.len() as f64 / (df + 1.0)).ln()
    }

    fn field_search(
        &self,
        tokens: &[String],
        trie: &FieldTrie,
        field: &FieldQuery<'_>,
    ) -> BTreeMap<DocRef, f64> {
        let mut scores: Option<BTreeMap<DocRef, f64>> = None;
        // How many query tokens each doc matched exactly.
        let mut exact_hits: HashMap<DocRef, usize> = HashMap::new();

        for token in tokens {
            let keys = if field.expand {
                trie.expand_token(token)
            } else {
                vec![token.clone()]
            };

            let mut token_scores: BTreeMap<DocRef, f64> = BTreeMap::new();
            for key in &keys {
                let Some(postings) = trie.postings(key) else {
                    continue;
                };
                let idf = self.idf(trie, key);
                let penalty = expansion_penalty(key, token);

                for (doc_ref, &tf) in postings {
                    if field.bool == BoolMode::And {
                        if let Some(accumulated) = &scores {
                            if !accumulated.contains_key(doc_ref) {
                                continue;
                            }
                        }
                    }
                    if key == token {
                        *exact_hits.entry(doc_ref.clone()).or_insert(0) += 1;
                    }

                    let field_length = self.store.field_length(doc_ref, field.name);
                    let length_norm = if field_length == 0.0 {
                        1.0
                    } else {
                        1.0 / field_length.sqrt()
                    };

                    *token_scores.entry(doc_ref.clone()).or_insert(0.0) +=
                        tf * idf * length_norm * penalty;
                }
            }

            scores = Some(match scores {
                None => token_scores,
                Some(accumulated) => merge_scores(accumulated, token_scores, field.bool),
            });
        }

        let mut scores = scores.unwrap_or_default();
        let query_len = tokens.len() as f64;
        for (doc_ref, score) in &mut scores {
            if let Some(&hits) = exact_hits.get(doc_ref) {
                *score = *score * hits as f64 / query_len;
            }
        }
        scores
    }
}

fn expansion_penalty(key: &str, token: &str) -> f64 {
    if key == token {
        return 1.0;
    }
    let key_len = key.chars().count() as f64;
    let token_len = token.chars().count() as f64;
    (1.0 - (key_len - token_len) / key_len) * EXPANSION_PENALTY
}

fn merge_scores(
    mut accumulated: BTreeMap<DocRef, f64>,
    scores: BTreeMap<DocRef, f64>,
    mode: BoolMode,
) -> BTreeMap<DocRef, f64> {
    match mode {
        BoolMode::And => scores
            .into_iter()
            .filter_map(|(doc_ref, score)| {
                accumulated
                    .get(&doc_ref)
                    .map(|previous| (doc_ref, previous + score))
            })
            .collect(),
        BoolMode::Or => {
            for (doc_ref, score) in scores {
                *accumulated.entry(doc_ref).or_insert(0.0) += score;
            }
            accumulated
        }
    }
}
