// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-field inverted index stored as a character trie.
//!
//! Every node is a JSON object: `docs` maps doc refs to `{ "tf": f64 }`,
//! `df` counts them, and every other key is a one-character edge to a child.
//! A term's postings live on the node reached by walking its characters, and
//! prefix expansion is a walk over the subtree below that node.
//!
//! ```text
//! root ─ f ─ o ─ x  {docs: {"0": tf 1.0, "3": tf 1.41}, df: 2}
//!                └─ o ─ d {docs: {"1": tf 1.0}, df: 1}
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{Result, SearchError};
use crate::types::DocRef;

/// One trie node. Children are ordered so expansion is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrieNode {
    docs: BTreeMap<DocRef, f64>,
    df: usize,
    children: BTreeMap<char, TrieNode>,
}

impl TrieNode {
    fn from_object(object: &Map<String, Value>, path: &str) -> Result<Self> {
        let mut node = TrieNode::default();

        for (key, value) in object {
            match key.as_str() {
                "docs" => node.docs = parse_postings(value, path)?,
                "df" => {
                    node.df = value
                        .as_u64()
                        .or_else(|| value.as_f64().map(|df| df as u64))
                        .ok_or_else(|| invalid(path, "`df` is not a number"))?
                        as usize;
                }
                edge => {
                    let mut chars = edge.chars();
                    let (Some(c), None) = (chars.next(), chars.next()) else {
                        return Err(invalid(path, &format!("edge `{edge}` is not one character")));
                    };
                    let child_path = format!("{path}{c}");
                    let child = value
                        .as_object()
                        .ok_or_else(|| invalid(&child_path, "node is not an object"))?;
                    node.children
                        .insert(c, TrieNode::from_object(child, &child_path)?);
                }
            }
        }

        Ok(node)
    }

    pub fn df(&self) -> usize {
        self.df
    }

    pub fn docs(&self) -> &BTreeMap<DocRef, f64> {
        &self.docs
    }
}

fn invalid(path: &str, reason: &str) -> SearchError {
    SearchError::InvalidIndex(format!("trie node `{path}`: {reason}"))
}

fn parse_postings(value: &Value, path: &str) -> Result<BTreeMap<DocRef, f64>> {
    let object = value
        .as_object()
        .ok_or_else(|| invalid(path, "`docs` is not an object"))?;

    object
        .iter()
        .map(|(doc_ref, posting)| {
            let tf = posting
                .get("tf")
                .and_then(Value::as_f64)
                .ok_or_else(|| invalid(path, &format!("posting for `{doc_ref}` has no `tf`")))?;
            Ok((DocRef::new(doc_ref.as_str()), tf))
        })
        .collect()
}

/// The inverted index of a single field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldTrie {
    root: TrieNode,
}

impl FieldTrie {
    /// Parse `{ "root": { ... } }`.
    pub fn from_value(value: &Value) -> Result<Self> {
        let root = value
            .get("root")
            .and_then(Value::as_object)
            .ok_or_else(|| SearchError::InvalidIndex("field index has no `root` node".to_string()))?;
        Ok(FieldTrie {
            root: TrieNode::from_object(root, "")?,
        })
    }

    /// Walk the trie along `token`.
    pub fn node(&self, token: &str) -> Option<&TrieNode> {
        token
            .chars()
            .try_fold(&self.root, |node, c| node.children.get(&c))
    }

    /// Postings for an exact term.
    pub fn postings(&self, token: &str) -> Option<&BTreeMap<DocRef, f64>> {
        self.node(token).map(TrieNode::docs)
    }

    /// Number of documents containing the exact term.
    pub fn doc_freq(&self, token: &str) -> usize {
        self.node(token).map_or(0, TrieNode::df)
    }

    /// Stored term frequency of `token` in `doc_ref` (0 when absent).
    pub fn term_frequency(&self, token: &str, doc_ref: &DocRef) -> f64 {
        self.postings(token)
            .and_then(|docs| docs.get(doc_ref))
            .copied()
            .unwrap_or(0.0)
    }

    /// Every indexed term that starts with `token` (including `token` itself
    /// when it is a term). Empty tokens expand to nothing.
    pub fn expand_token(&self, token: &str) -> Vec<String> {
        let mut terms = Vec::new();
        if token.is_empty() {
            return terms;
        }
        if let Some(node) = self.node(token) {
            collect_terms(node, &mut token.to_string(), &mut terms);
        }
        terms
    }

    /// Number of distinct indexed terms.
    pub fn term_count(&self) -> usize {
        count_terms(&self.root)
    }
}

fn collect_terms(node: &TrieNode, prefix: &mut String, terms: &mut Vec<String>) {
    if node.df > 0 {
        terms.push(prefix.clone());
    }
    for (&c, child) in &node.children {
        prefix.push(c);
        collect_terms(child, prefix, terms);
        prefix.pop();
    }
}

fn count_terms(node: &TrieNode) -> usize {
    let own = usize::from(node.df > 0);
    own + node.children.values().map(count_terms).sum::<usize>()
}
