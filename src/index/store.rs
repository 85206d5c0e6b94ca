// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Stored documents and per-field token counts.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::types::{DocRef, Document};

/// Wire shape of `documentStore`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SerializedStore {
    #[serde(default)]
    docs: BTreeMap<String, Option<Document>>,
    #[serde(default)]
    doc_info: HashMap<String, HashMap<String, f64>>,
    #[serde(default)]
    length: Option<usize>,
    #[serde(default)]
    save: Option<bool>,
}

/// Documents known to the index, with the token count of each field.
///
/// When the index was built with `save: false` the refs are known but the
/// documents themselves are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentStore {
    docs: BTreeMap<DocRef, Option<Document>>,
    doc_info: HashMap<DocRef, HashMap<String, f64>>,
    length: usize,
    save: bool,
}

impl From<SerializedStore> for DocumentStore {
    fn from(raw: SerializedStore) -> Self {
        let docs: BTreeMap<DocRef, Option<Document>> = raw
            .docs
            .into_iter()
            .map(|(doc_ref, doc)| (DocRef::new(doc_ref), doc))
            .collect();
        let length = raw.length.unwrap_or(docs.len());
        DocumentStore {
            docs,
            doc_info: raw
                .doc_info
                .into_iter()
                .map(|(doc_ref, info)| (DocRef::new(doc_ref), info))
                .collect(),
            length,
            save: raw.save.unwrap_or(true),
        }
    }
}

impl DocumentStore {
    /// Document count used for idf.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether document bodies were saved alongside the index.
    pub fn is_saved(&self) -> bool {
        self.save
    }

    pub fn get(&self, doc_ref: &DocRef) -> Option<&Document> {
        self.docs.get(doc_ref).and_then(Option::as_ref)
    }

    pub fn contains(&self, doc_ref: &DocRef) -> bool {
        self.docs.contains_key(doc_ref)
    }

    /// Token count of `field` in `doc_ref`; 0 for unknown refs or fields.
    pub fn field_length(&self, doc_ref: &DocRef, field: &str) -> f64 {
        if !self.contains(doc_ref) {
            return 0.0;
        }
        self.doc_info
            .get(doc_ref)
            .and_then(|info| info.get(field))
            .copied()
            .unwrap_or(0.0)
    }
}
