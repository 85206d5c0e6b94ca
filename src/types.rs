// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The shapes that travel between the site build and the search widget.
//!
//! The site generator writes a bundle (`searchindex.js` or `searchindex.json`)
//! with four keys: `results_options`, `search_options`, `doc_urls` and the
//! serialized `index`. Everything here mirrors that contract.
//!
//! # Defaults
//!
//! | Setting                              | Default | Source                       |
//! |--------------------------------------|---------|------------------------------|
//! | `results_options.teaser_word_count`  | 30      | widget default               |
//! | `results_options.limit_results`      | 30      | widget default               |
//! | `search_options.bool`                | AND     | widget default (bundle absent) |
//! | `search_options.expand`              | true    | widget default (bundle absent) |
//! | `search_options.fields`              | title:1, body:1, breadcrumbs:0 | widget default |
//!
//! When a bundle *does* carry `search_options`, keys it leaves out fall back to
//! the index defaults instead (`OR`, no expansion, every field at boost 1).

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// DOCUMENT REFERENCES
// =============================================================================

/// Reference to a stored document, as written by the index builder.
///
/// Refs are strings on the wire but almost always numeric (`"0"`, `"17"`).
/// Ordering puts numeric refs first in numeric order, then everything else
/// lexically. This is the order a JavaScript object enumerates its keys, and
/// tied scores come out of the search in that order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocRef(pub String);

impl DocRef {
    pub fn new(value: impl Into<String>) -> Self {
        DocRef(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The ref as an array index, when it is a canonical non-negative integer.
    pub fn as_index(&self) -> Option<usize> {
        let s = self.0.as_str();
        if s.is_empty() || (s.len() > 1 && s.starts_with('0')) {
            return None;
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse().ok()
    }
}

impl Ord for DocRef {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_index(), other.as_index()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for DocRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DocRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocRef {
    fn from(value: &str) -> Self {
        DocRef(value.to_string())
    }
}

impl From<usize> for DocRef {
    fn from(value: usize) -> Self {
        DocRef(value.to_string())
    }
}

// =============================================================================
// DOCUMENTS AND RESULTS
// =============================================================================

/// A stored document. Only `body` feeds the teaser; `breadcrumbs` is the link text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub title: String,
    pub body: String,
    pub breadcrumbs: String,
}

/// One hit from the index adapter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub doc_ref: DocRef,
    pub score: f64,
}

// =============================================================================
// OPTIONS
// =============================================================================

/// How per-term matches combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BoolMode {
    /// Every query term must match.
    #[serde(rename = "AND")]
    And,
    /// Any query term may match.
    #[default]
    #[serde(rename = "OR")]
    Or,
}

impl<'de> Deserialize<'de> for BoolMode {
    /// Only the exact string `"AND"` selects conjunction; anything else is `OR`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref() {
            Some("AND") => BoolMode::And,
            _ => BoolMode::Or,
        })
    }
}

impl fmt::Display for BoolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolMode::And => f.write_str("AND"),
            BoolMode::Or => f.write_str("OR"),
        }
    }
}

/// Per-field search settings. Unset values inherit from [`SearchOptions`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FieldOptions {
    #[serde(default)]
    pub boost: Option<f64>,
    #[serde(default)]
    pub bool: Option<BoolMode>,
    #[serde(default)]
    pub expand: Option<bool>,
}

impl FieldOptions {
    pub fn boost(boost: f64) -> Self {
        FieldOptions {
            boost: Some(boost),
            ..FieldOptions::default()
        }
    }
}

/// Query-time options handed to [`crate::SearchIndex::search`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub bool: Option<BoolMode>,
    #[serde(default)]
    pub expand: Option<bool>,
    /// Field name → settings, in declaration order.
    #[serde(default, deserialize_with = "ordered_fields")]
    pub fields: Option<Vec<(String, FieldOptions)>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            bool: Some(BoolMode::And),
            expand: Some(true),
            fields: Some(vec![
                ("title".to_string(), FieldOptions::boost(1.0)),
                ("body".to_string(), FieldOptions::boost(1.0)),
                ("breadcrumbs".to_string(), FieldOptions::boost(0.0)),
            ]),
        }
    }
}

fn ordered_fields<'de, D>(deserializer: D) -> Result<Option<Vec<(String, FieldOptions)>>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)?;
    map.map(|map| {
        map.into_iter()
            .map(|(name, value)| {
                serde_json::from_value(value)
                    .map(|options| (name, options))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    })
    .transpose()
}

/// How many results to show and how long each teaser is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResultsOptions {
    pub teaser_word_count: usize,
    pub limit_results: usize,
}

impl Default for ResultsOptions {
    fn default() -> Self {
        ResultsOptions {
            teaser_word_count: 30,
            limit_results: 30,
        }
    }
}

// =============================================================================
// BUNDLE
// =============================================================================

/// The complete bundle written by the site build.
///
/// `index` stays as raw JSON until [`crate::SearchIndex::from_value`] turns it
/// into a searchable structure, so a broken index doesn't take the rest of the
/// configuration down with it.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub results_options: ResultsOptions,
    #[serde(default)]
    pub search_options: SearchOptions,
    #[serde(default)]
    pub doc_urls: Vec<String>,
    pub index: serde_json::Value,
}
