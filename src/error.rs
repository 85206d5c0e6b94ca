// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Errors surfaced while loading bundles, parsing URLs and resolving results.
//!
//! Searching itself never fails: an empty query or an index that never loaded
//! simply produces no results. Everything that can go wrong happens at the
//! edges, which is where these variants come from.

use thiserror::Error;

/// Everything that can go wrong at the edges of the search widget.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Reading the bundle from disk failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The bundle or index is not valid JSON, or does not have the expected shape.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The bundle wrapper (`searchindex.js`) did not contain an object literal.
    #[error("invalid search bundle: {0}")]
    InvalidBundle(String),

    /// The serialized index is structurally broken.
    #[error("invalid index: {0}")]
    InvalidIndex(String),

    /// The index asks for a pipeline function we don't provide.
    #[error("unknown pipeline function `{0}`")]
    UnknownPipelineFunction(String),

    /// A field is listed in `fields` but has no inverted index.
    #[error("field `{0}` is declared but has no inverted index")]
    MissingField(String),

    /// A URL could not be parsed into its building blocks.
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A search result points at a document we cannot resolve.
    #[error("document ref `{0}` has no URL")]
    UnknownDocRef(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;
