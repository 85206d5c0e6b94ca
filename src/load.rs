// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Loading the search bundle written by the site build.
//!
//! Two encodings are accepted: plain JSON (`searchindex.json`) and the script
//! form (`searchindex.js`) that assigns the same object to `window.search`:
//!
//! ```text
//! Object.assign(window.search, {"doc_urls": [...], "index": {...}, ...});
//! window.search = {"doc_urls": [...], "index": {...}, ...};
//! ```
//!
//! The script wrapper is stripped down to its outermost object literal.

use std::path::Path;

use tracing::debug;

use crate::error::{Result, SearchError};
use crate::types::SearchConfig;

/// Parse bundle text in either encoding.
pub fn parse_bundle(text: &str) -> Result<SearchConfig> {
    let json = bundle_object(text)?;
    let config: SearchConfig = serde_json::from_str(json)?;
    debug!(
        doc_urls = config.doc_urls.len(),
        teaser_word_count = config.results_options.teaser_word_count,
        limit_results = config.results_options.limit_results,
        "parsed search bundle"
    );
    Ok(config)
}

/// The JSON object inside a bundle.
fn bundle_object(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&trimmed[start..=end]),
        _ => Err(SearchError::InvalidBundle(
            "no object literal found in script bundle".to_string(),
        )),
    }
}

fn io_error(path: &Path, source: std::io::Error) -> SearchError {
    SearchError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Read and parse a bundle from disk.
pub fn load_config(path: impl AsRef<Path>) -> Result<SearchConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_bundle(&text)
}

/// Awaitable [`load_config`]. Resolves once, to the configuration or the
/// reason it could not be loaded.
#[cfg(feature = "async")]
pub async fn load_config_async(path: impl AsRef<Path>) -> Result<SearchConfig> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| io_error(path, e))?;
    parse_bundle(&text)
}
