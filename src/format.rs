// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! HTML fragments for the results panel.

use serde::Serialize;

use crate::teaser::make_teaser;
use crate::text::escape_html;
use crate::types::Document;
use crate::url::{encode_uri_component, HIGHLIGHT_PARAM};

/// Header line above the result list.
///
/// ```
/// use booksearch::format::format_search_metric;
///
/// assert_eq!(format_search_metric(0, "xyz"), "No search results for 'xyz'.");
/// assert_eq!(format_search_metric(1, "xyz"), "1 search result for 'xyz':");
/// ```
pub fn format_search_metric(count: usize, searchterm: &str) -> String {
    match count {
        0 => format!("No search results for '{searchterm}'."),
        1 => format!("1 search result for '{searchterm}':"),
        n => format!("{n} search results for '{searchterm}':"),
    }
}

/// Link target for a result: the page, `?highlight=` with the query terms,
/// then the original anchor.
pub fn result_href(path_to_root: &str, doc_url: &str, searchterms: &[String]) -> String {
    let mut parts = doc_url.split('#');
    let page = parts.next().unwrap_or_default();
    let anchor = parts.next().unwrap_or_default();
    let encoded = encode_uri_component(&searchterms.join(" "));
    format!("{path_to_root}{page}?{HIGHLIGHT_PARAM}={encoded}#{anchor}")
}

/// One entry of the result list, before it is turned into HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedResult {
    pub href: String,
    /// Link text, inserted as is (the index stores it pre-rendered).
    pub breadcrumbs: String,
    /// Escaped excerpt with `<em>` around matches.
    pub teaser: String,
    /// Sequence number tying the link to its teaser for screen readers.
    pub teaser_id: usize,
}

impl FormattedResult {
    pub fn new(
        doc: &Document,
        doc_url: &str,
        searchterms: &[String],
        path_to_root: &str,
        teaser_id: usize,
        teaser_word_count: usize,
    ) -> Self {
        FormattedResult {
            href: result_href(path_to_root, doc_url, searchterms),
            breadcrumbs: doc.breadcrumbs.clone(),
            teaser: make_teaser(&escape_html(&doc.body), searchterms, teaser_word_count),
            teaser_id,
        }
    }

    pub fn to_html(&self) -> String {
        format!(
            "<a href=\"{href}\" aria-details=\"teaser_{id}\">{crumbs}</a>\
             <span class=\"teaser\" id=\"teaser_{id}\" aria-label=\"Search Result Teaser\">{teaser}</span>",
            href = self.href,
            id = self.teaser_id,
            crumbs = self.breadcrumbs,
            teaser = self.teaser,
        )
    }
}

/// Inner HTML of one result list item.
pub fn format_search_result(
    doc: &Document,
    doc_url: &str,
    searchterms: &[String],
    path_to_root: &str,
    teaser_id: usize,
    teaser_word_count: usize,
) -> String {
    FormattedResult::new(doc, doc_url, searchterms, path_to_root, teaser_id, teaser_word_count)
        .to_html()
}
