// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! `<mark>` highlighting of page content for `?highlight=` links.
//!
//! Matching is case-insensitive and by substring, inside text only: tags and
//! character references are never touched.

use std::sync::LazyLock;

use regex::Regex;

const MARK_OPEN: &str = "<mark>";
const MARK_CLOSE: &str = "</mark>";

/// Markup that must be copied through untouched.
static OPAQUE: LazyLock<Regex> = LazyLock::new(|| compile(r"<[^>]*>|&#?\w+;"));

static MARK_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"</?mark\b[^>]*>"));

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => unreachable!("static pattern `{pattern}` failed to compile: {e}"),
    }
}

/// Wrap every occurrence of any of `words` in `<mark>`. Empty words are ignored.
///
/// ```
/// use booksearch::highlight::mark;
///
/// let html = mark("<p class=\"fox\">The Fox</p>", &["fox".to_string()]);
/// assert_eq!(html, "<p class=\"fox\">The <mark>Fox</mark></p>");
/// ```
pub fn mark(html: &str, words: &[String]) -> String {
    let alternatives: Vec<String> = words
        .iter()
        .filter(|w| !w.is_empty())
        .map(|w| regex::escape(w))
        .collect();
    if alternatives.is_empty() {
        return html.to_string();
    }
    let Ok(pattern) = Regex::new(&format!("(?i){}", alternatives.join("|"))) else {
        return html.to_string();
    };

    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;
    for opaque in OPAQUE.find_iter(html) {
        mark_text(&pattern, &html[cursor..opaque.start()], &mut out);
        out.push_str(opaque.as_str());
        cursor = opaque.end();
    }
    mark_text(&pattern, &html[cursor..], &mut out);
    out
}

fn mark_text(pattern: &Regex, text: &str, out: &mut String) {
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        out.push_str(&text[cursor..found.start()]);
        out.push_str(MARK_OPEN);
        out.push_str(found.as_str());
        out.push_str(MARK_CLOSE);
        cursor = found.end();
    }
    out.push_str(&text[cursor..]);
}

/// Remove every `<mark>` wrapper, keeping its contents.
pub fn unmark(html: &str) -> String {
    MARK_TAG.replace_all(html, "").into_owned()
}
