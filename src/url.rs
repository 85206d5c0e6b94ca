// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page URLs as the search widget sees them.
//!
//! The widget keeps its restorable state in the address bar: `?search=` holds
//! the query being typed and `?highlight=` the words to mark on a result page.
//! [`ParsedUrl`] splits a URL into the pieces the controller edits and
//! [`ParsedUrl::render`] glues them back together.
//!
//! Query values are kept exactly as they appear in the URL (still
//! percent-encoded). Encoding and decoding happen at the edges through
//! [`encode_uri_component`], [`decode_uri_component`] and
//! [`decode_query_value`].

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::error::{Result, SearchError};

/// Query parameter carrying the live search term.
pub const SEARCH_PARAM: &str = "search";

/// Query parameter carrying words to highlight on the target page.
pub const HIGHLIGHT_PARAM: &str = "highlight";

/// Characters `encodeURIComponent` leaves alone, minus `'`.
///
/// `'` is escaped too because result links are emitted inside HTML attributes.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// A URL split into its building blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// The URL as given.
    pub source: String,
    /// Scheme without the trailing `:`.
    pub protocol: String,
    pub host: String,
    /// Explicit port, empty when the scheme default applies.
    pub port: String,
    /// Query parameters in URL order, values still encoded. A parameter
    /// without `=` has an empty value.
    pub params: Vec<(String, String)>,
    /// Last path segment, empty for directory URLs.
    pub file: String,
    /// Fragment without the `#`.
    pub hash: String,
    /// Path, always starting with `/`.
    pub path: String,
}

impl ParsedUrl {
    /// Parse an absolute URL.
    pub fn parse(source: &str) -> Result<Self> {
        let url = Url::parse(source).map_err(|e| SearchError::InvalidUrl {
            url: source.to_string(),
            reason: e.to_string(),
        })?;

        let path = match url.path() {
            p if p.starts_with('/') => p.to_string(),
            p => format!("/{p}"),
        };
        let file = path
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(ParsedUrl {
            source: source.to_string(),
            protocol: url.scheme().to_string(),
            host: url.host_str().unwrap_or_default().to_string(),
            port: url.port().map(|p| p.to_string()).unwrap_or_default(),
            params: url.query().map(split_query).unwrap_or_default(),
            file,
            hash: url.fragment().unwrap_or_default().to_string(),
            path,
        })
    }

    /// `protocol://host[:port]path[?k=v&...][#hash]`
    pub fn render(&self) -> String {
        let mut out = format!("{}://{}", self.protocol, self.host);
        if !self.port.is_empty() {
            out.push(':');
            out.push_str(&self.port);
        }
        out.push_str(&self.path);
        let mut joiner = '?';
        for (key, value) in &self.params {
            out.push(joiner);
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            joiner = '&';
        }
        if !self.hash.is_empty() {
            out.push('#');
            out.push_str(&self.hash);
        }
        out
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_param(&self, key: &str) -> bool {
        self.param(key).is_some()
    }

    /// Set `key` to an already encoded `value`, keeping its position if present.
    pub fn set_param(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.params.push((key.to_string(), value)),
        }
    }

    pub fn remove_param(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Split a raw query string. Empty segments are skipped and a repeated key
/// keeps its first position but takes the last value.
fn split_query(query: &str) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::new();
    for part in query.split('&').filter(|part| !part.is_empty()) {
        let mut pieces = part.split('=');
        let key = pieces.next().unwrap_or_default();
        let value = pieces.next().unwrap_or_default();
        match params.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => params.push((key.to_string(), value.to_string())),
        }
    }
    params
}

/// Shorthand for [`ParsedUrl::parse`].
pub fn parse_url(source: &str) -> Result<ParsedUrl> {
    ParsedUrl::parse(source)
}

/// Shorthand for [`ParsedUrl::render`].
pub fn render_url(url: &ParsedUrl) -> String {
    url.render()
}

/// JavaScript's `encodeURIComponent`, additionally escaping `'` as `%27`.
///
/// ```
/// use booksearch::url::encode_uri_component;
///
/// assert_eq!(encode_uri_component("it's a test"), "it%27s%20a%20test");
/// ```
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Percent-decode. Invalid UTF-8 sequences become U+FFFD.
pub fn decode_uri_component(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// Decode a form-style query value: `+` is a space, then percent-decode.
pub fn decode_query_value(value: &str) -> String {
    decode_uri_component(&value.replace('+', "%20"))
}
