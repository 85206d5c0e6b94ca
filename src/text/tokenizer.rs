// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query tokenizer.

/// Split text into lowercase tokens on runs of whitespace and hyphens.
///
/// Leading and trailing whitespace is trimmed first; empty tokens never
/// appear in the output.
///
/// ```
/// use booksearch::text::tokenize;
///
/// assert_eq!(tokenize("  Self-Hosted   Search "), vec!["self", "hosted", "search"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
