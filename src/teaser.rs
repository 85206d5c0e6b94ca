// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Teaser ranking: pick the excerpt of a document that best shows why it matched.
//!
//! Every word of the body gets a weight, a window of fixed word count slides
//! across the body, and the heaviest window wins. Words that match a search
//! term (after stemming, by prefix) are wrapped in `<em>`.
//!
//! # Weights
//!
//! | Word                          | Weight |
//! |-------------------------------|--------|
//! | Matches a search term         | 40     |
//! | First word of a sentence      | 8      |
//! | Anything else                 | 2      |
//!
//! # Tie-break
//!
//! When at least one term matched, the *last* window with the maximum weight
//! wins. When nothing matched, the teaser is always the opening window. This
//! has to stay exactly as is: it decides which excerpt users see for documents
//! that mention a term symmetrically, and the browser widget does the same.
//!
//! # Offsets
//!
//! Words are located by byte offset in the original body, and the teaser is
//! rebuilt by slicing between those offsets. The text between words (spaces,
//! sentence punctuation, repeated blanks) is copied verbatim, never
//! re-tokenized.

use tracing::trace;

use crate::text::stem;

/// Weight of a word that matches a search term.
pub const SEARCHTERM_WEIGHT: u32 = 40;

/// Weight of the first word of a sentence.
pub const SENTENCE_START_WEIGHT: u32 = 8;

/// Weight of every other word.
pub const NORMAL_WEIGHT: u32 = 2;

/// Sentence delimiter. Only a period followed by a space counts.
const SENTENCE_DELIMITER: &str = ". ";

pub const EMPHASIS_OPEN: &str = "<em>";
pub const EMPHASIS_CLOSE: &str = "</em>";

/// A word of the body with its weight and where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedWord {
    /// Byte offset of the word in the body.
    pub offset: usize,
    /// Byte length of the word.
    pub len: usize,
    pub weight: u32,
}

impl WeightedWord {
    fn end(&self) -> usize {
        self.offset + self.len
    }

    fn is_match(&self) -> bool {
        self.weight == SEARCHTERM_WEIGHT
    }
}

/// Weigh every word of `body` against the stemmed search terms.
///
/// Returns the words in document order and whether any of them matched.
pub fn weigh_words(body: &str, searchterms: &[String]) -> (Vec<WeightedWord>, bool) {
    let stemmed_terms: Vec<String> = searchterms
        .iter()
        .map(|term| stem(&term.to_lowercase()))
        .collect();

    let mut words = Vec::new();
    let mut found = false;
    let mut offset = 0;

    for sentence in body.split(SENTENCE_DELIMITER) {
        let mut weight = SENTENCE_START_WEIGHT;
        for word in sentence.split(' ') {
            if !word.is_empty() {
                let word_stem = stem(&word.to_lowercase());
                if stemmed_terms.iter().any(|term| word_stem.starts_with(term.as_str())) {
                    weight = SEARCHTERM_WEIGHT;
                    found = true;
                }
                words.push(WeightedWord {
                    offset,
                    len: word.len(),
                    weight,
                });
                weight = NORMAL_WEIGHT;
            }
            // the word plus the ' ' that followed it (or the '.' ending the sentence)
            offset += word.len() + 1;
        }
        // the second byte of ". "
        offset += 1;
    }

    (words, found)
}

/// Weight of every window of `window` consecutive words, in O(n).
///
/// `window` must be between 1 and `words.len()`.
pub fn window_weights(words: &[WeightedWord], window: usize) -> Vec<u32> {
    let mut sums = Vec::with_capacity(words.len() - window + 1);
    let mut sum: u32 = words[..window].iter().map(|w| w.weight).sum();
    sums.push(sum);
    for i in 0..words.len() - window {
        sum -= words[i].weight;
        sum += words[i + window].weight;
        sums.push(sum);
    }
    sums
}

/// Index of the winning window: the last maximum when anything matched, else 0.
pub fn select_window(sums: &[u32], searchterm_found: bool) -> usize {
    if !searchterm_found {
        return 0;
    }
    let mut best = 0;
    let mut best_sum = 0;
    for (i, &sum) in sums.iter().enumerate().rev() {
        if sum > best_sum {
            best_sum = sum;
            best = i;
        }
    }
    best
}

/// Build the teaser for an HTML-escaped `body`.
///
/// A body without any words comes back untouched. The window is
/// `teaser_word_count` words, or the whole body when it is shorter.
///
/// ```
/// use booksearch::teaser::make_teaser;
///
/// let teaser = make_teaser("The quick fox. The fox jumps over the lazy dog.", &["fox".into()], 5);
/// assert_eq!(teaser, "The quick <em>fox</em>. The <em>fox</em>");
/// ```
pub fn make_teaser(body: &str, searchterms: &[String], teaser_word_count: usize) -> String {
    let (words, found) = weigh_words(body, searchterms);
    if words.is_empty() {
        return body.to_string();
    }

    let window = teaser_word_count.min(words.len());
    if window == 0 {
        return String::new();
    }
    let sums = window_weights(&words, window);
    let start = select_window(&sums, found);
    trace!(words = words.len(), window, start, found, "teaser window");

    let mut teaser = String::new();
    let mut cursor = words[start].offset;
    for word in &words[start..start + window] {
        if cursor < word.offset {
            teaser.push_str(&body[cursor..word.offset]);
        }
        if word.is_match() {
            teaser.push_str(EMPHASIS_OPEN);
        }
        teaser.push_str(&body[word.offset..word.end()]);
        if word.is_match() {
            teaser.push_str(EMPHASIS_CLOSE);
        }
        cursor = word.end();
    }
    teaser
}
