// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Porter stemmer with output parity to the one the index was built with.
//!
//! The index stores stems, so a query stem that differs by one letter from
//! the builder's stem finds nothing. This follows the classic 1980 algorithm
//! as the JavaScript lunr/elasticlunr family implements it, quirks included:
//!
//! - words shorter than three characters are returned unchanged
//! - a leading `y` is treated as a consonant for the whole run
//! - suffix rules pick the *longest* matching suffix, then either apply it or
//!   leave the word alone (no fallback to a shorter suffix)
//!
//! The measure conditions are regular languages, so they're expressed as the
//! same regexes the reference uses instead of a hand-rolled VC counter.
//!
//! ```
//! use booksearch::text::stem;
//!
//! assert_eq!(stem("running"), "run");
//! assert_eq!(stem("foxes"), "fox");
//! assert_eq!(stem("relational"), "relat");
//! ```

use std::sync::LazyLock;

use regex::Regex;

// consonant sequence: C = [^aeiou][^aeiouy]*, vowel sequence: V = [aeiouy][aeiou]*
const C: &str = "[^aeiou][^aeiouy]*";
const V: &str = "[aeiouy][aeiou]*";
const V_SINGLE: &str = "[aeiouy]";

/// m > 0
static MGR0: LazyLock<Regex> = LazyLock::new(|| compile(&format!("^({C})?{V}{C}")));
/// m = 1
static MEQ1: LazyLock<Regex> = LazyLock::new(|| compile(&format!("^({C})?{V}{C}({V})?$")));
/// m > 1
static MGR1: LazyLock<Regex> = LazyLock::new(|| compile(&format!("^({C})?{V}{C}{V}{C}")));
/// stem contains a vowel
static HAS_VOWEL: LazyLock<Regex> = LazyLock::new(|| compile(&format!("^({C})?{V_SINGLE}")));
/// *o: ends consonant-vowel-consonant, last not w, x or y
static CVC: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!("^{C}{V_SINGLE}[^aeiouwxy]$")));

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => unreachable!("stemmer pattern {pattern} is invalid: {e}"),
    }
}

const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ou", "ism",
    "ate", "iti", "ous", "ive", "ize",
];

/// Reduce a (lowercase) word to its Porter stem.
pub fn stem(word: &str) -> String {
    if word.chars().count() < 3 {
        return word.to_string();
    }

    let leading_y = word.starts_with('y');
    let mut w = if leading_y {
        format!("Y{}", &word[1..])
    } else {
        word.to_string()
    };

    w = step1a(w);
    w = step1b(w);
    w = step1c(w);
    w = step_table(w, STEP2);
    w = step_table(w, STEP3);
    w = step4(w);
    w = step5(w);

    if leading_y {
        w.replace_range(0..1, "y");
    }
    w
}

/// Split off the longest suffix from `suffixes` that leaves a non-empty stem.
fn longest_suffix<'a>(word: &'a str, suffixes: impl Iterator<Item = &'a str>) -> Option<(&'a str, &'a str)> {
    suffixes
        .filter(|suffix| word.len() > suffix.len() && word.ends_with(suffix))
        .max_by_key(|suffix| suffix.len())
        .map(|suffix| (&word[..word.len() - suffix.len()], suffix))
}

fn drop_last_char(mut w: String) -> String {
    w.pop();
    w
}

fn second_to_last(w: &str) -> Option<char> {
    w.chars().rev().nth(1)
}

fn step1a(w: String) -> String {
    if (w.len() > 4 && w.ends_with("sses")) || (w.len() > 3 && w.ends_with("ies")) {
        // sses -> ss, ies -> i
        return w[..w.len() - 2].to_string();
    }
    if w.chars().count() > 2 && w.ends_with('s') && second_to_last(&w) != Some('s') {
        return drop_last_char(w);
    }
    w
}

fn step1b(w: String) -> String {
    if w.len() > 3 && w.ends_with("eed") {
        let stem = &w[..w.len() - 3];
        if MGR0.is_match(stem) {
            return drop_last_char(w);
        }
        return w;
    }

    let stem = if w.len() > 3 && w.ends_with("ing") {
        &w[..w.len() - 3]
    } else if w.len() > 2 && w.ends_with("ed") {
        &w[..w.len() - 2]
    } else {
        return w;
    };
    if !HAS_VOWEL.is_match(stem) {
        return w;
    }

    let stem = stem.to_string();
    if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
        format!("{stem}e")
    } else if ends_with_double_consonant(&stem) {
        drop_last_char(stem)
    } else if CVC.is_match(&stem) {
        format!("{stem}e")
    } else {
        stem
    }
}

/// Double letter at the end, excluding vowels, `y`, `l`, `s` and `z`.
fn ends_with_double_consonant(w: &str) -> bool {
    let mut rev = w.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(last), Some(prev)) => last == prev && !"aeiouylsz".contains(last),
        _ => false,
    }
}

fn step1c(w: String) -> String {
    if w.len() > 1 && w.ends_with('y') {
        let stem = &w[..w.len() - 1];
        if HAS_VOWEL.is_match(stem) {
            return format!("{stem}i");
        }
    }
    w
}

fn step_table(w: String, table: &[(&str, &str)]) -> String {
    let Some((stem, suffix)) = longest_suffix(&w, table.iter().map(|(from, _)| *from)) else {
        return w;
    };
    if !MGR0.is_match(stem) {
        return w;
    }
    let replacement = table
        .iter()
        .find(|(from, _)| *from == suffix)
        .map_or("", |(_, to)| *to);
    format!("{stem}{replacement}")
}

fn step4(w: String) -> String {
    if let Some((stem, _)) = longest_suffix(&w, STEP4.iter().copied()) {
        if MGR1.is_match(stem) {
            return stem.to_string();
        }
        return w;
    }
    // (s|t)ion -> (s|t)
    if w.len() > 4 && w.ends_with("ion") {
        let stem = &w[..w.len() - 3];
        if (stem.ends_with('s') || stem.ends_with('t')) && MGR1.is_match(stem) {
            return stem.to_string();
        }
    }
    w
}

fn step5(w: String) -> String {
    let mut w = w;
    if w.len() > 1 && w.ends_with('e') {
        let stem = &w[..w.len() - 1];
        if MGR1.is_match(stem) || (MEQ1.is_match(stem) && !CVC.is_match(stem)) {
            w = stem.to_string();
        }
    }
    if w.ends_with("ll") && MGR1.is_match(&w) {
        w = drop_last_char(w);
    }
    w
}
