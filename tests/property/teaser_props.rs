//! Teaser invariants.

use booksearch::teaser::make_teaser;
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,8}").unwrap()
}

/// Words joined by single spaces or sentence breaks.
fn body_strategy() -> impl Strategy<Value = (String, usize)> {
    prop::collection::vec((word_strategy(), prop::bool::weighted(0.2)), 1..40).prop_map(|words| {
        let count = words.len();
        let mut body = String::new();
        for (i, (word, _)) in words.iter().enumerate() {
            if i > 0 {
                body.push_str(if words[i - 1].1 { ". " } else { " " });
            }
            body.push_str(word);
        }
        (body, count)
    })
}

fn strip_emphasis(teaser: &str) -> String {
    teaser.replace("<em>", "").replace("</em>", "")
}

fn word_count(text: &str) -> usize {
    text.split(' ').filter(|w| !w.is_empty()).count()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A window at least as long as the body shows all of it.
    #[test]
    fn prop_long_windows_show_the_whole_body(
        (body, words) in body_strategy(),
        term in word_strategy(),
        extra in 0usize..10,
    ) {
        let teaser = make_teaser(&body, &[term], words + extra);
        prop_assert_eq!(strip_emphasis(&teaser), body);
    }

    /// Without a match the teaser is the opening of the body.
    #[test]
    fn prop_unmatched_teasers_are_prefixes(
        (body, _) in body_strategy(),
        count in 1usize..50,
    ) {
        let teaser = make_teaser(&body, &["0".to_string()], count);
        prop_assert!(!teaser.contains("<em>"));
        prop_assert!(body.starts_with(&teaser));
    }

    /// The teaser holds exactly `min(count, words)` words, in body order.
    #[test]
    fn prop_window_size_is_bounded(
        (body, words) in body_strategy(),
        term in word_strategy(),
        count in 1usize..50,
    ) {
        let teaser = strip_emphasis(&make_teaser(&body, &[term], count));
        prop_assert_eq!(word_count(&teaser), count.min(words));
        prop_assert!(body.contains(&teaser));
    }

    /// Every emphasized word is a match for the term.
    #[test]
    fn prop_emphasis_only_wraps_matches(
        (body, _) in body_strategy(),
        term in "[a-z]{1,3}",
        count in 1usize..50,
    ) {
        let teaser = make_teaser(&body, &[term.clone()], count);
        let stem = booksearch::text::stem(&term);
        for emphasized in teaser.split("<em>").skip(1) {
            let word = emphasized.split("</em>").next().unwrap_or_default();
            let word_stem = booksearch::text::stem(&word.to_lowercase());
            prop_assert!(word_stem.starts_with(&stem), "{} does not match {}", word, term);
        }
    }
}
