//! Tokenizer, pipeline and page highlighting.

use booksearch::highlight::{mark, unmark};
use booksearch::text::{escape_html, stem, tokenize, Pipeline, PipelineFunction};

use crate::common::terms;

#[test]
fn query_tokens_go_through_the_whole_pipeline() {
    let pipeline = Pipeline::english();
    let out = pipeline.run(tokenize("The Searching-Index, and its RESULTS!"));
    assert_eq!(out, vec!["search", "index", "result"]);
}

#[test]
fn pipeline_names_round_trip() {
    let pipeline = Pipeline::from_names(&["trimmer", "stopWordFilter", "stemmer"]).unwrap();
    assert_eq!(pipeline, Pipeline::english());
    let names: Vec<&str> = pipeline.stages().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["trimmer", "stopWordFilter", "stemmer"]);
}

#[test]
fn stages_can_be_used_alone() {
    let trim_only = Pipeline::new(vec![PipelineFunction::Trimmer]);
    assert_eq!(trim_only.run(tokenize("(the) fox.")), vec!["the", "fox"]);
}

#[test]
fn stop_words_only_produce_nothing() {
    assert!(Pipeline::english().run(tokenize("the and of it")).is_empty());
}

#[test]
fn stems_used_by_the_teaser() {
    assert_eq!(stem("searching"), "search");
    assert_eq!(stem("results"), "result");
    assert_eq!(stem("generalization"), "gener");
    assert_eq!(stem("fox"), "fox");
}

#[test]
fn escaping_covers_quotes() {
    assert_eq!(escape_html(r#"<a href="x">it's</a>"#), "&lt;a href=&#34;x&#34;&gt;it&#39;s&lt;/a&gt;");
}

#[test]
fn highlight_skips_markup_and_undoes_cleanly() {
    let page = "<h1 id=\"fox\">Fox facts</h1><p>A fox &amp; a dog.</p>";
    let marked = mark(page, &terms(&["fox", "dog"]));
    assert_eq!(
        marked,
        "<h1 id=\"fox\"><mark>Fox</mark> facts</h1><p>A <mark>fox</mark> &amp; a <mark>dog</mark>.</p>"
    );
    assert_eq!(unmark(&marked), page);
}

#[test]
fn empty_highlight_words_mark_nothing() {
    assert_eq!(mark("<p>fox</p>", &terms(&[""])), "<p>fox</p>");
}
