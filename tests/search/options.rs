//! How search options select and weigh fields.

use booksearch::{BoolMode, SearchConfig, SearchOptions};
use serde_json::json;

use crate::common::{bundle_json, index, make_doc, positions, sample_book};

fn parse(value: serde_json::Value) -> SearchOptions {
    serde_json::from_value(value).unwrap()
}

#[test]
fn a_bundle_without_options_gets_the_widget_defaults() {
    let config: SearchConfig = serde_json::from_value(bundle_json(&sample_book(), json!({}))).unwrap();
    let options = &config.search_options;
    assert_eq!(options.bool, Some(BoolMode::And));
    assert_eq!(options.expand, Some(true));
    let fields: Vec<(&str, Option<f64>)> = options
        .fields
        .iter()
        .flatten()
        .map(|(name, field)| (name.as_str(), field.boost))
        .collect();
    assert_eq!(
        fields,
        vec![("title", Some(1.0)), ("body", Some(1.0)), ("breadcrumbs", Some(0.0))]
    );
    assert_eq!(config.results_options.teaser_word_count, 30);
    assert_eq!(config.results_options.limit_results, 30);
}

#[test]
fn only_uppercase_and_means_conjunction() {
    assert_eq!(parse(json!({ "bool": "AND" })).bool, Some(BoolMode::And));
    assert_eq!(parse(json!({ "bool": "and" })).bool, Some(BoolMode::Or));
    assert_eq!(parse(json!({ "bool": "XOR" })).bool, Some(BoolMode::Or));
}

#[test]
fn field_order_follows_the_bundle() {
    let options = parse(json!({
        "fields": { "body": {}, "title": { "boost": 3 } }
    }));
    let index = index(&sample_book());
    let resolved: Vec<(&str, f64)> = index
        .resolve_fields(&options)
        .iter()
        .map(|f| (f.name, f.boost))
        .collect();
    assert_eq!(resolved, vec![("body", 1.0), ("title", 3.0)]);
}

#[test]
fn per_field_settings_override_global_ones() {
    let options = parse(json!({
        "bool": "AND",
        "expand": true,
        "fields": { "title": { "bool": "OR", "expand": false }, "body": {} }
    }));
    let index = index(&sample_book());
    let resolved = index.resolve_fields(&options);
    assert_eq!(resolved[0].bool, BoolMode::Or);
    assert!(!resolved[0].expand);
    assert_eq!(resolved[1].bool, BoolMode::And);
    assert!(resolved[1].expand);
}

#[test]
fn fields_missing_from_the_index_are_ignored() {
    let index = index(&sample_book());
    let with_unknown = parse(json!({
        "fields": { "summary": { "boost": 5 }, "body": { "boost": 1 } }
    }));
    let body = parse(json!({ "fields": { "body": { "boost": 1 } } }));
    assert_eq!(index.resolve_fields(&with_unknown).len(), 1);
    assert_eq!(index.search("fox", &with_unknown), index.search("fox", &body));
}

#[test]
fn zero_boost_fields_are_not_searched() {
    let docs = vec![make_doc("Foxes", "nothing to see", "a.html")];
    let index = index(&docs);
    let muted = parse(json!({
        "fields": { "title": { "boost": 0 }, "body": { "boost": 1 } }
    }));
    assert!(index.search("fox", &muted).is_empty());

    let audible = parse(json!({ "fields": { "title": { "boost": 1 } } }));
    assert_eq!(positions(&index.search("fox", &audible)), vec![0]);
}

#[test]
fn without_a_field_map_every_field_counts() {
    let index = index(&sample_book());
    let options = parse(json!({}));
    assert_eq!(options.bool, None);
    assert_eq!(index.resolve_fields(&options).len(), 3);
    assert_eq!(positions(&index.search("installing", &options)), vec![1]);
}

#[test]
fn queries_without_content_find_nothing() {
    let index = index(&sample_book());
    let options = SearchOptions::default();
    assert!(index.search("", &options).is_empty());
    assert!(index.search("the and of", &options).is_empty());
    assert!(index.search("zzzz", &options).is_empty());
    assert!(index.query_tokens("The").is_empty());
}
