// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use booksearch::load::{load_config, parse_bundle};
use booksearch::teaser::make_teaser;
use booksearch::text::escape_html;
use booksearch::url::{decode_query_value, parse_url};
use booksearch::{SearchIndex, SearchSession, SessionOptions};

mod cli;
use cli::display::{self, *};
use cli::{Cli, Commands};

/// Filter for library logs on stderr, e.g. `BOOKSEARCH_LOG=booksearch=debug`.
const LOG_ENV: &str = "BOOKSEARCH_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            bundle,
            query,
            limit,
            teaser_words,
            root,
            json,
        } => run_search(&bundle, &query, limit, teaser_words, root, json),
        Commands::Inspect { bundle } => run_inspect(&bundle),
        Commands::Teaser {
            terms,
            words,
            html,
            file,
        } => run_teaser(&terms, words, html, file.as_deref()),
        Commands::Url { url } => run_url(&url),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", themed(RED, &[BOLD], "error:"), e);
        std::process::exit(1);
    }
}

/// A book's output directory stands for the `searchindex.js` inside it.
fn resolve_bundle(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join("searchindex.js")
    } else {
        path.to_path_buf()
    }
}

fn run_search(
    bundle: &Path,
    query: &str,
    limit: Option<usize>,
    teaser_words: Option<usize>,
    root: String,
    json: bool,
) -> Result<()> {
    let bundle = &resolve_bundle(bundle);
    let mut config = load_config(bundle)
        .with_context(|| format!("loading search bundle {}", bundle.display()))?;
    if let Some(limit) = limit {
        config.results_options.limit_results = limit;
    }
    if let Some(words) = teaser_words {
        config.results_options.teaser_word_count = words;
    }

    let mut session = SearchSession::new(config, SessionOptions { path_to_root: root });
    let term = query.trim();
    if term.is_empty() {
        bail!("empty query");
    }
    let Some(page) = session.query(term) else {
        bail!("the index in {} could not be loaded", bundle.display());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    section_top("SEARCH");
    row(&themed(CYAN, &[BOLD], &page.header));
    for (i, result) in page.results.iter().enumerate() {
        section_mid(&format!("#{}", i + 1));
        row(&format!(
            "{} {}",
            score_value(result.score),
            themed(GREEN, &[BOLD], &display::unescape_html(&result.formatted.breadcrumbs))
        ));
        row(&themed(BLUE, &[UNDERLINE], &result.formatted.href));
        for line in wrap(&teaser_line(&result.formatted.teaser), BOX_WIDTH - 4) {
            row(&format!("  {}", line));
        }
    }
    section_bot();
    Ok(())
}

fn run_inspect(bundle: &Path) -> Result<()> {
    let bundle = &resolve_bundle(bundle);
    let text = fs::read_to_string(bundle)
        .with_context(|| format!("reading {}", bundle.display()))?;
    let config = parse_bundle(&text).with_context(|| format!("parsing {}", bundle.display()))?;
    let index = SearchIndex::from_value(config.index.clone()).context("loading the index")?;

    let checksum = crc32fast::hash(text.as_bytes());
    let compressed = brotli_size(text.as_bytes())?;

    section_top("BUNDLE");
    key_value("file", &bundle.display().to_string());
    key_value("size", &format_size(text.len()));
    key_value("brotli", &format_size(compressed));
    key_value("crc32", &format!("{checksum:08x}"));
    key_value("doc urls", &config.doc_urls.len().to_string());

    section_mid("INDEX");
    key_value("version", index.version().unwrap_or("unknown"));
    key_value("ref", index.ref_field());
    key_value("documents", &index.doc_count().to_string());
    key_value("saved", &index.store().is_saved().to_string());
    let pipeline: Vec<&str> = index.pipeline().stages().iter().map(|s| s.name()).collect();
    key_value("pipeline", &pipeline.join(" → "));
    for name in index.field_names() {
        if let Some(trie) = index.field(name) {
            key_value(&format!("field {name}"), &format!("{} terms", trie.term_count()));
        }
    }

    section_mid("OPTIONS");
    let results = &config.results_options;
    key_value("teaser words", &results.teaser_word_count.to_string());
    key_value("limit results", &results.limit_results.to_string());
    let search = &config.search_options;
    key_value(
        "bool",
        &search.bool.map_or_else(|| "OR (default)".to_string(), |b| b.to_string()),
    );
    key_value(
        "expand",
        &search.expand.map_or_else(|| "false (default)".to_string(), |e| e.to_string()),
    );
    for field in index.resolve_fields(search) {
        key_value(
            &format!("boost {}", field.name),
            &format!("{} ({}, expand {})", field.boost, field.bool, field.expand),
        );
    }
    section_bot();
    Ok(())
}

fn brotli_size(data: &[u8]) -> Result<usize> {
    let mut compressed = Vec::new();
    {
        let mut encoder = brotli::CompressorWriter::new(&mut compressed, 4096, 11, 22);
        encoder.write_all(data).context("compressing bundle")?;
    }
    Ok(compressed.len())
}

fn run_teaser(terms: &str, words: usize, html: bool, file: Option<&Path>) -> Result<()> {
    let body = match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("reading stdin")?;
            body
        }
    };

    let terms: Vec<String> = terms.trim().split(' ').map(str::to_string).collect();
    let teaser = make_teaser(&escape_html(body.trim_end()), &terms, words);
    if html {
        println!("{teaser}");
    } else {
        for line in wrap(&teaser_line(&teaser), BOX_WIDTH) {
            println!("{line}");
        }
    }
    Ok(())
}

fn run_url(source: &str) -> Result<()> {
    let url = parse_url(source)?;

    section_top("URL");
    key_value("protocol", &url.protocol);
    key_value("host", &url.host);
    key_value("port", &url.port);
    key_value("path", &url.path);
    key_value("file", &url.file);
    key_value("hash", &url.hash);
    for (key, value) in &url.params {
        key_value(
            &format!("?{key}"),
            &format!("{value}  {}", themed(GRAY, &[DIM], &format!("= {:?}", decode_query_value(value)))),
        );
    }
    section_mid("RENDERED");
    row(&url.render());
    section_bot();
    Ok(())
}
