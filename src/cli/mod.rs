// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the booksearch command-line interface.
//!
//! Four subcommands: `search` runs a query against a built book's search
//! bundle exactly as the in-page widget would, `inspect` summarizes a bundle,
//! `teaser` runs the excerpt ranker over arbitrary text, and `url` shows how
//! a page URL splits into the pieces the widget edits.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "booksearch",
    about = "Search a documentation site's prebuilt index from the terminal",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a bundle and display results with teasers
    Search {
        /// Path to searchindex.js, searchindex.json or the book's output directory
        bundle: PathBuf,

        /// Search query
        query: String,

        /// Maximum number of results (defaults to the bundle's limit_results)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Words per teaser (defaults to the bundle's teaser_word_count)
        #[arg(short = 'w', long)]
        teaser_words: Option<usize>,

        /// Prefix for result links
        #[arg(long, default_value = "")]
        root: String,

        /// Print the result page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a bundle: documents, fields, pipeline, options
    Inspect {
        /// Path to searchindex.js, searchindex.json or the book's output directory
        bundle: PathBuf,
    },

    /// Build a teaser for a body of text
    Teaser {
        /// Search terms (space separated, as typed)
        #[arg(short, long)]
        terms: String,

        /// Window size in words
        #[arg(short, long, default_value = "30")]
        words: usize,

        /// Print the HTML fragment instead of terminal text
        #[arg(long)]
        html: bool,

        /// File to read the body from (`-` or nothing for stdin)
        file: Option<PathBuf>,
    },

    /// Parse a URL into its components and render it back
    Url {
        /// Absolute URL
        url: String,
    },
}
