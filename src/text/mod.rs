// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text processing shared by the index adapter and the teaser ranker.
//!
//! Query text goes through the same steps the index builder used on the
//! documents: tokenize, trim, drop stop words, stem. If these drift from the
//! builder's, queries stop matching postings, so every function here keeps
//! output parity with the elasticlunr implementations.

pub mod html;
pub mod pipeline;
pub mod stemmer;
pub mod tokenizer;

pub use html::escape_html;
pub use pipeline::{Pipeline, PipelineFunction};
pub use stemmer::stem;
pub use tokenizer::tokenize;
