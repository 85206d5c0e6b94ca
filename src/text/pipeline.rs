// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The token pipeline an index was built with, replayed at query time.
//!
//! A serialized index names its pipeline (`["trimmer", "stopWordFilter",
//! "stemmer"]` for English). Each stage maps a token to a token or drops it.
//! Order matters: the stop word filter sees trimmed tokens, the stemmer sees
//! only survivors.

use crate::error::{Result, SearchError};
use crate::text::stemmer::stem;

/// English stop words, shared with the index builder.
const STOP_WORDS: &[&str] = &[
    "a", "able", "about", "across", "after", "all", "almost", "also", "am", "among", "an", "and",
    "any", "are", "as", "at", "be", "because", "been", "but", "by", "can", "cannot", "could",
    "dear", "did", "do", "does", "either", "else", "ever", "every", "for", "from", "get", "got",
    "had", "has", "have", "he", "her", "hers", "him", "his", "how", "however", "i", "if", "in",
    "into", "is", "it", "its", "just", "least", "let", "like", "likely", "may", "me", "might",
    "most", "must", "my", "neither", "no", "nor", "not", "of", "off", "often", "on", "only", "or",
    "other", "our", "own", "rather", "said", "say", "says", "she", "should", "since", "so", "some",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "tis", "to",
    "too", "twas", "us", "wants", "was", "we", "were", "what", "when", "where", "which", "while",
    "who", "whom", "why", "will", "with", "would", "yet", "you", "your",
];

/// A single pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineFunction {
    /// Strip leading and trailing non-word characters (`[^A-Za-z0-9_]`).
    Trimmer,
    /// Drop empty tokens and English stop words.
    StopWordFilter,
    /// Porter stemming.
    Stemmer,
}

impl PipelineFunction {
    /// Resolve a registered function by the name used in serialized indexes.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "trimmer" => Ok(PipelineFunction::Trimmer),
            "stopWordFilter" => Ok(PipelineFunction::StopWordFilter),
            "stemmer" => Ok(PipelineFunction::Stemmer),
            other => Err(SearchError::UnknownPipelineFunction(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PipelineFunction::Trimmer => "trimmer",
            PipelineFunction::StopWordFilter => "stopWordFilter",
            PipelineFunction::Stemmer => "stemmer",
        }
    }

    fn apply(self, token: String) -> Option<String> {
        match self {
            PipelineFunction::Trimmer => Some(trim(&token).to_string()),
            PipelineFunction::StopWordFilter => {
                (!token.is_empty() && !is_stop_word(&token)).then_some(token)
            }
            PipelineFunction::Stemmer => Some(stem(&token)),
        }
    }
}

/// Ordered list of stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<PipelineFunction>,
}

impl Pipeline {
    pub fn new(stages: Vec<PipelineFunction>) -> Self {
        Pipeline { stages }
    }

    /// The pipeline English indexes are built with.
    pub fn english() -> Self {
        Pipeline::new(vec![
            PipelineFunction::Trimmer,
            PipelineFunction::StopWordFilter,
            PipelineFunction::Stemmer,
        ])
    }

    /// Resolve a serialized pipeline.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        names
            .iter()
            .map(|name| PipelineFunction::from_name(name.as_ref()))
            .collect::<Result<Vec<_>>>()
            .map(Pipeline::new)
    }

    pub fn stages(&self) -> &[PipelineFunction] {
        &self.stages
    }

    /// Run every token through every stage; a stage returning nothing drops the token.
    pub fn run(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter_map(|token| {
                self.stages
                    .iter()
                    .try_fold(token, |token, stage| stage.apply(token))
            })
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn trim(token: &str) -> &str {
    token.trim_matches(|c: char| !is_word_char(c))
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}
