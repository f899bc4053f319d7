//! Lexicon load and validation errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::Category;

/// Errors raised while building or loading a lexicon.
///
/// Translation itself never fails; every error here is a configuration
/// problem caught before the match indices are built.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Failed to read lexicon from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse lexicon YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Empty trigger in {0} category")]
    EmptyTrigger(Category),

    #[error("Trigger {trigger:?} in {category} category starts with whitespace and can never match")]
    UnreachableTrigger { category: Category, trigger: String },

    #[error("Duplicate trigger {trigger:?} in {category} category")]
    DuplicateTrigger { category: Category, trigger: String },

    #[error("Empty natural-language phrase")]
    EmptyPhrase,

    #[error("Phrase {0:?} starts with whitespace and can never match")]
    UnreachablePhrase(String),

    #[error("Duplicate phrase {0:?} (phrases are case-insensitive)")]
    DuplicatePhrase(String),

    #[error("Unknown lexicon category '{0}'. Use: composite, structural, tag, core")]
    UnknownCategory(String),

    #[error("Expected a string at {location}")]
    NotAString { location: String },

    #[error("Expected a mapping at {location}")]
    NotAMapping { location: String },
}
