//! The two translators and a facade that owns their shared state.

pub mod annotation;
pub mod bounded;
mod folded;
pub mod symbolic;
pub mod text;

use std::sync::Arc;

use ss_lexicon::{LexiconError, LexiconStore};

use crate::config::TranslatorConfig;
use crate::index::{build_match_indices, MatchIndices};

pub use annotation::{SymbolicAnnotation, TextAnnotation};
pub use bounded::Termination;
pub use symbolic::{read_symbolic, translate_symbolic_to_text, SymbolicReading};
pub use text::{suggest_pattern, translate_text_to_symbolic, SuggestedPattern};

/// Indices plus config, shareable across threads.
///
/// Cloning is cheap; the indices are reference-counted. Swapping lexicons
/// means building a new `Translator`, never mutating one in place.
#[derive(Debug, Clone)]
pub struct Translator {
    indices: Arc<MatchIndices>,
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(indices: Arc<MatchIndices>) -> Self {
        Self {
            indices,
            config: TranslatorConfig::default(),
        }
    }

    /// Build indices from `lexicon` and wrap them.
    pub fn from_lexicon(lexicon: Arc<LexiconStore>) -> Self {
        Self::new(Arc::new(build_match_indices(lexicon)))
    }

    /// Translator over the compiled-in lexicon.
    pub fn builtin() -> Result<Self, LexiconError> {
        Ok(Self::from_lexicon(Arc::new(ss_lexicon::builtin()?)))
    }

    pub fn with_config(mut self, config: TranslatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn indices(&self) -> &MatchIndices {
        &self.indices
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn read_symbolic(&self, input: &str) -> SymbolicReading {
        read_symbolic(&self.indices, &self.config, input)
    }

    pub fn suggest_pattern(&self, input: &str) -> SuggestedPattern {
        suggest_pattern(&self.indices, &self.config, input)
    }

    /// SS → natural-language description.
    pub fn symbolic_to_text(&self, input: &str) -> String {
        self.read_symbolic(input).render()
    }

    /// Natural language → suggested SS pattern.
    pub fn text_to_symbolic(&self, input: &str) -> String {
        self.suggest_pattern(input).render()
    }
}
