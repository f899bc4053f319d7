//! Silent-Structure translator core.
//!
//! Silent-Structure (SS) is a compact symbolic notation for structured
//! prompts. This crate translates in both directions using a shared lexicon:
//!
//! - **SS → text**: each recognized trigger becomes its meaning; unknown
//!   fragments and stray chars become bracketed annotations
//! - **text → SS**: known phrases become SS snippets; other words are kept as
//!   `[# NL: "..."]` commentary
//!
//! Both directions are greedy longest-match scans with a hard step budget.
//! Neither returns an error: problems are reported inside the output string.
//!
//! ```ignore
//! let translator = ss_translate::Translator::builtin()?;
//! println!("{}", translator.symbolic_to_text("[]→{}"));
//! println!("{}", translator.text_to_symbolic("user container leads to goal"));
//! ```
//!
//! The lexicon itself lives in the `ss-lexicon` crate and is re-exported here.

pub mod config;
pub mod index;
pub mod translate;

pub use config::{ConfigError, PreviewLimits, StepBudget, TranslatorConfig};
pub use index::{
    build_match_indices, MatchIndexBuilder, MatchIndices, SortedNlIndex, SortedSsIndex,
    SsIndexEntry,
};
pub use ss_lexicon::{Category, LexiconEntry, LexiconError, LexiconStore, NlMapEntry};
pub use translate::{
    read_symbolic, suggest_pattern, translate_symbolic_to_text, translate_text_to_symbolic,
    SuggestedPattern, SymbolicReading, Termination, Translator,
};
