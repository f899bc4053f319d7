//! Silent-Structure lexicon - Level 1 data crate.
//!
//! Holds the symbol tables the translators read from:
//!
//! - four SS-side category tables (`Composite`, `Structural`, `Tag`, `Core`),
//!   each mapping a literal trigger to a human-readable meaning
//! - one NL-side map from case-folded phrase to a suggested SS snippet
//!
//! A [`LexiconStore`] is immutable once built. Load one from YAML with
//! [`load_from_str`] / [`load_from_path`], use the compiled-in default via
//! [`builtin`], or assemble one in code with [`LexiconBuilder`].

pub mod builtin;
pub mod error;
pub mod loader;
pub mod store;
pub mod types;

pub use builtin::{builtin, BUILTIN_LEXICON_YAML};
pub use error::LexiconError;
pub use loader::{load_from_path, load_from_str};
pub use store::{CategoryTable, LexiconBuilder, LexiconStats, LexiconStore, PhraseTable};
pub use types::{fold_case, fold_char, Category, LexiconEntry, NlMapEntry};
