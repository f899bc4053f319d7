//! Lexicon types for Silent-Structure lookup.
//!
//! These are plain data. Ordering and matching live in the translation crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LexiconError;

// =============================================================================
// Category
// =============================================================================

/// The SS-side table a trigger belongs to.
///
/// Declaration order is match precedence: when two triggers of equal length
/// both match, the earlier category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Multi-symbol patterns with a combined meaning (e.g. `<[]>`)
    Composite,
    /// Structural operators (e.g. `=>`, `::`)
    Structural,
    /// Named tags (e.g. `#goal`)
    Tag,
    /// Single core symbols and brackets (e.g. `[]`, `<`)
    Core,
}

impl Category {
    /// All categories in precedence order.
    pub const ALL: [Category; 4] = [
        Category::Composite,
        Category::Structural,
        Category::Tag,
        Category::Core,
    ];

    /// Precedence rank, lower wins.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Composite => 0,
            Self::Structural => 1,
            Self::Tag => 2,
            Self::Core => 3,
        }
    }

    /// Key used in lexicon YAML files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Composite => "composite",
            Self::Structural => "structural",
            Self::Tag => "tag",
            Self::Core => "core",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Composite => "Composite",
            Self::Structural => "Structural",
            Self::Tag => "Tag",
            Self::Core => "Core",
        };
        f.write_str(label)
    }
}

impl FromStr for Category {
    type Err = LexiconError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "composite" => Ok(Self::Composite),
            "structural" => Ok(Self::Structural),
            "tag" | "tags" => Ok(Self::Tag),
            "core" => Ok(Self::Core),
            other => Err(LexiconError::UnknownCategory(other.to_string())),
        }
    }
}

// =============================================================================
// Entries
// =============================================================================

/// One SS-side mapping: a literal trigger and its human-readable meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub trigger: String,
    pub category: Category,
    pub meaning: String,
}

impl LexiconEntry {
    pub fn new(category: Category, trigger: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            category,
            meaning: meaning.into(),
        }
    }

    /// Trigger length in chars, the unit the match index sorts by.
    pub fn trigger_len(&self) -> usize {
        self.trigger.chars().count()
    }
}

// =============================================================================
// Case folding
// =============================================================================

/// Case fold for one char: per-char lower-casing, with final sigma `ς`
/// folded to `σ`.
///
/// Phrases are stored through this and scanners fold input with it, so both
/// sides agree regardless of where a char sits in a word.
pub fn fold_char(c: char) -> impl Iterator<Item = char> {
    c.to_lowercase().map(|c| if c == 'ς' { 'σ' } else { c })
}

/// [`fold_char`] over a whole string.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(fold_char).collect()
}

/// One NL-side mapping: a case-folded phrase and the SS snippet it suggests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NlMapEntry {
    pub phrase: String,
    pub snippet: String,
}

impl NlMapEntry {
    /// Create an entry, case-folding the phrase.
    pub fn new(phrase: impl AsRef<str>, snippet: impl Into<String>) -> Self {
        Self {
            phrase: fold_case(phrase.as_ref()),
            snippet: snippet.into(),
        }
    }

    pub fn phrase_len(&self) -> usize {
        self.phrase.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_follows_declaration_order() {
        let ranks: Vec<u8> = Category::ALL.iter().map(|c| c.precedence()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(Category::Composite < Category::Core);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Core".parse::<Category>().unwrap(), Category::Core);
        assert_eq!(" tags ".parse::<Category>().unwrap(), Category::Tag);
        assert!(matches!(
            "glyph".parse::<Category>(),
            Err(LexiconError::UnknownCategory(name)) if name == "glyph"
        ));
    }

    #[test]
    fn test_category_serializes_as_yaml_key() {
        assert_eq!(
            serde_json::to_string(&Category::Structural).unwrap(),
            "\"structural\""
        );
        let parsed: Category = serde_json::from_str("\"core\"").unwrap();
        assert_eq!(parsed, Category::Core);
    }

    #[test]
    fn test_nl_entry_lowercases_phrase() {
        let entry = NlMapEntry::new("User Container", "[]");
        assert_eq!(entry.phrase, "user container");
        assert_eq!(entry.phrase_len(), 14);
    }

    #[test]
    fn test_fold_case_ignores_sigma_position() {
        assert_eq!(fold_case("ΟΔΟΣ"), "οδοσ");
        assert_eq!(fold_case("οδος"), "οδοσ");
        assert_eq!(NlMapEntry::new("Οδός", "#road").phrase, fold_case("ΟΔΌΣ"));
        assert_eq!(fold_case("İ"), "i\u{307}");
    }

    #[test]
    fn test_trigger_len_counts_chars() {
        let entry = LexiconEntry::new(Category::Core, "→", "leads to");
        assert_eq!(entry.trigger_len(), 1);
    }
}
