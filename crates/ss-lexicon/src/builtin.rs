//! The built-in Silent-Structure lexicon, compiled into the binary.

use crate::error::LexiconError;
use crate::loader;
use crate::store::LexiconStore;

/// YAML source of the built-in lexicon.
pub const BUILTIN_LEXICON_YAML: &str = include_str!("../config/silent_structure.yaml");

/// Parse the built-in lexicon.
pub fn builtin() -> Result<LexiconStore, LexiconError> {
    loader::load_from_str(BUILTIN_LEXICON_YAML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_builtin_parses() {
        let store = builtin().unwrap();
        let stats = store.stats();
        assert!(stats.core_count >= 40, "core table too small: {}", stats.core_count);
        assert!(stats.composite_count >= 10);
        assert!(stats.structural_count >= 10);
        assert!(stats.tag_count >= 10);
        assert!(stats.phrase_count >= 40);
    }

    #[test]
    fn test_builtin_anchor_entries() {
        let store = builtin().unwrap();
        assert!(store.lookup("[]", Category::Core).is_some());
        assert!(store.lookup("<", Category::Core).is_some());
        assert!(store.lookup("<[]>", Category::Composite).is_some());
        assert_eq!(store.nl_snippet("user container"), Some("[]"));
    }

    #[test]
    fn test_builtin_phrases_are_lowercase() {
        let store = builtin().unwrap();
        for entry in store.phrases().iter() {
            assert_eq!(entry.phrase, entry.phrase.to_lowercase());
        }
    }
}
