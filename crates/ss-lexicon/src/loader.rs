//! LexiconLoader - build a [`LexiconStore`] from YAML.
//!
//! ## Format
//!
//! ```yaml
//! version: "1.0.0"
//! categories:
//!   composite:
//!     "<[]>": "Pending user container"
//!   structural:
//!     "=>": "Implies"
//!   tag:
//!     "#goal": "Goal tag"
//!   core:
//!     "[]": "User container"
//! phrases:
//!   "user container": "[]"
//! ```
//!
//! Mappings are read in document order, which becomes declaration order in
//! the store (and therefore the tie-break order of the match index).
//! A missing section yields an empty table with a warning.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::LexiconError;
use crate::store::{LexiconBuilder, LexiconStore};
use crate::types::Category;

/// Parse a lexicon from YAML source.
pub fn load_from_str(source: &str) -> Result<LexiconStore, LexiconError> {
    let yaml: Value = serde_yaml::from_str(source)?;
    let mut builder = LexiconBuilder::new();

    if let Some(version) = yaml.get("version") {
        builder.version(scalar_to_string(version, "version")?);
    }

    match yaml.get("categories") {
        Some(Value::Mapping(categories)) => load_categories(categories, &mut builder)?,
        Some(Value::Null) | None => {
            tracing::warn!("lexicon has no 'categories' section, SS tables will be empty");
        }
        Some(_) => {
            return Err(LexiconError::NotAMapping {
                location: "categories".to_string(),
            })
        }
    }

    match yaml.get("phrases") {
        Some(Value::Mapping(phrases)) => load_phrases(phrases, &mut builder)?,
        Some(Value::Null) | None => {
            tracing::warn!("lexicon has no 'phrases' section, NL map will be empty");
        }
        Some(_) => {
            return Err(LexiconError::NotAMapping {
                location: "phrases".to_string(),
            })
        }
    }

    let store = builder.build();
    let stats = store.stats();
    tracing::info!(
        fingerprint = %stats.fingerprint,
        triggers = stats.trigger_count(),
        phrases = stats.phrase_count,
        "lexicon loaded"
    );
    Ok(store)
}

/// Read and parse a lexicon YAML file.
pub fn load_from_path(path: &Path) -> Result<LexiconStore, LexiconError> {
    let content = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "reading lexicon file");
    load_from_str(&content)
}

fn load_categories(categories: &Mapping, builder: &mut LexiconBuilder) -> Result<(), LexiconError> {
    for (key, table) in categories {
        let name = scalar_to_string(key, "categories")?;
        let category: Category = name.parse()?;
        let location = format!("categories.{}", category.as_str());

        let table = match table {
            Value::Mapping(table) => table,
            Value::Null => {
                tracing::warn!(category = %category, "empty lexicon category");
                continue;
            }
            _ => return Err(LexiconError::NotAMapping { location }),
        };

        for (trigger, meaning) in table {
            let trigger = scalar_to_string(trigger, &location)?;
            let meaning = scalar_to_string(meaning, &format!("{}.{:?}", location, trigger))?;
            builder.insert(category, trigger, meaning)?;
        }
    }
    Ok(())
}

fn load_phrases(phrases: &Mapping, builder: &mut LexiconBuilder) -> Result<(), LexiconError> {
    for (phrase, snippet) in phrases {
        let phrase = scalar_to_string(phrase, "phrases")?;
        let snippet = scalar_to_string(snippet, &format!("phrases.{:?}", phrase))?;
        builder.insert_phrase(phrase, snippet)?;
    }
    Ok(())
}

/// Accept strings, and numbers or booleans written without quotes.
fn scalar_to_string(value: &Value, location: &str) -> Result<String, LexiconError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(LexiconError::NotAString {
            location: location.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r##"
version: "2.1.0"
categories:
  composite:
    "<[]>": "Pending user container"
  core:
    "[]": "User container"
    "<": "Open angle"
  tag:
    "#goal": "Goal tag"
phrases:
  "User Container": "[]"
  "leads to": "→"
"##;

    #[test]
    fn test_load_sample() {
        let store = load_from_str(SAMPLE).unwrap();
        assert_eq!(store.version(), "2.1.0");
        assert_eq!(store.lookup("[]", Category::Core), Some("User container"));
        assert_eq!(store.lookup("#goal", Category::Tag), Some("Goal tag"));
        assert_eq!(store.nl_snippet("user container"), Some("[]"));
        assert!(store.table(Category::Structural).is_empty());
    }

    #[test]
    fn test_document_order_is_declaration_order() {
        let store = load_from_str(SAMPLE).unwrap();
        let core: Vec<&str> = store.table(Category::Core).iter().map(|(t, _)| t).collect();
        assert_eq!(core, vec!["[]", "<"]);
    }

    #[test]
    fn test_missing_sections_give_empty_store() {
        let store = load_from_str("version: \"1.0.0\"\n").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let yaml = "categories:\n  glyph:\n    \"x\": \"y\"\n";
        assert!(matches!(
            load_from_str(yaml),
            Err(LexiconError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_empty_trigger_is_rejected() {
        let yaml = "categories:\n  core:\n    \"\": \"nothing\"\n";
        assert!(matches!(
            load_from_str(yaml),
            Err(LexiconError::EmptyTrigger(Category::Core))
        ));
    }

    #[test]
    fn test_duplicate_phrase_differing_in_case_is_rejected() {
        let yaml = "phrases:\n  \"Leads To\": \"→\"\n  \"leads to\": \"->\"\n";
        assert!(matches!(
            load_from_str(yaml),
            Err(LexiconError::DuplicatePhrase(_))
        ));
    }

    #[test]
    fn test_non_string_meaning_is_rejected() {
        let yaml = "categories:\n  core:\n    \"[]\": [1, 2]\n";
        assert!(matches!(
            load_from_str(yaml),
            Err(LexiconError::NotAString { .. })
        ));
    }

    #[test]
    fn test_unquoted_number_trigger_is_accepted() {
        let yaml = "categories:\n  core:\n    1: \"One\"\n";
        let store = load_from_str(yaml).unwrap();
        assert_eq!(store.lookup("1", Category::Core), Some("One"));
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lexicon.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let store = load_from_path(&path).unwrap();
        assert_eq!(store.stats().trigger_count(), 4);

        let missing = load_from_path(&dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(LexiconError::Io { .. })));
    }

    #[test]
    fn test_same_yaml_same_fingerprint() {
        let a = load_from_str(SAMPLE).unwrap();
        let b = load_from_str(SAMPLE).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }
}
