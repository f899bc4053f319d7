//! LexiconStore - immutable trigger and phrase tables.
//!
//! The store is built once (from YAML or through [`LexiconBuilder`]) and never
//! mutated afterwards. Hosts that need a different lexicon build a new store
//! and replace the old one as a unit.

use std::collections::HashMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::LexiconError;
use crate::types::{fold_case, Category, LexiconEntry, NlMapEntry};

// =============================================================================
// Tables
// =============================================================================

/// Trigger → meaning table for one category, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    entries: Vec<(String, String)>,
    by_trigger: HashMap<String, usize>,
}

impl CategoryTable {
    pub fn get(&self, trigger: &str) -> Option<&str> {
        self.by_trigger
            .get(trigger)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// `(trigger, meaning)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, m)| (t.as_str(), m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(
        &mut self,
        category: Category,
        trigger: String,
        meaning: String,
    ) -> Result<(), LexiconError> {
        if trigger.is_empty() {
            return Err(LexiconError::EmptyTrigger(category));
        }
        if trigger.starts_with(char::is_whitespace) {
            return Err(LexiconError::UnreachableTrigger { category, trigger });
        }
        if self.by_trigger.contains_key(&trigger) {
            return Err(LexiconError::DuplicateTrigger { category, trigger });
        }
        self.by_trigger.insert(trigger.clone(), self.entries.len());
        self.entries.push((trigger, meaning));
        Ok(())
    }
}

/// Case-folded phrase → SS snippet table, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct PhraseTable {
    entries: Vec<NlMapEntry>,
    by_phrase: HashMap<String, usize>,
}

impl PhraseTable {
    /// Case-insensitive lookup.
    pub fn get(&self, phrase: &str) -> Option<&str> {
        self.by_phrase
            .get(&fold_case(phrase))
            .map(|&i| self.entries[i].snippet.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &NlMapEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, entry: NlMapEntry) -> Result<(), LexiconError> {
        if entry.phrase.is_empty() {
            return Err(LexiconError::EmptyPhrase);
        }
        if entry.phrase.starts_with(char::is_whitespace) {
            return Err(LexiconError::UnreachablePhrase(entry.phrase));
        }
        if self.by_phrase.contains_key(&entry.phrase) {
            return Err(LexiconError::DuplicatePhrase(entry.phrase));
        }
        self.by_phrase.insert(entry.phrase.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }
}

// =============================================================================
// Store
// =============================================================================

/// The complete lexicon: four SS category tables plus the NL phrase map.
#[derive(Debug, Clone)]
pub struct LexiconStore {
    version: String,
    composite: CategoryTable,
    structural: CategoryTable,
    tag: CategoryTable,
    core: CategoryTable,
    phrases: PhraseTable,
    fingerprint: String,
}

impl Default for LexiconStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl LexiconStore {
    /// A lexicon with no entries.
    pub fn empty() -> Self {
        LexiconBuilder::new().build()
    }

    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::new()
    }

    /// Build a store from flat entry lists, validating as it goes.
    pub fn from_entries(
        entries: impl IntoIterator<Item = LexiconEntry>,
        phrases: impl IntoIterator<Item = NlMapEntry>,
    ) -> Result<Self, LexiconError> {
        let mut builder = LexiconBuilder::new();
        for entry in entries {
            builder.insert(entry.category, entry.trigger, entry.meaning)?;
        }
        for phrase in phrases {
            builder.insert_phrase(phrase.phrase, phrase.snippet)?;
        }
        Ok(builder.build())
    }

    /// The table for one category.
    pub fn table(&self, category: Category) -> &CategoryTable {
        match category {
            Category::Composite => &self.composite,
            Category::Structural => &self.structural,
            Category::Tag => &self.tag,
            Category::Core => &self.core,
        }
    }

    /// Meaning of `trigger` in `category`, if registered.
    pub fn lookup(&self, trigger: &str, category: Category) -> Option<&str> {
        self.table(category).get(trigger)
    }

    /// SS snippet for a phrase (case-insensitive), if registered.
    pub fn nl_snippet(&self, phrase: &str) -> Option<&str> {
        self.phrases.get(phrase)
    }

    pub fn phrases(&self) -> &PhraseTable {
        &self.phrases
    }

    /// Every SS entry, categories in precedence order, each in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = LexiconEntry> + '_ {
        Category::ALL.into_iter().flat_map(move |category| {
            self.table(category)
                .iter()
                .map(move |(trigger, meaning)| LexiconEntry::new(category, trigger, meaning))
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Deterministic SHA-256 over the lexicon contents.
    ///
    /// Two stores with the same entries in the same declaration order share a
    /// fingerprint, so hosts can tell whether derived indices are stale.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty() && Category::ALL.iter().all(|&c| self.table(c).is_empty())
    }

    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            fingerprint: self.fingerprint.clone(),
            version: self.version.clone(),
            composite_count: self.composite.len(),
            structural_count: self.structural.len(),
            tag_count: self.tag.len(),
            core_count: self.core.len(),
            phrase_count: self.phrases.len(),
            longest_trigger: self
                .entries()
                .map(|e| e.trigger_len())
                .max()
                .unwrap_or(0),
            longest_phrase: self
                .phrases
                .iter()
                .map(|p| p.phrase_len())
                .max()
                .unwrap_or(0),
        }
    }

    fn compute_fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(b"ss_lexicon_v1");

        for category in Category::ALL {
            hasher.update(category.as_str().as_bytes());
            hasher.update([0xff]);
            for (trigger, meaning) in self.table(category).iter() {
                hasher.update(trigger.as_bytes());
                hasher.update([0]);
                hasher.update(meaning.as_bytes());
                hasher.update([0]);
            }
        }

        hasher.update(b"phrases");
        hasher.update([0xff]);
        for entry in self.phrases.iter() {
            hasher.update(entry.phrase.as_bytes());
            hasher.update([0]);
            hasher.update(entry.snippet.as_bytes());
            hasher.update([0]);
        }

        format!("{:x}", hasher.finalize())
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Incremental, validating constructor for [`LexiconStore`].
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    version: Option<String>,
    composite: CategoryTable,
    structural: CategoryTable,
    tag: CategoryTable,
    core: CategoryTable,
    phrases: PhraseTable,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&mut self, version: impl Into<String>) -> &mut Self {
        self.version = Some(version.into());
        self
    }

    /// Register an SS trigger.
    ///
    /// Rejects empty triggers, triggers starting with whitespace (the scanner
    /// trims before matching, so they are unreachable) and duplicates within
    /// the category.
    pub fn insert(
        &mut self,
        category: Category,
        trigger: impl Into<String>,
        meaning: impl Into<String>,
    ) -> Result<&mut Self, LexiconError> {
        let table = match category {
            Category::Composite => &mut self.composite,
            Category::Structural => &mut self.structural,
            Category::Tag => &mut self.tag,
            Category::Core => &mut self.core,
        };
        table.insert(category, trigger.into(), meaning.into())?;
        Ok(self)
    }

    /// Register an NL phrase. The phrase is case-folded with
    /// [`fold_case`](crate::fold_case) before the uniqueness check.
    pub fn insert_phrase(
        &mut self,
        phrase: impl AsRef<str>,
        snippet: impl Into<String>,
    ) -> Result<&mut Self, LexiconError> {
        self.phrases.insert(NlMapEntry::new(phrase, snippet))?;
        Ok(self)
    }

    pub fn build(self) -> LexiconStore {
        let mut store = LexiconStore {
            version: self.version.unwrap_or_else(|| "1.0.0".to_string()),
            composite: self.composite,
            structural: self.structural,
            tag: self.tag,
            core: self.core,
            phrases: self.phrases,
            fingerprint: String::new(),
        };
        store.fingerprint = store.compute_fingerprint();
        store
    }
}

// =============================================================================
// Statistics
// =============================================================================

/// Statistics about a lexicon.
#[derive(Debug, Clone, Serialize)]
pub struct LexiconStats {
    pub fingerprint: String,
    pub version: String,
    pub composite_count: usize,
    pub structural_count: usize,
    pub tag_count: usize,
    pub core_count: usize,
    pub phrase_count: usize,
    pub longest_trigger: usize,
    pub longest_phrase: usize,
}

impl LexiconStats {
    pub fn trigger_count(&self) -> usize {
        self.composite_count + self.structural_count + self.tag_count + self.core_count
    }
}

impl std::fmt::Display for LexiconStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Lexicon Statistics:")?;
        writeln!(f, "  Fingerprint: {}", self.fingerprint)?;
        writeln!(f, "  Version: {}", self.version)?;
        writeln!(f, "  Composite triggers: {}", self.composite_count)?;
        writeln!(f, "  Structural triggers: {}", self.structural_count)?;
        writeln!(f, "  Tag triggers: {}", self.tag_count)?;
        writeln!(f, "  Core triggers: {}", self.core_count)?;
        writeln!(f, "  NL phrases: {}", self.phrase_count)?;
        writeln!(f, "  Longest trigger: {} chars", self.longest_trigger)?;
        writeln!(f, "  Longest phrase: {} chars", self.longest_phrase)?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
